//! Player controller
//!
//! ECS ответственность:
//! - Locomotion intents (бег, двойной прыжок, присед с проверкой потолка)
//! - Strike/cast: старт по input, resolve по AnimationCue, cooldown после конца анимации
//! - Mana: списание за cast, периодический regen, UI bar
//! - Смерть: input off, ignore_hurt, "Death" клип
//!
//! Animation timing (когда бьёт удар, когда вылетает fireball) решает presentation
//! слой через AnimationCue; headless: `drive_headless_cues`.

use bevy::prelude::*;

pub mod actions;
pub mod components;
pub mod systems;

// Re-export основных типов
pub use actions::{ActionTimer, PlayerActions};
pub use components::{ManaPool, PlayerBody, PlayerConfig, PlayerInput};

use crate::presentation::drive_headless_cues;
use crate::SimulationSet;

/// Player Plugin
///
/// Порядок выполнения:
/// 1. (Input) player_locomotion → player_start_actions → drive_headless_cues →
///    resolve_player_cues → regenerate_mana
/// 2. (Signals) publish_mana_bars
/// 3. (Lifecycle) flag_player_hurt → handle_player_death
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::player_locomotion,
                systems::player_start_actions,
                drive_headless_cues,
                systems::resolve_player_cues,
                systems::regenerate_mana,
            )
                .chain()
                .in_set(SimulationSet::Input),
        )
        .add_systems(
            FixedUpdate,
            systems::publish_mana_bars.in_set(SimulationSet::Signals),
        )
        .add_systems(
            FixedUpdate,
            (systems::flag_player_hurt, systems::handle_player_death)
                .chain()
                .in_set(SimulationSet::Lifecycle),
        );
    }
}

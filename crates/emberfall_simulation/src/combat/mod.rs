//! Combat resolution module
//!
//! ECS ответственность:
//! - actions: stateless damage primitives (direct hit, area strike, projectile descriptor)
//! - projectile: снаряды (spawn, контакт, lifetime)
//! - hazard: Trap (continuous) и Mine (one-shot)
//! - pickup: одноразовые бонусы
//!
//! Все `affect_health` вызовы идут из chained систем одного schedule,
//! поэтому порядок применения урона детерминирован.

use bevy::prelude::*;

pub mod actions;
pub mod hazard;
pub mod pickup;
pub mod projectile;

// Re-export основных типов
pub use actions::{apply_direct_damage, area_strike, LaunchProjectile, ProjectileSpec};
pub use hazard::{Hazard, HazardMode};
pub use pickup::Pickup;
pub use projectile::Projectile;

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. (Actions) spawn_projectiles → projectile_contacts → expire_projectiles
/// 2. (Hazards) track_hazard_overlaps → apply_hazard_damage → collect_pickups
///
/// move_projectiles живёт в Physics set (до detect_overlaps).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LaunchProjectile>();

        app.add_systems(
            FixedUpdate,
            (
                projectile::spawn_projectiles,
                projectile::projectile_contacts,
                projectile::expire_projectiles,
            )
                .chain()
                .in_set(SimulationSet::Actions),
        )
        .add_systems(
            FixedUpdate,
            (
                hazard::track_hazard_overlaps,
                hazard::apply_hazard_damage,
                pickup::collect_pickups,
            )
                .chain()
                .in_set(SimulationSet::Hazards),
        );
    }
}

//! Hostile agent AI
//!
//! FSM агента (Idle/Move/TargetSpotted/Attack/None) + варианты атаки (Ranged/Melee).
//! Архитектура:
//! - components: Agent (state, config, waypoints, target, periodic tasks)
//! - sensor: геометрия trigger range / attack radius
//! - variants: AttackBehavior + AgentVariant
//! - fsm: `run_agent_tick` (чистая функция, тестируется без App)
//! - systems: ECS обвязка (target lookup, LaunchProjectile, смерть)

use bevy::prelude::*;

pub mod components;
pub mod fsm;
pub mod sensor;
pub mod systems;
pub mod variants;


// Re-export основных типов
pub use components::{Agent, AgentConfig, AgentState, MovementType};
pub use fsm::run_agent_tick;
pub use systems::{acquire_player_target, agent_tick, handle_agent_death};
pub use variants::{AgentContext, AgentVariant, AttackBehavior, MeleeAttack, RangedAttack, TargetView};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. acquire_player_target: агенты без цели берут игрока
/// 2. agent_tick: scan, state handler, attack-range check
/// 3. handle_agent_death (Lifecycle): EntityDied → None state + despawn
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (acquire_player_target, agent_tick)
                .chain()
                .in_set(SimulationSet::Agents),
        )
        .add_systems(
            FixedUpdate,
            handle_agent_death.in_set(SimulationSet::Lifecycle),
        );
    }
}

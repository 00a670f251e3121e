//! Level data: RON blueprint, spawn helpers, restart context

pub mod blueprint;
pub mod context;
pub mod spawn;

// Re-export основных типов
pub use blueprint::{AgentBlueprint, HazardBlueprint, LevelBlueprint, PickupBlueprint, PlayerBlueprint};
pub use context::{handle_restart, start_level, RestartRequested, SimulationContext};
pub use spawn::{spawn_agent, spawn_hazard, spawn_level, spawn_pickup, spawn_player, SpawnedLevel};

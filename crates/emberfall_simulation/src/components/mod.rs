//! ECS компоненты, общие для агентов и игрока
//!
//! Организация по доменам:
//! - actor: маркеры (Player, SimulationEntity), ориентация (Facing)
//! - movement: MovementIntent (ECS → physics provider)

pub mod actor;
pub mod movement;

pub use actor::*;
pub use movement::*;

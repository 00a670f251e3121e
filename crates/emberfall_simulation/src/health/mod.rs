//! Health/armor модель
//!
//! ECS ответственность:
//! - Пулы health/armor + absorption (armor первым принимает урон)
//! - Death signal ровно один раз за жизнь
//! - Ordered observers (синхронно) + outbox → Bevy events (HealthChanged, ArmorChanged, EntityDied)
//!
//! Все мутации идут через `Health::affect_health/affect_armor/kill` внутри
//! chained FixedUpdate систем, поэтому clamp + notify каждого вызова атомарны.

pub mod events;
pub mod model;
pub mod systems;

#[cfg(test)]
mod model_tests;

pub use events::{ArmorChanged, EntityDied, HealthChanged};
pub use model::{Health, HealthObserver, HealthSignal};
pub use systems::{bind_health_owners, publish_health_signals};

//! Health events (публикуются из outbox модели в порядке вызовов)

use bevy::prelude::*;

/// Событие: health изменился (delta может быть 0)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub delta: i32,
    pub health: i32,
    pub armor: i32,
}

/// Событие: armor изменился
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ArmorChanged {
    pub entity: Entity,
    pub delta: i32,
    pub armor: i32,
}

/// Событие: entity умер (health <= 0), ровно один раз за жизнь
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
}

//! Health systems: привязка owner + публикация сигналов

use bevy::prelude::*;

use super::events::{ArmorChanged, EntityDied, HealthChanged};
use super::model::{Health, HealthSignal};
use crate::presentation::{StatBarChanged, StatKind};

/// Система: новый Health узнаёт свой entity (для observers и логов)
pub fn bind_health_owners(mut query: Query<(Entity, &mut Health), Added<Health>>) {
    for (entity, mut health) in query.iter_mut() {
        health.bind_owner(entity);
    }
}

/// Система: outbox каждого Health → Bevy events + UI bars
///
/// Порядок сигналов внутри entity сохраняется (Died раньше HealthChanged того же вызова).
pub fn publish_health_signals(
    mut query: Query<(Entity, &mut Health)>,
    mut health_events: EventWriter<HealthChanged>,
    mut armor_events: EventWriter<ArmorChanged>,
    mut died_events: EventWriter<EntityDied>,
    mut bar_events: EventWriter<StatBarChanged>,
) {
    for (entity, mut health) in query.iter_mut() {
        // Не трогаем Mut без сигналов (change detection)
        if !health.has_pending_signals() {
            continue;
        }

        let (max_health, max_armor) = (health.max_health(), health.max_armor());
        for signal in health.drain_signals() {
            match signal {
                HealthSignal::HealthChanged { delta, health, armor } => {
                    health_events.write(HealthChanged { entity, delta, health, armor });
                    bar_events.write(StatBarChanged {
                        entity,
                        stat: StatKind::Health,
                        current: health,
                        max: max_health,
                    });
                    bar_events.write(StatBarChanged {
                        entity,
                        stat: StatKind::Armor,
                        current: armor,
                        max: max_armor,
                    });
                }
                HealthSignal::ArmorChanged { delta, armor } => {
                    armor_events.write(ArmorChanged { entity, delta, armor });
                    bar_events.write(StatBarChanged {
                        entity,
                        stat: StatKind::Armor,
                        current: armor,
                        max: max_armor,
                    });
                }
                HealthSignal::Died => {
                    died_events.write(EntityDied { entity });
                }
            }
        }
    }
}

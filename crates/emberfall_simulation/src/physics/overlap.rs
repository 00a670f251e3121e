//! Headless trigger overlaps (circle vs circle)
//!
//! TriggerZone (hazard, pickup, projectile) × Collider (актор) → OverlapEvent::{Started, Ended}.
//! ActiveOverlaps хранит пары прошлого tick; события = diff с текущим tick.
//! BTreeSet → детерминированный порядок событий.

use bevy::prelude::*;
use std::collections::BTreeSet;

/// Тело актора, которое может входить в trigger зоны
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub radius: f32,
}

/// Trigger зона (без физического отклика)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TriggerZone {
    pub radius: f32,
}

/// Event: начало/конец пересечения зоны с collider
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    Started { zone: Entity, other: Entity },
    Ended { zone: Entity, other: Entity },
}

/// Пары (zone, other), пересекающиеся на прошлом tick
#[derive(Resource, Debug, Default)]
pub struct ActiveOverlaps {
    pairs: BTreeSet<(Entity, Entity)>,
}

impl ActiveOverlaps {
    pub fn contains(&self, zone: Entity, other: Entity) -> bool {
        self.pairs.contains(&(zone, other))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Заменить набор пар; вернуть (started, ended) в детерминированном порядке
    fn replace(
        &mut self,
        current: BTreeSet<(Entity, Entity)>,
    ) -> (Vec<(Entity, Entity)>, Vec<(Entity, Entity)>) {
        let started = current.difference(&self.pairs).copied().collect();
        let ended = self.pairs.difference(&current).copied().collect();
        self.pairs = current;
        (started, ended)
    }
}

/// Система: пересчёт пересечений и отправка OverlapEvent
///
/// Despawned entity выпадает из набора → Ended.
pub fn detect_overlaps(
    zones: Query<(Entity, &Transform, &TriggerZone)>,
    colliders: Query<(Entity, &Transform, &Collider)>,
    mut active: ResMut<ActiveOverlaps>,
    mut overlap_events: EventWriter<OverlapEvent>,
) {
    let mut current = BTreeSet::new();

    for (zone, zone_transform, trigger) in zones.iter() {
        let zone_position = zone_transform.translation.truncate();
        for (other, other_transform, collider) in colliders.iter() {
            if zone == other {
                continue;
            }
            let distance = zone_position.distance(other_transform.translation.truncate());
            if distance <= trigger.radius + collider.radius {
                current.insert((zone, other));
            }
        }
    }

    let (started, ended) = active.replace(current);
    for (zone, other) in ended {
        overlap_events.write(OverlapEvent::Ended { zone, other });
    }
    for (zone, other) in started {
        overlap_events.write(OverlapEvent::Started { zone, other });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Received(Vec<OverlapEvent>);

    fn collect_events(mut reader: EventReader<OverlapEvent>, mut received: ResMut<Received>) {
        received.0.extend(reader.read().copied());
    }

    fn overlap_app() -> App {
        let mut app = App::new();
        app.add_event::<OverlapEvent>()
            .init_resource::<ActiveOverlaps>()
            .init_resource::<Received>()
            .add_systems(Update, (detect_overlaps, collect_events).chain());
        app
    }

    #[test]
    fn test_overlap_started_and_ended_once() {
        let mut app = overlap_app();
        let zone = app
            .world_mut()
            .spawn((Transform::default(), TriggerZone { radius: 1.0 }))
            .id();
        let actor = app
            .world_mut()
            .spawn((Transform::from_xyz(1.2, 0.0, 0.0), Collider { radius: 0.5 }))
            .id();

        app.update();
        app.update(); // Пара уже активна: без повторного Started

        app.world_mut()
            .get_mut::<Transform>(actor)
            .unwrap()
            .translation
            .x = 5.0;
        app.update();

        assert_eq!(
            app.world().resource::<Received>().0,
            vec![
                OverlapEvent::Started { zone, other: actor },
                OverlapEvent::Ended { zone, other: actor },
            ]
        );
    }

    #[test]
    fn test_despawned_collider_ends_overlap() {
        let mut app = overlap_app();
        let zone = app
            .world_mut()
            .spawn((Transform::default(), TriggerZone { radius: 1.0 }))
            .id();
        let actor = app
            .world_mut()
            .spawn((Transform::default(), Collider { radius: 0.5 }))
            .id();

        app.update();
        app.world_mut().despawn(actor);
        app.update();

        assert!(app.world().resource::<ActiveOverlaps>().is_empty());
        assert_eq!(
            app.world().resource::<Received>().0.last(),
            Some(&OverlapEvent::Ended { zone, other: actor })
        );
    }
}

//! Death lifecycle: маркеры Dead / DespawnAfter + отложенный despawn

use bevy::prelude::*;

use crate::clock::SimClock;

/// Компонент-маркер: entity мертв (Health <= 0)
///
/// Системы игровой логики игнорируют такие entity (hazards, projectiles, strike).
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (SimClock секунды)
    pub despawn_time: f64,
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    clock: Res<SimClock>,
) {
    let now = clock.now();

    for (entity, despawn_after) in query.iter() {
        if now >= despawn_after.despawn_time {
            crate::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}

//! Environmental hazards: Trap (непрерывный урон) и Mine (одноразовый взрыв)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::actions::apply_direct_damage;
use crate::clock::{SimClock, TIME_EPSILON};
use crate::health::Health;
use crate::physics::OverlapEvent;
use crate::presentation::{DespawnRequest, SpawnKind, SpawnRequest};

/// Смещение эффекта взрыва мины от её позиции
pub const EXPLOSION_OFFSET: Vec2 = Vec2::new(0.0, 2.0);
pub const EXPLOSION_LIFETIME_SECS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardMode {
    /// Урон каждые `damage_cooldown_secs` всем, кто внутри
    Continuous { damage_cooldown_secs: f32 },
    /// Один урон + взрыв + самоуничтожение
    OneShot,
}

#[derive(Component, Debug, Clone)]
pub struct Hazard {
    pub damage: i32,
    pub mode: HazardMode,
    /// Health-bearing entities внутри зоны (BTreeSet: стабильный порядок урона)
    occupants: BTreeSet<Entity>,
    next_damage_at: f64,
    triggered: bool,
}

impl Hazard {
    pub fn trap(damage: i32, damage_cooldown_secs: f32) -> Self {
        Self::new(damage, HazardMode::Continuous { damage_cooldown_secs })
    }

    pub fn mine(damage: i32) -> Self {
        Self::new(damage, HazardMode::OneShot)
    }

    pub fn new(damage: i32, mode: HazardMode) -> Self {
        Self {
            damage,
            mode,
            occupants: BTreeSet::new(),
            next_damage_at: 0.0,
            triggered: false,
        }
    }

    pub fn occupants(&self) -> impl Iterator<Item = Entity> + '_ {
        self.occupants.iter().copied()
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn enter(&mut self, other: Entity) {
        self.occupants.insert(other);
    }

    /// Выход останавливает урон по этой entity сразу, остальные продолжают получать
    pub fn exit(&mut self, other: Entity) {
        self.occupants.remove(&other);
    }

    /// Continuous: пора ли бить (и сдвинуть расписание)
    fn poll_continuous(&mut self, now: f64, damage_cooldown_secs: f32) -> bool {
        if now + TIME_EPSILON < self.next_damage_at {
            return false;
        }
        self.next_damage_at = now + f64::from(damage_cooldown_secs);
        true
    }
}

/// Система: OverlapEvent → цель hazard
pub fn track_hazard_overlaps(
    mut overlap_events: EventReader<OverlapEvent>,
    mut hazards: Query<&mut Hazard>,
    bodies: Query<(), With<Health>>,
) {
    for event in overlap_events.read() {
        match *event {
            OverlapEvent::Started { zone, other } => {
                let Ok(mut hazard) = hazards.get_mut(zone) else {
                    continue;
                };
                if bodies.contains(other) {
                    hazard.enter(other);
                }
            }
            OverlapEvent::Ended { zone, other } => {
                if let Ok(mut hazard) = hazards.get_mut(zone) {
                    hazard.exit(other);
                }
            }
        }
    }
}

/// Система: урон от hazards
///
/// Mine удаляет себя в тот же tick, когда сработала.
pub fn apply_hazard_damage(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut hazards: Query<(Entity, &Transform, &mut Hazard)>,
    mut targets: Query<&mut Health>,
    mut spawn_events: EventWriter<SpawnRequest>,
    mut despawn_events: EventWriter<DespawnRequest>,
) {
    let now = clock.now();

    for (entity, transform, mut hazard) in hazards.iter_mut() {
        if hazard.triggered || !hazard.is_occupied() {
            continue;
        }

        let fires = match hazard.mode {
            HazardMode::Continuous { damage_cooldown_secs } => {
                hazard.poll_continuous(now, damage_cooldown_secs)
            }
            HazardMode::OneShot => true,
        };
        if !fires {
            continue;
        }

        let occupants: Vec<Entity> = hazard.occupants().collect();
        let mut victims = Vec::with_capacity(occupants.len());
        for occupant in occupants {
            match targets.get_mut(occupant) {
                Ok(mut health) => {
                    apply_direct_damage(&mut health, hazard.damage);
                    victims.push(occupant);
                }
                Err(_) => {
                    crate::log(&format!("Hazard {:?}: occupant {:?} gone", entity, occupant));
                    hazard.exit(occupant);
                }
            }
        }
        if victims.is_empty() {
            continue;
        }

        match hazard.mode {
            HazardMode::Continuous { .. } => {
                crate::log(&format!(
                    "🔥 Trap {:?} hits {:?} for {}",
                    entity, victims, hazard.damage
                ));
            }
            HazardMode::OneShot => {
                hazard.triggered = true;

                let position = transform.translation.truncate() + EXPLOSION_OFFSET;
                spawn_events.write(SpawnRequest {
                    kind: SpawnKind::Explosion,
                    entity: None,
                    position,
                    facing: Default::default(),
                    lifetime_secs: EXPLOSION_LIFETIME_SECS,
                });
                commands.entity(entity).despawn();
                despawn_events.write(DespawnRequest {
                    entity,
                    delay_secs: 0.0,
                });

                crate::log_info(&format!(
                    "💣 Mine {:?} exploded on {:?} for {}",
                    entity, victims, hazard.damage
                ));
            }
        }
    }
}

//! Projectiles: стрелы лучников и fireball игрока
//!
//! Снаряд летит с постоянной скоростью вдоль facing; первый контакт с
//! Health-bearing entity (кроме owner) наносит урон и уничтожает снаряд.
//! По истечении lifetime снаряд удаляется без урона.

use bevy::prelude::*;

use super::actions::{apply_direct_damage, LaunchProjectile};
use crate::clock::SimClock;
use crate::components::SimulationEntity;
use crate::health::Health;
use crate::lifecycle::Dead;
use crate::physics::{OverlapEvent, TriggerZone};
use crate::presentation::{DespawnRequest, SpawnRequest};

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub owner: Entity,
    pub damage: i32,
    pub velocity: Vec2,
    pub expires_at: f64,
    /// Уже сработал (повторный контакт в тот же tick игнорируется)
    disabled: bool,
}

impl Projectile {
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Система: LaunchProjectile → entity снаряда + SpawnRequest для визуала
pub fn spawn_projectiles(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut launch_events: EventReader<LaunchProjectile>,
    mut spawn_events: EventWriter<SpawnRequest>,
) {
    for launch in launch_events.read() {
        let spec = launch.spec;
        let projectile = commands
            .spawn((
                Transform::from_translation(launch.position.extend(0.0)),
                Projectile {
                    owner: launch.owner,
                    damage: spec.damage,
                    velocity: Vec2::new(spec.speed * launch.facing.sign(), 0.0),
                    expires_at: clock.now() + f64::from(spec.lifetime_secs),
                    disabled: false,
                },
                TriggerZone { radius: spec.radius },
                SimulationEntity,
            ))
            .id();

        spawn_events.write(SpawnRequest {
            kind: launch.kind,
            entity: Some(projectile),
            position: launch.position,
            facing: launch.facing,
            lifetime_secs: spec.lifetime_secs,
        });

        crate::log(&format!(
            "🎯 Projectile {:?} ({:?}) launched by {:?}",
            projectile, launch.kind, launch.owner
        ));
    }
}

/// Система: position += velocity * dt (в Physics set, до detect_overlaps)
pub fn move_projectiles(mut query: Query<(&mut Transform, &Projectile)>, clock: Res<SimClock>) {
    let delta = clock.step_secs() as f32;

    for (mut transform, projectile) in query.iter_mut() {
        transform.translation += projectile.velocity.extend(0.0) * delta;
    }
}

/// Система: первый контакт → урон + despawn
pub fn projectile_contacts(
    mut commands: Commands,
    mut overlap_events: EventReader<OverlapEvent>,
    mut projectiles: Query<&mut Projectile>,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut despawn_events: EventWriter<DespawnRequest>,
) {
    for event in overlap_events.read() {
        let OverlapEvent::Started { zone, other } = *event else {
            continue;
        };
        let Ok(mut projectile) = projectiles.get_mut(zone) else {
            continue;
        };
        if projectile.disabled || projectile.owner == other {
            continue;
        }

        if let Ok(mut health) = targets.get_mut(other) {
            apply_direct_damage(&mut health, projectile.damage);
            crate::log(&format!(
                "💥 Projectile {:?} hit {:?} for {}",
                zone, other, projectile.damage
            ));
        }

        projectile.disabled = true;
        commands.entity(zone).despawn();
        despawn_events.write(DespawnRequest {
            entity: zone,
            delay_secs: 0.0,
        });
    }
}

/// Система: lifetime истёк → despawn без урона
pub fn expire_projectiles(
    mut commands: Commands,
    clock: Res<SimClock>,
    projectiles: Query<(Entity, &Projectile)>,
    mut despawn_events: EventWriter<DespawnRequest>,
) {
    let now = clock.now();

    for (entity, projectile) in projectiles.iter() {
        if projectile.disabled || now < projectile.expires_at {
            continue;
        }
        commands.entity(entity).despawn();
        despawn_events.write(DespawnRequest {
            entity,
            delay_secs: 0.0,
        });
    }
}

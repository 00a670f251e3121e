//! Combat actions: stateless примитивы доставки урона
//!
//! - `apply_direct_damage`: прямой удар по одному Health (melee агента, projectile, hazard)
//! - `area_strike`: мгновенная проверка круга вокруг точки удара (strike игрока)
//! - `ProjectileSpec` + `LaunchProjectile`: дескриптор снаряда (спавн делает projectile система)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::DerefMut;

use crate::components::Facing;
use crate::health::Health;
use crate::presentation::SpawnKind;

/// Урон всегда уменьшает health (знак damage игнорируется)
pub fn apply_direct_damage(health: &mut Health, damage: i32) {
    health.affect_health(-damage.saturating_abs());
}

/// Удар по всем кандидатам в радиусе `range` от `origin` (включительно)
///
/// Возвращает entity всех задетых (в порядке итерации кандидатов).
pub fn area_strike<H>(
    origin: Vec2,
    range: f32,
    damage: i32,
    candidates: impl IntoIterator<Item = (Entity, Vec2, H)>,
) -> Vec<Entity>
where
    H: DerefMut<Target = Health>,
{
    let mut hits = Vec::new();
    for (entity, position, mut health) in candidates {
        if origin.distance(position) > range {
            continue;
        }
        apply_direct_damage(&mut health, damage);
        hits.push(entity);
    }
    hits
}

/// Параметры снаряда (стрела лучника, fireball игрока)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub damage: i32,
    /// Скорость вдоль facing (units/sec)
    pub speed: f32,
    pub lifetime_secs: f32,
    /// Радиус контакта с целью
    pub radius: f32,
}

impl ProjectileSpec {
    pub fn arrow() -> Self {
        Self {
            damage: 10,
            speed: 12.0,
            lifetime_secs: 8.0,
            radius: 0.3,
        }
    }

    pub fn fireball() -> Self {
        Self {
            damage: 25,
            speed: 9.0,
            lifetime_secs: 5.0,
            radius: 0.5,
        }
    }
}

/// Event: запрос запуска снаряда
///
/// Отправитель (агент или игрок) никогда не получает урон от своего снаряда.
#[derive(Event, Debug, Clone)]
pub struct LaunchProjectile {
    pub owner: Entity,
    pub kind: SpawnKind,
    pub spec: ProjectileSpec,
    pub position: Vec2,
    pub facing: Facing,
}

//! Player components: config, input, тело, mana.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::actions::ProjectileSpec;

/// Параметры игрока (level blueprint)
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Горизонтальная скорость (units/sec)
    pub speed: f32,
    /// Множитель скорости в приседе (0..1)
    pub crouch_speed_factor: f32,
    pub jump_velocity: f32,
    /// Управление горизонталью в воздухе
    pub air_control: bool,

    pub strike_damage: i32,
    pub strike_range: f32,
    /// Центр области удара (смещение для facing Right)
    pub strike_point: [f32; 2],
    pub strike_cooldown_secs: f32,

    pub cast_cost: i32,
    pub cast_cooldown_secs: f32,
    /// Точка вылета fireball (смещение для facing Right)
    pub fire_point: [f32; 2],
    pub fireball: ProjectileSpec,

    pub max_mana: i32,
    pub mana_regen_amount: i32,
    pub mana_regen_interval_secs: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            crouch_speed_factor: 0.5,
            jump_velocity: 9.0,
            air_control: true,
            strike_damage: 20,
            strike_range: 1.2,
            strike_point: [1.0, 0.5],
            strike_cooldown_secs: 0.4,
            cast_cost: 20,
            cast_cooldown_secs: 1.0,
            fire_point: [0.8, 0.5],
            fireball: ProjectileSpec::fireball(),
            max_mana: 100,
            mana_regen_amount: 5,
            mana_regen_interval_secs: 1.0,
        }
    }
}

/// Input игрока на текущий tick (пишется input layer / demo script)
///
/// `jump`: one-shot (сбрасывается locomotion), остальное: удерживаемые кнопки.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// -1..1
    pub move_axis: f32,
    pub jump: bool,
    pub crouch: bool,
    pub strike: bool,
    pub cast: bool,
}

impl PlayerInput {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Состояние тела игрока поверх KinematicBody
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub crouching: bool,
    pub can_double_jump: bool,
    /// Над головой свободно (пишется physics provider)
    pub ceiling_clear: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            crouching: false,
            can_double_jump: false,
            ceiling_clear: true,
        }
    }
}

/// Mana пул игрока
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ManaPool {
    current: i32,
    max: i32,
    /// UI bar ещё не получил последнее значение
    dirty: bool,
}

impl ManaPool {
    /// Полный пул; первая публикация bar сразу
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: max,
            max,
            dirty: true,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.current - cost >= 0
    }

    /// Clamp в [0, max]
    pub fn change(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// (current, max) если значение ещё не публиковалось
    pub fn take_bar_update(&mut self) -> Option<(i32, i32)> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some((self.current, self.max))
    }
}

//! Presentation boundary (ECS → animation/UI/spawner слой)
//!
//! ECS ничего не рисует. Наружу уходит только:
//! - AnimatorParams: именованные bool флаги ("Idle", "Move", "Strike", ...) + one-shot клипы
//! - SpawnRequest / DespawnRequest: что заспавнить/убрать визуально
//! - StatBarChanged: (current, max) для health/armor/mana баров
//!
//! Внутрь приходит только AnimationCue (тайминг анимаций решает presentation слой).

use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::components::Facing;

pub mod headless_cues;

pub use headless_cues::{drive_headless_cues, ActionWindups};

/// Параметры аниматора entity (аналог bool параметров state machine аниматора)
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    flags: BTreeMap<&'static str, bool>,
    /// One-shot клип ("Death"), забирается presentation слоем
    pending_clip: Option<&'static str>,
}

impl AnimatorParams {
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.flags.insert(name, value);
    }

    /// Неизвестный флаг = false
    pub fn get_bool(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn play(&mut self, clip: &'static str) {
        self.pending_clip = Some(clip);
    }

    pub fn pending_clip(&self) -> Option<&'static str> {
        self.pending_clip
    }

    pub fn take_clip(&mut self) -> Option<&'static str> {
        self.pending_clip.take()
    }

    pub fn active_flags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.flags
            .iter()
            .filter(|(_, value)| **value)
            .map(|(name, _)| *name)
    }
}

/// Что presentation слой должен заспавнить
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    Arrow,
    Fireball,
    Explosion,
}

/// Event: запрос визуального спавна (projectile, explosion effect)
///
/// `entity`: ECS entity, за которым визуал должен следовать (None для чистых эффектов).
#[derive(Event, Debug, Clone)]
pub struct SpawnRequest {
    pub kind: SpawnKind,
    pub entity: Option<Entity>,
    pub position: Vec2,
    pub facing: Facing,
    pub lifetime_secs: f32,
}

/// Event: entity уходит из симуляции через `delay_secs` (death animation, self-destruct)
#[derive(Event, Debug, Clone)]
pub struct DespawnRequest {
    pub entity: Entity,
    pub delay_secs: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Health,
    Armor,
    Mana,
}

/// Event: UI bar должен показать (current, max)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct StatBarChanged {
    pub entity: Entity,
    pub stat: StatKind,
    pub current: i32,
    pub max: i32,
}

/// Момент анимации, привязанный к игровой логике
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    /// Кадр удара: area check + damage
    StrikeHit,
    /// Конец анимации удара: старт cooldown
    StrikeEnd,
    /// Кадр каста: спавн fireball
    CastRelease,
    /// Конец анимации каста: старт cooldown
    CastEnd,
}

/// Event: animation cue от presentation слоя (Godot AnimationTree / Unity animation events)
#[derive(Event, Debug, Clone)]
pub struct AnimationCue {
    pub entity: Entity,
    pub cue: CueKind,
}

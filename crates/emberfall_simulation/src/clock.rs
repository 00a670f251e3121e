//! Simulation clock и периодические задачи
//!
//! Единственный источник времени для всех timing-сравнений (cooldown'ы, scan,
//! mana regen, hazards). Время = tick × fixed step, без накопления float ошибки
//! и без wall-clock, поэтому тесты детерминированы: один `step_simulation` = один tick.

use bevy::prelude::*;

/// Допуск для сравнения timestamp'ов (tick × step не всегда точен в f64)
pub const TIME_EPSILON: f64 = 1e-6;

/// Монотонные simulation часы
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    tick: u64,
    step_secs: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::from_hz(60.0)
    }
}

impl SimClock {
    pub fn from_hz(hz: f64) -> Self {
        Self {
            tick: 0,
            step_secs: 1.0 / hz.max(1.0),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn step_secs(&self) -> f64 {
        self.step_secs
    }

    /// Текущее simulation время (секунды от старта)
    pub fn now(&self) -> f64 {
        self.tick as f64 * self.step_secs
    }

    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }
}

/// System: +1 tick (запускается ПЕРВЫМ в FixedUpdate)
pub fn advance_sim_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}

/// Периодическая задача, привязанная к entity (scan, attack-range check, regen)
///
/// Явные start/stop + idempotent guard: повторный `start` у запущенной задачи
/// ничего не делает, поэтому у entity никогда не бывает двух копий одной задачи.
/// Первый запуск тела: сразу в tick старта.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTask {
    interval: f64,
    next_due: Option<f64>,
}

impl PeriodicTask {
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval: f64::from(interval_secs.max(0.0)),
            next_due: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Возвращает true если задача реально стартовала (не была запущена ранее)
    pub fn start(&mut self, now: f64) -> bool {
        if self.is_running() {
            return false;
        }
        self.next_due = Some(now);
        true
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// true → пора выполнить тело задачи; следующий запуск через interval
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next_due {
            Some(due) if now + TIME_EPSILON >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

/// Cooldown атаки агента: "прошло ли ≥ cooldown с последней атаки"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCooldown {
    pub cooldown_secs: f32,
    last_attack: Option<f64>,
}

impl AttackCooldown {
    pub fn new(cooldown_secs: f32) -> Self {
        Self {
            cooldown_secs,
            last_attack: None,
        }
    }

    /// Никогда не атаковали → готово сразу
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_attack {
            Some(last) => now - last + TIME_EPSILON >= f64::from(self.cooldown_secs),
            None => true,
        }
    }

    /// Перезапись timestamp (не накопление)
    pub fn mark(&mut self, now: f64) {
        self.last_attack = Some(now);
    }

    pub fn last_attack(&self) -> Option<f64> {
        self.last_attack
    }
}

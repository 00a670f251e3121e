//! Health component: пулы, absorption, death guard, observers

use bevy::prelude::*;
use std::fmt;

/// Сигнал модели (в порядке вызовов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSignal {
    HealthChanged { delta: i32, health: i32, armor: i32 },
    ArmorChanged { delta: i32, armor: i32 },
    Died,
}

/// Синхронный подписчик модели
///
/// Вызывается в порядке регистрации, внутри `affect_health`/`affect_armor`.
/// Все методы опциональны.
pub trait HealthObserver: Send + Sync {
    fn on_health_changed(&mut self, _owner: Entity, _delta: i32, _health: i32, _armor: i32) {}

    fn on_armor_changed(&mut self, _owner: Entity, _delta: i32, _armor: i32) {}

    fn on_die(&mut self, _owner: Entity) {}
}

/// Здоровье + броня актора
///
/// Инварианты:
/// - 0 ≤ health ≤ max_health, 0 ≤ armor ≤ max_armor
/// - после смерти health не растёт до явного `reset()`
/// - Died эмитится не больше одного раза за жизнь
#[derive(Component)]
pub struct Health {
    max_health: i32,
    max_armor: i32,
    current_health: i32,
    current_armor: i32,
    /// Игнорировать любые изменения health (мёртвый игрок, cutscene)
    pub ignore_hurt: bool,
    death_signaled: bool,
    owner: Entity,
    observers: Vec<Box<dyn HealthObserver>>,
    outbox: Vec<HealthSignal>,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100, 0)
    }
}

impl fmt::Debug for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Health")
            .field("health", &self.current_health)
            .field("max_health", &self.max_health)
            .field("armor", &self.current_armor)
            .field("max_armor", &self.max_armor)
            .field("ignore_hurt", &self.ignore_hurt)
            .field("death_signaled", &self.death_signaled)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Health {
    /// Полные пулы. max_health минимум 1, max_armor минимум 0.
    pub fn new(max_health: i32, max_armor: i32) -> Self {
        let max_health = max_health.max(1);
        let max_armor = max_armor.max(0);
        Self {
            max_health,
            max_armor,
            current_health: max_health,
            current_armor: max_armor,
            ignore_hurt: false,
            death_signaled: false,
            owner: Entity::PLACEHOLDER,
            observers: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Стартовые значения ниже максимума (clamp, без сигналов)
    #[cfg(test)]
    pub(crate) fn with_current(mut self, health: i32, armor: i32) -> Self {
        self.current_health = health.clamp(1, self.max_health);
        self.current_armor = armor.clamp(0, self.max_armor);
        self
    }

    pub fn health(&self) -> i32 {
        self.current_health
    }

    pub fn armor(&self) -> i32 {
        self.current_armor
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn max_armor(&self) -> i32 {
        self.max_armor
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    /// Entity, который передаётся в observers (ставится системой bind_health_owners)
    pub fn bind_owner(&mut self, owner: Entity) {
        self.owner = owner;
    }

    pub fn add_observer(&mut self, observer: Box<dyn HealthObserver>) {
        self.observers.push(observer);
    }

    /// Изменить health (отрицательное = урон через armor absorption)
    pub fn affect_health(&mut self, delta: i32) {
        if self.ignore_hurt {
            crate::log(&format!("Hurt ignored for {:?}", self.owner));
            return;
        }

        if delta < 0 {
            let damage = i32::try_from(delta.unsigned_abs()).unwrap_or(i32::MAX);
            let unabsorbed = self.absorb_with_armor(damage);
            if unabsorbed > 0 {
                self.current_health = self
                    .current_health
                    .saturating_sub(unabsorbed)
                    .clamp(0, self.max_health);
            }
        } else if !self.death_signaled {
            self.current_health = self
                .current_health
                .saturating_add(delta)
                .clamp(0, self.max_health);
        }

        if self.current_health <= 0 && !self.death_signaled {
            self.death_signaled = true;
            crate::log_info(&format!("💀 {:?} died", self.owner));
            self.emit(HealthSignal::Died);
        }

        self.emit(HealthSignal::HealthChanged {
            delta,
            health: self.current_health,
            armor: self.current_armor,
        });
    }

    /// Изменить armor (clamp, health не трогаем)
    pub fn affect_armor(&mut self, delta: i32) {
        self.current_armor = self
            .current_armor
            .saturating_add(delta)
            .clamp(0, self.max_armor);

        self.emit(HealthSignal::ArmorChanged {
            delta,
            armor: self.current_armor,
        });
    }

    /// Гарантированная смерть независимо от брони
    pub fn kill(&mut self) {
        let total = self.current_health.saturating_add(self.current_armor);
        self.affect_health(-total);
    }

    /// Полные пулы + снова разрешаем Died (restart)
    pub fn reset(&mut self) {
        self.current_health = self.max_health;
        self.current_armor = self.max_armor;
        self.death_signaled = false;
        self.emit(HealthSignal::HealthChanged {
            delta: 0,
            health: self.current_health,
            armor: self.current_armor,
        });
        self.emit(HealthSignal::ArmorChanged {
            delta: 0,
            armor: self.current_armor,
        });
    }

    /// Забрать накопленные сигналы (для публикации в Bevy events)
    pub fn drain_signals(&mut self) -> Vec<HealthSignal> {
        std::mem::take(&mut self.outbox)
    }

    pub fn has_pending_signals(&self) -> bool {
        !self.outbox.is_empty()
    }

    /// Броня принимает урон первой; возвращает остаток для health
    fn absorb_with_armor(&mut self, damage: i32) -> i32 {
        let absorbed = damage.min(self.current_armor);
        self.current_armor -= absorbed;
        damage - absorbed
    }

    fn emit(&mut self, signal: HealthSignal) {
        let owner = self.owner;
        for observer in self.observers.iter_mut() {
            match signal {
                HealthSignal::HealthChanged { delta, health, armor } => {
                    observer.on_health_changed(owner, delta, health, armor)
                }
                HealthSignal::ArmorChanged { delta, armor } => {
                    observer.on_armor_changed(owner, delta, armor)
                }
                HealthSignal::Died => observer.on_die(owner),
            }
        }
        self.outbox.push(signal);
    }
}

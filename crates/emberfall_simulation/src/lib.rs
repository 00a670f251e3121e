//! EMBERFALL Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (headless): враждебные агенты, health/armor модель,
//! игрок, hazards, снаряды. Движок (рендер, physics, анимации, UI): внешний
//! коллаборатор и общается с ECS только через компоненты и events.
//!
//! Один scheduling domain: FixedUpdate, порядок задан `SimulationSet`.
//! Единственный источник времени: `SimClock` (tick × fixed step).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod health;
pub mod level;
pub mod lifecycle;
pub mod logger;
pub mod physics;
pub mod player;
pub mod presentation;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, Agent, AgentConfig, AgentState, AgentVariant, MeleeAttack, MovementType, RangedAttack};
pub use clock::{PeriodicTask, SimClock};
pub use combat::{CombatPlugin, Hazard, HazardMode, LaunchProjectile, Pickup, Projectile, ProjectileSpec};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use health::{ArmorChanged, EntityDied, Health, HealthChanged, HealthObserver};
pub use level::{start_level, LevelBlueprint, RestartRequested, SimulationContext, SpawnedLevel};
pub use lifecycle::{Dead, DespawnAfter};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
pub use physics::{HeadlessPhysicsPlugin, KinematicBody, OverlapEvent};
pub use player::{ManaPool, PlayerActions, PlayerConfig, PlayerInput, PlayerPlugin};
pub use presentation::{AnimationCue, AnimatorParams, CueKind, DespawnRequest, SpawnRequest, StatBarChanged};

/// Фазы одного simulation tick (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// +1 tick, привязка новых Health
    Clock,
    /// Intent прошлого tick → Transform, overlaps
    Physics,
    /// Player input, действия, animation cues, mana
    Input,
    /// FSM агентов
    Agents,
    /// Снаряды
    Actions,
    /// Traps, mines, pickups
    Hazards,
    /// Health/mana outbox → events
    Signals,
    /// Смерть, отложенный despawn
    Lifecycle,
    /// Restart уровня (после всех мутаций tick)
    Restart,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();
        set_log_level(config.log_level);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep (по умолчанию 60Hz) для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            .insert_resource(SimClock::from_hz(config.fixed_hz))
            .insert_resource(config)
            .init_resource::<level::SimulationContext>()
            // Events
            .add_event::<HealthChanged>()
            .add_event::<ArmorChanged>()
            .add_event::<EntityDied>()
            .add_event::<SpawnRequest>()
            .add_event::<DespawnRequest>()
            .add_event::<StatBarChanged>()
            .add_event::<AnimationCue>()
            .add_event::<RestartRequested>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Clock,
                    SimulationSet::Physics,
                    SimulationSet::Input,
                    SimulationSet::Agents,
                    SimulationSet::Actions,
                    SimulationSet::Hazards,
                    SimulationSet::Signals,
                    SimulationSet::Lifecycle,
                    SimulationSet::Restart,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (clock::advance_sim_clock, health::bind_health_owners)
                    .chain()
                    .in_set(SimulationSet::Clock),
            )
            .add_systems(
                FixedUpdate,
                health::publish_health_signals.in_set(SimulationSet::Signals),
            )
            .add_systems(
                FixedUpdate,
                lifecycle::despawn_after_timeout.in_set(SimulationSet::Lifecycle),
            )
            .add_systems(
                FixedUpdate,
                level::handle_restart.in_set(SimulationSet::Restart),
            )
            // Подсистемы
            .add_plugins((HeadlessPhysicsPlugin, PlayerPlugin, AIPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается вручную: один `app.update()` = один FixedUpdate tick (60Hz).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )));

    app
}

/// Один simulation tick без wall-clock (тесты)
pub fn step_simulation(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

/// N simulation ticks подряд
pub fn step_simulation_n(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        step_simulation(app);
    }
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия: Debug представление компонентов, отсортированное по Entity)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

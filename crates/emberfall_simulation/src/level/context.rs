//! Simulation context: текущий уровень + restart

use bevy::prelude::*;

use super::blueprint::LevelBlueprint;
use super::spawn::{spawn_level, SpawnedLevel};
use crate::clock::SimClock;
use crate::components::SimulationEntity;
use crate::config::SimulationConfig;
use crate::physics::ActiveOverlaps;

/// Глобальное состояние сессии (замена scene manager'а движка)
#[derive(Resource, Debug, Default)]
pub struct SimulationContext {
    /// Blueprint, из которого пересоздаётся уровень при restart
    pub blueprint: Option<LevelBlueprint>,
    pub restarts: u32,
    pub spawned: SpawnedLevel,
}

/// Event: пересоздать уровень с нуля (после смерти игрока)
#[derive(Event, Debug, Clone, Default)]
pub struct RestartRequested;

/// Загрузить blueprint в мир (сразу, без ожидания tick)
pub fn start_level(world: &mut World, blueprint: LevelBlueprint) -> SpawnedLevel {
    let config = world
        .get_resource::<SimulationConfig>()
        .cloned()
        .unwrap_or_default();

    let spawned = {
        let mut commands = world.commands();
        spawn_level(&mut commands, &blueprint, &config)
    };
    world.flush();

    let mut context = world.get_resource_or_insert_with(SimulationContext::default);
    context.blueprint = Some(blueprint);
    context.spawned = spawned.clone();
    spawned
}

/// Система: RestartRequested → despawn всех SimulationEntity, clock в 0, спавн заново
///
/// Несколько запросов за один tick = один restart.
pub fn handle_restart(
    mut commands: Commands,
    mut restart_events: EventReader<RestartRequested>,
    mut context: ResMut<SimulationContext>,
    mut clock: ResMut<SimClock>,
    mut overlaps: ResMut<ActiveOverlaps>,
    config: Res<SimulationConfig>,
    entities: Query<Entity, With<SimulationEntity>>,
) {
    if restart_events.read().count() == 0 {
        return;
    }

    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
    clock.reset();
    overlaps.clear();

    let spawned = match context.blueprint.as_ref() {
        Some(blueprint) => spawn_level(&mut commands, blueprint, &config),
        None => SpawnedLevel::default(),
    };
    context.spawned = spawned;
    context.restarts += 1;

    crate::log_info(&format!("🔄 Simulation restarted (#{})", context.restarts));
}

//! Spawn helpers: blueprint → entities
//!
//! Каждый actor получает полный набор компонентов, которые читают системы:
//! Transform + KinematicBody + Collider (physics), Health, AnimatorParams, MovementIntent.

use bevy::prelude::*;

use super::blueprint::{AgentBlueprint, HazardBlueprint, LevelBlueprint, PickupBlueprint, PlayerBlueprint};
use crate::ai::Agent;
use crate::combat::Hazard;
use crate::components::{Facing, MovementIntent, Player, SimulationEntity};
use crate::config::SimulationConfig;
use crate::health::Health;
use crate::physics::{Collider, KinematicBody, TriggerZone};
use crate::player::{ManaPool, PlayerActions, PlayerBody, PlayerInput};
use crate::presentation::AnimatorParams;

/// Entities, созданные из blueprint
#[derive(Debug, Clone, Default)]
pub struct SpawnedLevel {
    pub player: Option<Entity>,
    pub agents: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub pickups: Vec<Entity>,
}

fn at(position: [f32; 2]) -> Transform {
    Transform::from_xyz(position[0], position[1], 0.0)
}

/// Spawn helper для игрока
pub fn spawn_player(commands: &mut Commands, blueprint: &PlayerBlueprint) -> Entity {
    let config = blueprint.config.clone();
    let actions = PlayerActions::new(config.mana_regen_interval_secs);
    let mana = ManaPool::new(config.max_mana);

    commands
        .spawn((
            at(blueprint.position),
            Player,
            SimulationEntity,
            Health::new(blueprint.max_health, blueprint.max_armor),
            Facing::Right,
            MovementIntent::default(),
            KinematicBody::default(),
            Collider {
                radius: blueprint.collider_radius,
            },
            AnimatorParams::default(),
        ))
        .insert((
            config,
            PlayerInput::default(),
            PlayerBody::default(),
            actions,
            mana,
            blueprint.windups,
        ))
        .id()
}

/// Spawn helper для агента
pub fn spawn_agent(
    commands: &mut Commands,
    blueprint: &AgentBlueprint,
    config: &SimulationConfig,
) -> Entity {
    let agent = Agent::new(
        blueprint.config.clone(),
        blueprint.waypoints(),
        config.scan_interval_secs,
    );

    commands
        .spawn((
            Name::new(blueprint.name.clone()),
            at(blueprint.position),
            SimulationEntity,
            agent,
            blueprint.variant.clone(),
            Health::new(blueprint.max_health, blueprint.max_armor),
            blueprint.facing,
            MovementIntent::default(),
            KinematicBody::default(),
            Collider {
                radius: blueprint.collider_radius,
            },
            AnimatorParams::default(),
        ))
        .id()
}

pub fn spawn_hazard(commands: &mut Commands, blueprint: &HazardBlueprint) -> Entity {
    commands
        .spawn((
            at(blueprint.position),
            SimulationEntity,
            Hazard::new(blueprint.damage, blueprint.mode),
            TriggerZone {
                radius: blueprint.radius,
            },
        ))
        .id()
}

pub fn spawn_pickup(commands: &mut Commands, blueprint: &PickupBlueprint) -> Entity {
    commands
        .spawn((
            at(blueprint.position),
            SimulationEntity,
            blueprint.pickup.clone(),
            TriggerZone {
                radius: blueprint.radius,
            },
        ))
        .id()
}

/// Весь уровень (порядок спавна = порядок в blueprint)
pub fn spawn_level(
    commands: &mut Commands,
    blueprint: &LevelBlueprint,
    config: &SimulationConfig,
) -> SpawnedLevel {
    let player = blueprint
        .player
        .as_ref()
        .map(|player| spawn_player(commands, player));
    let agents = blueprint
        .agents
        .iter()
        .map(|agent| spawn_agent(commands, agent, config))
        .collect();
    let hazards = blueprint
        .hazards
        .iter()
        .map(|hazard| spawn_hazard(commands, hazard))
        .collect();
    let pickups = blueprint
        .pickups
        .iter()
        .map(|pickup| spawn_pickup(commands, pickup))
        .collect();

    crate::log_info(&format!(
        "🗺️ Level spawned: player={}, agents={}, hazards={}, pickups={}",
        player.is_some(),
        blueprint.agents.len(),
        blueprint.hazards.len(),
        blueprint.pickups.len()
    ));

    SpawnedLevel {
        player,
        agents,
        hazards,
        pickups,
    }
}

//! Level blueprint (RON): игрок, агенты, hazards, pickups

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ai::{AgentConfig, AgentVariant, MeleeAttack};
use crate::combat::{HazardMode, Pickup};
use crate::components::Facing;
use crate::config::ConfigError;
use crate::player::PlayerConfig;
use crate::presentation::ActionWindups;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelBlueprint {
    pub player: Option<PlayerBlueprint>,
    pub agents: Vec<AgentBlueprint>,
    pub hazards: Vec<HazardBlueprint>,
    pub pickups: Vec<PickupBlueprint>,
}

impl LevelBlueprint {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path, source })?;
        Self::from_ron_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerBlueprint {
    pub position: [f32; 2],
    pub max_health: i32,
    pub max_armor: i32,
    pub collider_radius: f32,
    pub config: PlayerConfig,
    pub windups: ActionWindups,
}

impl Default for PlayerBlueprint {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            max_health: 100,
            max_armor: 50,
            collider_radius: 0.4,
            config: PlayerConfig::default(),
            windups: ActionWindups::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentBlueprint {
    pub name: String,
    pub position: [f32; 2],
    pub facing: Facing,
    pub max_health: i32,
    pub max_armor: i32,
    pub collider_radius: f32,
    pub config: AgentConfig,
    pub variant: AgentVariant,
    pub waypoints: Vec<[f32; 2]>,
}

impl Default for AgentBlueprint {
    fn default() -> Self {
        Self {
            name: "Agent".to_string(),
            position: [0.0, 0.0],
            facing: Facing::Right,
            max_health: 40,
            max_armor: 0,
            collider_radius: 0.4,
            config: AgentConfig::default(),
            variant: AgentVariant::Melee(MeleeAttack::default()),
            waypoints: Vec::new(),
        }
    }
}

impl AgentBlueprint {
    pub fn waypoints(&self) -> Vec<Vec2> {
        self.waypoints.iter().copied().map(Vec2::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardBlueprint {
    pub position: [f32; 2],
    pub radius: f32,
    pub damage: i32,
    pub mode: HazardMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupBlueprint {
    pub position: [f32; 2],
    pub radius: f32,
    pub pickup: Pickup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AgentState, MovementType};

    #[test]
    fn test_parse_minimal_level() {
        let level = LevelBlueprint::from_ron_str(
            r#"(
                player: Some((position: (1.0, 0.0))),
                agents: [
                    (
                        name: "Archer",
                        position: (10.0, 0.0),
                        facing: Left,
                        config: (
                            movement_type: Patrol,
                            target_lost_state: Move,
                        ),
                        variant: Ranged(()),
                        waypoints: [(8.0, 0.0), (12.0, 0.0)],
                    ),
                ],
                hazards: [
                    (position: (5.0, 0.0), radius: 0.5, damage: 10, mode: Continuous(damage_cooldown_secs: 0.5)),
                    (position: (7.0, 0.0), radius: 0.5, damage: 40, mode: OneShot),
                ],
                pickups: [
                    (position: (3.0, 0.0), radius: 0.5, pickup: (health: 20, armor: 0, mana: 10)),
                ],
            )"#,
        )
        .unwrap();

        let player = level.player.as_ref().unwrap();
        assert_eq!(player.position, [1.0, 0.0]);
        assert_eq!(player.max_health, 100);

        let archer = &level.agents[0];
        assert_eq!(archer.facing, Facing::Left);
        assert_eq!(archer.config.movement_type, MovementType::Patrol);
        assert_eq!(archer.config.target_lost_state, AgentState::Move);
        assert!(matches!(archer.variant, AgentVariant::Ranged(_)));
        assert_eq!(archer.waypoints(), vec![Vec2::new(8.0, 0.0), Vec2::new(12.0, 0.0)]);

        assert_eq!(level.hazards.len(), 2);
        assert_eq!(level.hazards[1].mode, HazardMode::OneShot);
        assert_eq!(level.pickups[0].pickup.mana, 10);
    }

    #[test]
    fn test_unknown_variant_is_error() {
        let err = LevelBlueprint::from_ron_str("(agents: [(variant: Wizard(()))])").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

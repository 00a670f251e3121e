//! Agent ECS systems: target acquisition, tick, death.

use bevy::prelude::*;

use super::components::Agent;
use super::fsm::run_agent_tick;
use super::variants::{AgentContext, AgentVariant, AttackBehavior, TargetView};
use crate::clock::SimClock;
use crate::combat::actions::LaunchProjectile;
use crate::components::{Facing, MovementIntent, Player};
use crate::config::SimulationConfig;
use crate::health::{EntityDied, Health};
use crate::lifecycle::{Dead, DespawnAfter};
use crate::presentation::{AnimatorParams, DespawnRequest};

/// Система: агенты без цели берут единственного игрока
pub fn acquire_player_target(mut agents: Query<&mut Agent>, players: Query<Entity, With<Player>>) {
    let Ok(player) = players.single() else {
        return;
    };

    for mut agent in agents.iter_mut() {
        if agent.target.is_some() || agent.is_disabled() {
            continue;
        }
        agent.target = Some(player);
        crate::log(&format!("AI: target acquired → {:?}", player));
    }
}

/// Система: один FSM tick каждого агента
///
/// Target lookup через Query::get (O(1)); невалидная ссылка → tick без цели.
/// Агент, убитый раньше в этом же tick (strike, fireball), выключается сразу:
/// EntityDied дойдёт до `handle_agent_death` только в Lifecycle.
pub fn agent_tick(
    clock: Res<SimClock>,
    config: Res<SimulationConfig>,
    mut agents: Query<(
        Entity,
        &Transform,
        &mut Agent,
        &AgentVariant,
        &Health,
        &mut Facing,
        &mut MovementIntent,
        &mut AnimatorParams,
    )>,
    mut targets: Query<(&Transform, &mut Health), (With<Player>, Without<Agent>)>,
    mut launch_events: EventWriter<LaunchProjectile>,
) {
    let now = clock.now();
    let mut launches = Vec::new();

    for (entity, transform, mut agent, variant, own_health, mut facing, mut intent, mut animator) in
        agents.iter_mut()
    {
        if own_health.is_dead() && !agent.is_disabled() {
            agent.disable(&mut animator);
            crate::log(&format!("AI: {:?} died this tick, attack intents cancelled", entity));
        }

        let target = match agent.target {
            Some(target_entity) => match targets.get_mut(target_entity) {
                Ok((target_transform, health)) => Some(TargetView {
                    entity: target_entity,
                    position: target_transform.translation.truncate(),
                    health: health.into_inner(),
                }),
                Err(_) => {
                    crate::log(&format!(
                        "AI: {:?} target {:?} not found, skipping",
                        entity, target_entity
                    ));
                    None
                }
            },
            None => None,
        };

        let mut ctx = AgentContext {
            now,
            entity,
            position: transform.translation.truncate(),
            facing: &mut facing,
            intent: &mut intent,
            animator: &mut animator,
            launches: &mut launches,
            waypoint_epsilon: config.waypoint_epsilon,
        };

        run_agent_tick(&mut agent, variant, &mut ctx, target);
    }

    for launch in launches {
        launch_events.write(launch);
    }
}

/// Система: смерть агента → None state + despawn (ranged сразу, melee после death анимации)
pub fn handle_agent_death(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut died_events: EventReader<EntityDied>,
    mut agents: Query<(&mut Agent, &AgentVariant, &mut MovementIntent, &mut AnimatorParams)>,
    mut despawn_events: EventWriter<DespawnRequest>,
) {
    for event in died_events.read() {
        let Ok((mut agent, variant, mut intent, mut animator)) = agents.get_mut(event.entity) else {
            continue;
        };

        agent.disable(&mut animator);
        intent.stop();
        if let Some(clip) = variant.death_clip() {
            animator.play(clip);
        }

        let linger = variant.corpse_linger_secs();
        commands.entity(event.entity).try_insert((
            Dead,
            DespawnAfter {
                despawn_time: clock.now() + f64::from(linger),
            },
        ));
        despawn_events.write(DespawnRequest {
            entity: event.entity,
            delay_secs: linger,
        });

        crate::log_info(&format!(
            "💀 Agent {:?} disabled, despawn in {:.1}s",
            event.entity, linger
        ));
    }
}

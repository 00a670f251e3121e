//! Player systems: locomotion, действия, animation cues, mana, смерть.

use bevy::prelude::*;

use super::actions::PlayerActions;
use super::components::{ManaPool, PlayerBody, PlayerConfig, PlayerInput};
use crate::ai::Agent;
use crate::clock::SimClock;
use crate::combat::actions::{area_strike, LaunchProjectile};
use crate::components::{Facing, MovementIntent, Player};
use crate::health::{EntityDied, Health, HealthChanged};
use crate::lifecycle::Dead;
use crate::physics::KinematicBody;
use crate::presentation::{AnimationCue, AnimatorParams, CueKind, SpawnKind, StatBarChanged, StatKind};

/// Система: input → MovementIntent (бег, прыжок/двойной прыжок, присед)
///
/// После смерти (`can_move == false`) input обнуляется.
pub fn player_locomotion(
    mut players: Query<
        (
            &PlayerConfig,
            &PlayerActions,
            &mut PlayerInput,
            &mut PlayerBody,
            &KinematicBody,
            &mut Facing,
            &mut MovementIntent,
            &mut AnimatorParams,
        ),
        With<Player>,
    >,
) {
    for (config, actions, mut input, mut body, kinematic, mut facing, mut intent, mut animator) in
        players.iter_mut()
    {
        if !actions.can_move {
            input.clear();
        }
        let grounded = kinematic.grounded;

        // Горизонталь
        let speed_factor = if body.crouching {
            config.crouch_speed_factor
        } else {
            1.0
        };
        if grounded || config.air_control {
            intent.horizontal = config.speed * input.move_axis * speed_factor;
        }
        if let Some(side) = Facing::towards(0.0, input.move_axis) {
            if side != *facing {
                facing.flip();
            }
        }

        // Прыжок (в приседе игнорируется)
        if input.jump && !input.crouch {
            if grounded {
                intent.jump_velocity = Some(config.jump_velocity);
                body.can_double_jump = true;
            } else if body.can_double_jump {
                intent.jump_velocity = Some(config.jump_velocity);
                body.can_double_jump = false;
            }
        }
        input.jump = false;

        // Присед: встать можно только если над головой свободно
        if input.crouch {
            body.crouching = true;
        } else if body.ceiling_clear {
            body.crouching = false;
        }

        animator.set_bool("Jump", !grounded);
        animator.set_bool("Crouch", body.crouching);
        animator.set_bool("Hurt", false);
    }
}

/// Система: удерживаемые strike/cast кнопки → старт действий
pub fn player_start_actions(
    clock: Res<SimClock>,
    mut players: Query<
        (
            &PlayerConfig,
            &PlayerInput,
            &KinematicBody,
            &mut PlayerActions,
            &mut ManaPool,
            &mut AnimatorParams,
        ),
        With<Player>,
    >,
) {
    let now = clock.now();

    for (config, input, kinematic, mut actions, mut mana, mut animator) in players.iter_mut() {
        if !actions.can_move {
            continue;
        }

        if input.strike && actions.try_start_strike(now, kinematic.grounded, &mut animator) {
            crate::log("🗡️ Player strike started");
        }

        if input.cast {
            let stationary = kinematic.velocity == Vec2::ZERO;
            if actions.try_start_cast(
                now,
                kinematic.grounded,
                stationary,
                config.cast_cost,
                &mut mana,
                &mut animator,
            ) {
                crate::log(&format!("🔮 Player cast started (mana left {})", mana.current()));
            }
        }
    }
}

/// Система: AnimationCue → strike hit / fireball / конец действий
///
/// Cue неактивного действия игнорируется.
pub fn resolve_player_cues(
    clock: Res<SimClock>,
    mut cue_events: EventReader<AnimationCue>,
    mut players: Query<
        (
            &PlayerConfig,
            &Transform,
            &Facing,
            &mut PlayerActions,
            &mut AnimatorParams,
        ),
        With<Player>,
    >,
    mut agents: Query<(Entity, &Transform, &mut Health), (With<Agent>, Without<Player>, Without<Dead>)>,
    mut launch_events: EventWriter<LaunchProjectile>,
) {
    let now = clock.now();

    for event in cue_events.read() {
        let Ok((config, transform, facing, mut actions, mut animator)) = players.get_mut(event.entity)
        else {
            crate::log(&format!("Cue {:?} for unknown player {:?}", event.cue, event.entity));
            continue;
        };
        let position = transform.translation.truncate();

        match event.cue {
            CueKind::StrikeHit if actions.strike.is_active() => {
                let strike_point = position + facing.mirror(Vec2::from(config.strike_point));
                let candidates = agents
                    .iter_mut()
                    .map(|(entity, transform, health)| (entity, transform.translation.truncate(), health));
                let hits = area_strike(strike_point, config.strike_range, config.strike_damage, candidates);
                crate::log(&format!("🗡️ Player strike hit {} agents", hits.len()));
            }
            CueKind::StrikeEnd if actions.strike.is_active() => {
                actions.end_strike(now, config.strike_cooldown_secs, &mut animator);
            }
            CueKind::CastRelease if actions.cast.is_active() => {
                launch_events.write(LaunchProjectile {
                    owner: event.entity,
                    kind: SpawnKind::Fireball,
                    spec: config.fireball,
                    position: position + facing.mirror(Vec2::from(config.fire_point)),
                    facing: *facing,
                });
            }
            CueKind::CastEnd if actions.cast.is_active() => {
                actions.end_cast(now, config.cast_cooldown_secs, &mut animator);
            }
            _ => {}
        }
    }
}

/// Система: периодическая регенерация mana (первый тик сразу, стоп навсегда после смерти)
pub fn regenerate_mana(
    clock: Res<SimClock>,
    mut players: Query<(&PlayerConfig, &mut PlayerActions, &mut ManaPool, &Health)>,
) {
    let now = clock.now();

    for (config, mut actions, mut mana, health) in players.iter_mut() {
        if actions.regen_stopped || health.is_dead() {
            actions.regen_task.stop();
            continue;
        }

        actions.regen_task.start(now);
        if actions.regen_task.poll(now) {
            mana.change(config.mana_regen_amount);
        }
    }
}

/// Система: ManaPool → StatBarChanged (только после реального изменения)
pub fn publish_mana_bars(
    mut pools: Query<(Entity, &mut ManaPool)>,
    mut bar_events: EventWriter<StatBarChanged>,
) {
    for (entity, mut mana) in pools.iter_mut() {
        if !mana.is_dirty() {
            continue;
        }
        if let Some((current, max)) = mana.take_bar_update() {
            bar_events.write(StatBarChanged {
                entity,
                stat: StatKind::Mana,
                current,
                max,
            });
        }
    }
}

/// Система: урон игроку → "Hurt" флаг (сбрасывается следующим locomotion tick)
pub fn flag_player_hurt(
    mut health_events: EventReader<HealthChanged>,
    mut players: Query<&mut AnimatorParams, (With<Player>, Without<Dead>)>,
) {
    for event in health_events.read() {
        if event.delta >= 0 || event.health <= 0 {
            continue;
        }
        if let Ok(mut animator) = players.get_mut(event.entity) {
            animator.set_bool("Hurt", true);
        }
    }
}

/// Система: смерть игрока → input off, ignore_hurt, действия прерваны, regen стоп, "Death"
pub fn handle_player_death(
    mut commands: Commands,
    mut died_events: EventReader<EntityDied>,
    mut players: Query<
        (
            &mut PlayerActions,
            &mut PlayerInput,
            &mut Health,
            &mut MovementIntent,
            &mut AnimatorParams,
        ),
        With<Player>,
    >,
) {
    for event in died_events.read() {
        let Ok((mut actions, mut input, mut health, mut intent, mut animator)) =
            players.get_mut(event.entity)
        else {
            continue;
        };

        actions.can_move = false;
        actions.cancel_all(&mut animator);
        actions.regen_stopped = true;
        actions.regen_task.stop();
        input.clear();
        intent.stop();
        health.ignore_hurt = true;
        animator.play("Death");

        commands.entity(event.entity).try_insert(Dead);
        crate::log_info(&format!("💀 Player {:?} died, input disabled", event.entity));
    }
}

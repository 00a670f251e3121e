//! Pickups: одноразовые бонусы health/armor/mana

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::health::Health;
use crate::physics::OverlapEvent;
use crate::player::ManaPool;
use crate::presentation::DespawnRequest;

/// Бонус на уровне; нулевые модификаторы не применяются
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub health: i32,
    pub armor: i32,
    pub mana: i32,
    #[serde(skip)]
    used: bool,
}

impl Pickup {
    pub fn new(health: i32, armor: i32, mana: i32) -> Self {
        Self {
            health,
            armor,
            mana,
            used: false,
        }
    }

    pub fn is_used(&self) -> bool {
        self.used
    }
}

/// Система: первый overlap → модификаторы → despawn
pub fn collect_pickups(
    mut commands: Commands,
    mut overlap_events: EventReader<OverlapEvent>,
    mut pickups: Query<&mut Pickup>,
    mut healths: Query<&mut Health>,
    mut mana_pools: Query<&mut ManaPool>,
    mut despawn_events: EventWriter<DespawnRequest>,
) {
    for event in overlap_events.read() {
        let OverlapEvent::Started { zone, other } = *event else {
            continue;
        };
        let Ok(mut pickup) = pickups.get_mut(zone) else {
            continue;
        };
        if pickup.used {
            continue;
        }

        if let Ok(mut health) = healths.get_mut(other) {
            if pickup.health != 0 {
                health.affect_health(pickup.health);
            }
            if pickup.armor != 0 {
                health.affect_armor(pickup.armor);
            }
        }
        if let Ok(mut mana) = mana_pools.get_mut(other) {
            if pickup.mana != 0 {
                mana.change(pickup.mana);
            }
        }

        pickup.used = true;
        commands.entity(zone).despawn();
        despawn_events.write(DespawnRequest {
            entity: zone,
            delay_secs: 0.0,
        });
        crate::log(&format!("🎁 Pickup {:?} collected by {:?}", zone, other));
    }
}

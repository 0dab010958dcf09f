//! Применение урона и уничтожение участников
//!
//! Урон вычитается целиком (нет брони/митигации).
//! health ≤ 0 → destroy (ровно один раз), иначе сигнал HealthChanged для health label.

use bevy::prelude::*;

use crate::components::{Combatant, CombatantKind, Destroyed, Faction, Health, LanePosition};
use crate::logger;
use crate::registry::{is_active, MatchState};

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: i32,
    pub remaining_health: i32,
    pub target_destroyed: bool,
}

/// Сигнал presentation слою: обновить отображаемое здоровье
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: i32,
}

/// Событие: участник уничтожен (presentation освобождает спрайт и label)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDestroyed {
    pub entity: Entity,
    pub faction: Faction,
    pub kind: CombatantKind,
    pub position: Vec2,
}

/// Событие: башня пала, матч окончен
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TowerDestroyed {
    pub tower: Entity,
    pub faction: Faction,
    pub winner: Faction,
}

/// Один удар `attacker` по `target`
///
/// Неактивная (или уже удалённая) цель: no-op, возвращает None.
pub fn apply_attack(
    world: &mut World,
    attacker: Entity,
    target: Entity,
    amount: i32,
) -> Option<DamageDealt> {
    if !is_active(world, target) {
        return None;
    }

    let kind = world.get::<Combatant>(target)?.kind;
    let remaining = {
        let mut health = world.get_mut::<Health>(target)?;
        health.take_damage(amount);
        health.current
    };

    if kind == CombatantKind::Tower {
        logger::log_info(&format!(
            "Tower takes {} damage, remaining health: {}",
            amount, remaining
        ));
    }

    let target_destroyed = remaining <= 0;
    if target_destroyed {
        destroy(world, target);
    } else {
        world.send_event(HealthChanged {
            entity: target,
            current: remaining,
        });
    }

    let dealt = DamageDealt {
        attacker,
        target,
        damage: amount,
        remaining_health: remaining,
        target_destroyed,
    };
    world.send_event(dealt.clone());

    Some(dealt)
}

/// Уничтожить участника (idempotent)
///
/// Повторный вызов на уже уничтоженном: no-op, возвращает false.
/// Из Registry entity удаляется позже, при compaction в конце тика.
pub fn destroy(world: &mut World, entity: Entity) -> bool {
    let Some(combatant) = world.get::<Combatant>(entity).copied() else {
        return false;
    };
    if world.get::<Destroyed>(entity).is_some() {
        return false;
    }

    let position = world
        .get::<LanePosition>(entity)
        .map(|p| p.0)
        .unwrap_or_default();

    world.entity_mut(entity).insert(Destroyed);

    world.send_event(EntityDestroyed {
        entity,
        faction: combatant.faction,
        kind: combatant.kind,
        position,
    });

    match combatant.kind {
        CombatantKind::Unit => {
            logger::log_info(&format!("{} unit destroyed!", combatant.faction.as_str()));
        }
        CombatantKind::Tower => {
            logger::log_info("Tower destroyed! Game Over.");

            let winner = combatant.faction.opponent();
            {
                let mut state = world.resource_mut::<MatchState>();
                if *state == MatchState::InProgress {
                    *state = MatchState::Finished { winner };
                }
            }

            world.send_event(TowerDestroyed {
                tower: entity,
                faction: combatant.faction,
                winner,
            });
        }
    }

    true
}

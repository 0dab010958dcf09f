//! Snapshot состояния боя (serde)
//!
//! Порядок = порядок Registry, поэтому одинаковый seed даёт побайтно
//! одинаковый snapshot.

use bevy::prelude::*;
use serde::Serialize;

use crate::components::{Combatant, CombatantKind, Faction, Health, LanePosition, UnitProfile};
use crate::registry::{is_active, MatchState, Registry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantSnapshot {
    pub index: u32,
    pub kind: CombatantKind,
    pub faction: Faction,
    pub type_id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSnapshot {
    pub match_state: MatchState,
    pub combatants: Vec<CombatantSnapshot>,
}

pub fn battle_snapshot(world: &World) -> BattleSnapshot {
    let combatants = world
        .resource::<Registry>()
        .entities()
        .iter()
        .filter_map(|&entity| {
            let combatant = world.get::<Combatant>(entity)?;
            let position = world.get::<LanePosition>(entity)?;
            let health = world.get::<Health>(entity)?;
            Some(CombatantSnapshot {
                index: entity.index(),
                kind: combatant.kind,
                faction: combatant.faction,
                type_id: world.get::<UnitProfile>(entity).map(|p| p.type_id.clone()),
                x: position.0.x,
                y: position.0.y,
                health: health.current,
                active: is_active(world, entity),
            })
        })
        .collect();

    BattleSnapshot {
        match_state: *world.resource::<MatchState>(),
        combatants,
    }
}

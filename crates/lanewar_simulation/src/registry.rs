//! Registry: упорядоченный список живых участников матча
//!
//! Порядок вставки = порядок update в тике.
//! Удаление отложено до конца тика (compaction), чтобы итерация была стабильной.

use bevy::prelude::*;
use serde::Serialize;

use crate::components::{Combatant, CombatantKind, Destroyed, Faction};

#[derive(Resource, Debug, Clone, Default)]
pub struct Registry {
    order: Vec<Entity>,
}

impl Registry {
    pub fn push(&mut self, entity: Entity) {
        self.order.push(entity);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.order.contains(&entity)
    }
}

/// Башни фракций (создаются один раз за матч)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ObjectiveTowers {
    pub ally: Option<Entity>,
    pub enemy: Option<Entity>,
}

impl ObjectiveTowers {
    pub fn tower_of(&self, faction: Faction) -> Option<Entity> {
        match faction {
            Faction::Ally => self.ally,
            Faction::Enemy => self.enemy,
        }
    }

    /// Цель наступления: башня противника
    pub fn objective_for(&self, faction: Faction) -> Option<Entity> {
        self.tower_of(faction.opponent())
    }
}

/// Терминальное состояние матча
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MatchState {
    #[default]
    InProgress,
    Finished { winner: Faction },
}

impl MatchState {
    pub fn is_finished(&self) -> bool {
        matches!(self, MatchState::Finished { .. })
    }
}

/// Участник существует и не уничтожен
pub fn is_active(world: &World, entity: Entity) -> bool {
    world.get::<Combatant>(entity).is_some() && world.get::<Destroyed>(entity).is_none()
}

/// Удалить из Registry все неактивные entity и despawn'ить их
///
/// Вызывается строго после update всех участников тика.
pub fn compact(world: &mut World) -> Vec<Entity> {
    let order = world.resource::<Registry>().order.clone();
    let (alive, removed): (Vec<Entity>, Vec<Entity>) =
        order.into_iter().partition(|&entity| is_active(world, entity));

    for &entity in &removed {
        world.despawn(entity);
    }

    world.resource_mut::<Registry>().order = alive;
    removed
}

/// Активные участники фракции (в порядке Registry)
pub fn query_by_faction(world: &World, faction: Faction, kind: Option<CombatantKind>) -> Vec<Entity> {
    world
        .resource::<Registry>()
        .entities()
        .iter()
        .copied()
        .filter(|&entity| is_active(world, entity))
        .filter(|&entity| {
            world.get::<Combatant>(entity).is_some_and(|c| {
                c.faction == faction && kind.map_or(true, |k| c.kind == k)
            })
        })
        .collect()
}

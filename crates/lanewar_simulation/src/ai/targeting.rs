//! Сканы окружения юнита (чистые функции над снимком Registry)
//!
//! - scan_opponents: stop range + список целей (юниты противника + башня-цель)
//! - stack_rank: ранг среди перекрывающихся юнитов своей группы (display only)
//! - is_blocked: коллизия с юнитом своей фракции из другой группы

use bevy::prelude::*;

use crate::combat::Attacker;
use crate::components::{CombatantKind, Faction};

/// Снимок участника на момент скана
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub entity: Entity,
    pub faction: Faction,
    pub kind: CombatantKind,
    pub position: Vec2,
    /// Group key (image key), у башен None
    pub group: Option<String>,
    pub active: bool,
}

impl CombatantView {
    fn is_active_unit(&self) -> bool {
        self.active && self.kind == CombatantKind::Unit
    }
}

/// Результат скана противников
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementScan {
    /// Хотя бы один противник ближе stop_distance
    pub in_stop_range: bool,
    /// Все противники ближе attack_range (порядок Registry, башня последней)
    pub targets: Vec<Entity>,
}

impl EngagementScan {
    fn check(&mut self, attacker: &Attacker, from: Vec2, other: &CombatantView) {
        let distance = from.distance(other.position);
        if distance < attacker.stop_distance {
            self.in_stop_range = true;
        }
        if distance < attacker.attack_range {
            self.targets.push(other.entity);
        }
    }
}

/// Шаги 1-2: юниты противника, затем башня-цель
///
/// stop_distance и attack_range проверяются независимо: цель может быть
/// в attack range без остановки юнита и наоборот.
pub fn scan_opponents(
    me: &CombatantView,
    attacker: &Attacker,
    others: &[CombatantView],
    objective_tower: Option<&CombatantView>,
) -> EngagementScan {
    let mut scan = EngagementScan::default();

    for other in others {
        if other.entity == me.entity || !other.is_active_unit() || other.faction == me.faction {
            continue;
        }
        scan.check(attacker, me.position, other);
    }

    if let Some(tower) = objective_tower {
        if tower.active && tower.faction != me.faction {
            scan.check(attacker, me.position, tower);
        }
    }

    scan
}

/// Шаг 3: ранг слева направо среди активных юнитов своей фракции и группы
/// с |Δx| < threshold (включая себя). Равные x: по порядку Registry.
pub fn stack_rank(me: &CombatantView, others: &[CombatantView], threshold: f32) -> usize {
    let mut stack: Vec<&CombatantView> = others
        .iter()
        .filter(|other| {
            other.is_active_unit()
                && other.faction == me.faction
                && other.group == me.group
                && (other.position.x - me.position.x).abs() < threshold
        })
        .collect();

    // sort_by стабильный → ties остаются в порядке Registry
    stack.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));

    stack
        .iter()
        .position(|other| other.entity == me.entity)
        .unwrap_or(0)
}

/// Шаг 4: юнит своей фракции из другой группы ближе threshold по X
pub fn is_blocked(me: &CombatantView, others: &[CombatantView], threshold: f32) -> bool {
    others.iter().any(|other| {
        other.entity != me.entity
            && other.is_active_unit()
            && other.faction == me.faction
            && other.group != me.group
            && (other.position.x - me.position.x).abs() < threshold
    })
}

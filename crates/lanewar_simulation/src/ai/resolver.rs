//! Targeting & Movement resolver: per-tick поведение юнитов
//!
//! Порядок для каждого юнита (строго):
//! 1. scan противников (stop range + цели)
//! 2. башня-цель (union со сканом)
//! 3. stack rank (display only)
//! 4. коллизия с другой группой своей фракции
//! 5. решение: бой / движение / стоим
//!
//! Юниты обновляются последовательно в порядке Registry: изменения,
//! сделанные ранними юнитами (позиция, смерть), видны поздним в том же тике.
//! Снимок views строится раз за тик и правится по месту после каждого юнита.
//! Состав Registry фиксирован на время тика, compaction: в конце.

use bevy::prelude::*;

use crate::ai::targeting::{is_blocked, scan_opponents, stack_rank, CombatantView};
use crate::combat::{apply_attack, Attacker, DamageDealt};
use crate::components::{
    display_intent, Combatant, CombatantKind, DisplayIntent, LanePosition, Marcher, UnitProfile,
};
use crate::config::LaneConfig;
use crate::registry::{compact, is_active, MatchState, ObjectiveTowers, Registry};

/// Решение юнита на тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitAction {
    /// В бою, cooldown истёк → удар по всем целям
    Strike,
    /// В бою, cooldown копится
    Engage,
    /// Движение на dx
    Advance(f32),
    /// Заблокирован своей фракцией, стоим
    Hold,
}

/// Шаг 5: чистое решение по результатам сканов
///
/// Cooldown копится только в бою; движение и блокировка его сбрасывают.
pub fn decide(
    attacker: &mut Attacker,
    marcher: &Marcher,
    in_stop_range: bool,
    blocked: bool,
    delta: f32,
) -> UnitAction {
    if in_stop_range {
        if attacker.accumulate(delta) {
            UnitAction::Strike
        } else {
            UnitAction::Engage
        }
    } else {
        attacker.reset_cooldown();
        if blocked {
            UnitAction::Hold
        } else {
            UnitAction::Advance(marcher.displacement(delta))
        }
    }
}

/// Итог одного тика
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub strikes: Vec<DamageDealt>,
    /// Entity удалённые из Registry при compaction
    pub removed: Vec<Entity>,
}

/// Один тик симуляции: update всех участников в порядке Registry, затем compaction
///
/// После окончания матча: no-op.
pub fn advance_battle(world: &mut World, delta: f32) -> TickReport {
    let mut report = TickReport::default();

    if world.resource::<MatchState>().is_finished() {
        return report;
    }

    let delta = delta.max(0.0);
    let order = world.resource::<Registry>().entities().to_vec();
    let mut views = snapshot_views(world);

    for entity in order {
        let Some(combatant) = world.get::<Combatant>(entity).copied() else {
            continue;
        };
        match combatant.kind {
            CombatantKind::Unit => {
                report
                    .strikes
                    .extend(resolve_unit(world, &mut views, entity, delta));
            }
            // Башня неподвижна, её отрисовку ведёт presentation
            CombatantKind::Tower => {}
        }
    }

    report.removed = compact(world);
    report
}

/// Снимок всех участников Registry (текущее состояние)
pub fn snapshot_views(world: &World) -> Vec<CombatantView> {
    world
        .resource::<Registry>()
        .entities()
        .iter()
        .filter_map(|&entity| {
            let combatant = world.get::<Combatant>(entity)?;
            let position = world.get::<LanePosition>(entity)?;
            Some(CombatantView {
                entity,
                faction: combatant.faction,
                kind: combatant.kind,
                position: position.0,
                group: world.get::<UnitProfile>(entity).map(|p| p.group.clone()),
                active: is_active(world, entity),
            })
        })
        .collect()
}

fn resolve_unit(
    world: &mut World,
    views: &mut [CombatantView],
    entity: Entity,
    delta: f32,
) -> Vec<DamageDealt> {
    let mut strikes = Vec::new();

    if !is_active(world, entity) {
        return strikes;
    }
    let (Some(mut attacker), Some(marcher)) = (
        world.get::<Attacker>(entity).copied(),
        world.get::<Marcher>(entity).copied(),
    ) else {
        return strikes;
    };
    let Some(me_index) = views.iter().position(|view| view.entity == entity) else {
        return strikes;
    };

    let (stack_threshold, collision_threshold, label_offset, label_step) = {
        let config = world.resource::<LaneConfig>();
        (
            config.stack_threshold,
            config.collision_threshold,
            config.health_label_offset,
            config.stack_label_step,
        )
    };

    let (scan, rank, blocked) = {
        let all: &[CombatantView] = views;
        let me = &all[me_index];
        let objective = world
            .resource::<ObjectiveTowers>()
            .objective_for(me.faction)
            .and_then(|tower| all.iter().find(|view| view.entity == tower));

        (
            scan_opponents(me, &attacker, all, objective),
            stack_rank(me, all, stack_threshold),
            is_blocked(me, all, collision_threshold),
        )
    };

    match decide(&mut attacker, &marcher, scan.in_stop_range, blocked, delta) {
        UnitAction::Strike => {
            // Одновременная атака по всем целям (без single-target эксклюзивности)
            for &target in &scan.targets {
                let Some(dealt) = apply_attack(world, entity, target, attacker.attack) else {
                    continue;
                };
                if dealt.target_destroyed {
                    if let Some(view) = views.iter_mut().find(|view| view.entity == target) {
                        view.active = false;
                    }
                }
                strikes.push(dealt);
            }
        }
        UnitAction::Advance(dx) => {
            if let Some(mut position) = world.get_mut::<LanePosition>(entity) {
                position.0.x += dx;
                views[me_index].position = position.0;
            }
        }
        UnitAction::Engage | UnitAction::Hold => {}
    }

    if let Some(mut stored) = world.get_mut::<Attacker>(entity) {
        *stored = attacker;
    }
    if let Some(mut intent) = world.get_mut::<DisplayIntent>(entity) {
        *intent = display_intent(scan.in_stop_range, rank, label_offset, label_step);
    }

    strikes
}

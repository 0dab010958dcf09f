//! AI module: автономное поведение юнитов на линии
//!
//! Нет FSM состояний между тиками: каждое решение выводится заново из
//! сканов Registry (плюс накопитель cooldown в Attacker).

pub mod resolver;
pub mod targeting;


pub use resolver::{advance_battle, decide, snapshot_views, TickReport, UnitAction};
pub use targeting::{is_blocked, scan_opponents, stack_rank, CombatantView, EngagementScan};

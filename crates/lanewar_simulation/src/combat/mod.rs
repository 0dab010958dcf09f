//! Combat module
//!
//! ECS ответственность:
//! - Game state: Health, Attacker (cooldown накопитель)
//! - Combat rules: полный урон без митигации, idempotent destroy
//! - Events: DamageDealt, HealthChanged, EntityDestroyed, TowerDestroyed
//!
//! Presentation ответственность:
//! - спрайты, анимации, health label (по событиям и DisplayIntent)

pub mod attacker;
pub mod damage;


pub use attacker::Attacker;
pub use damage::{apply_attack, destroy, DamageDealt, EntityDestroyed, HealthChanged, TowerDestroyed};

//! Headless матч lanewar
//!
//! Гоняет Battlefield без рендера: враг спавнится по таймеру,
//! ally: по очереди из команд каталога (как нажатия кнопок).

use std::error::Error;
use std::time::Duration;

use lanewar_simulation::logger::{self, LogLevel};
use lanewar_simulation::{Battlefield, Faction, LaneConfig, MatchState};

/// ~60 FPS кадр хоста
const FRAME: Duration = Duration::from_millis(16);
const MAX_STEPS: usize = 60_000;
/// Кадров между "нажатиями" кнопок спавна
const ALLY_SPAWN_EVERY: usize = 150;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init_logger();
    logger::set_log_level(LogLevel::Info);

    let seed = 42;
    println!("Starting lanewar headless match (seed: {})", seed);

    let mut field = Battlefield::new(LaneConfig::default(), seed)?;
    let commands = field.spawn_commands();

    for step in 0..MAX_STEPS {
        if step % ALLY_SPAWN_EVERY == 0 && !commands.is_empty() {
            let type_id = &commands[(step / ALLY_SPAWN_EVERY) % commands.len()];
            if let Err(err) = field.spawn_ally(type_id) {
                logger::log_warning(&format!("spawn {} failed: {}", type_id, err));
            }
        }

        field.step(FRAME);

        if step % 100 == 0 {
            println!(
                "Step {}: {} allies, {} enemies",
                step,
                field.units_of(Faction::Ally).len(),
                field.units_of(Faction::Enemy).len()
            );
        }

        if let MatchState::Finished { winner } = field.match_state() {
            println!("Match finished at step {}: {} wins", step, winner.as_str());
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&field.snapshot())?);
    Ok(())
}

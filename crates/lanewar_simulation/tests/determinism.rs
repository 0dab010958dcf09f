//! Тесты детерминизма
//!
//! Проверяем что матч с одинаковым seed даёт идентичные результаты:
//! последовательность вражеских типов, позиции, здоровье, исход.

use std::time::Duration;

use lanewar_simulation::*;

/// Прогоняет headless матч и возвращает JSON snapshot
fn run_match(seed: u64, steps: usize) -> String {
    let mut field = Battlefield::new(LaneConfig::default(), seed).unwrap();
    let commands = field.spawn_commands();

    for step in 0..steps {
        if step % 150 == 0 {
            let _ = field.spawn_ally(&commands[(step / 150) % commands.len()]);
        }
        field.step(Duration::from_millis(16));
        if field.match_state().is_finished() {
            break;
        }
    }

    serde_json::to_string(&field.snapshot()).unwrap()
}

/// Типы первых `count` вражеских юнитов
fn enemy_types(seed: u64, count: usize) -> Vec<String> {
    let mut field = Battlefield::new(LaneConfig::default(), seed).unwrap();
    (0..count)
        .map(|_| {
            let entity = field.spawn_random_enemy().unwrap();
            field
                .world()
                .get::<UnitProfile>(entity)
                .unwrap()
                .type_id
                .clone()
        })
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const STEPS: usize = 5000;

    let snapshot1 = run_match(SEED, STEPS);
    let snapshot2 = run_match(SEED, STEPS);

    assert_eq!(
        snapshot1, snapshot2,
        "Матч с одинаковым seed ({}) дал разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const STEPS: usize = 3000;

    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_match(SEED, STEPS)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_enemy_type_sequence_is_seeded() {
    let first = enemy_types(7, 32);
    assert_eq!(first, enemy_types(7, 32));

    let catalog = LaneConfig::default().catalog;
    assert!(first.iter().all(|id| catalog.get(id).is_some()));
}

//! End-to-end scenarios against the public engine API.
//!
//! These follow the save-file contract: for a given (task id, task
//! list, snapshot, timestamp) the engine must produce the exact numbers
//! a session controller would persist and a test bench would replay.

use chorequest::{
    process_task_completion, AchievementId, ComboState, DifficultyRank, ProgressionSnapshot, Task,
};

fn b_task(id: &str, base_xp: u64) -> Task {
    Task::new(id, DifficultyRank::B, base_xp)
}

// ---------------------------------------------------------------------------
// Scenario A: first completion from a fresh snapshot
// ---------------------------------------------------------------------------
#[test]
fn scenario_a_first_completion() {
    let tasks = vec![b_task("t1", 100)];
    let state = ProgressionSnapshot::initial();

    let r = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();

    assert_eq!(r.xp_gained, 100);
    assert_eq!(r.state.current_xp, 100);
    assert!(!r.leveled_up);
    assert!(!r.combo_triggered);
    let ids: Vec<_> = r.achievements_unlocked.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![AchievementId::FirstBlood]);
    assert_eq!(r.achievements_unlocked[0].unlocked_at, 1000);
}

// ---------------------------------------------------------------------------
// Scenario B: second completion 5s later chains the combo
// ---------------------------------------------------------------------------
#[test]
fn scenario_b_combo_chain() {
    let tasks = vec![b_task("t1", 100), b_task("t2", 100)];
    let state = ProgressionSnapshot::initial();

    let a = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();
    let b = process_task_completion("t2", &a.tasks, &a.state, Some(6000)).unwrap();

    assert_eq!(b.state.combo.count, 2);
    assert!((b.state.combo.multiplier - 1.2).abs() < 1e-9);
    assert_eq!(b.xp_gained, 120);
    assert!(b.combo_triggered);
    assert_eq!(b.state.current_xp, 220);
}

// ---------------------------------------------------------------------------
// Scenario C: 34s gap resets the chain
// ---------------------------------------------------------------------------
#[test]
fn scenario_c_combo_reset_outside_window() {
    let tasks = vec![b_task("t1", 100), b_task("t2", 100), b_task("t3", 100)];
    let state = ProgressionSnapshot::initial();

    let a = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();
    let b = process_task_completion("t2", &a.tasks, &a.state, Some(6000)).unwrap();
    let c = process_task_completion("t3", &b.tasks, &b.state, Some(40_000)).unwrap();

    assert_eq!(c.state.combo.count, 1);
    assert_eq!(c.state.combo.multiplier, 1.0);
    assert!(!c.combo_triggered);
}

// ---------------------------------------------------------------------------
// Scenario D: overflow folds into a level-up
// ---------------------------------------------------------------------------
#[test]
fn scenario_d_level_up() {
    let tasks = vec![b_task("t1", 100)];
    let mut state = ProgressionSnapshot::initial();
    state.current_xp = 950;
    state.completed_tasks = 5; // not the first task

    let r = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();

    assert!(r.leveled_up);
    assert_eq!(r.state.level, 2);
    assert_eq!(r.state.current_xp, 50);
    assert_eq!(r.state.xp_for_next_level, 1500);
}

// ---------------------------------------------------------------------------
// Scenario E: S-rank unlocks LEGENDARY without VETERAN below level 3
// ---------------------------------------------------------------------------
#[test]
fn scenario_e_legendary_without_veteran() {
    let tasks = vec![Task::new("boss", DifficultyRank::S, 400)];
    let mut state = ProgressionSnapshot::initial();
    state.completed_tasks = 2; // not the first task, so FIRST_BLOOD stays locked

    let r = process_task_completion("boss", &tasks, &state, Some(1000)).unwrap();

    let ids: Vec<_> = r.achievements_unlocked.iter().map(|a| a.id).collect();
    assert!(ids.contains(&AchievementId::Legendary));
    assert!(!ids.contains(&AchievementId::Veteran));
    assert!(r.state.level < 3);
}

// ---------------------------------------------------------------------------
// Scenario F: unknown id is a no-op with untouched inputs
// ---------------------------------------------------------------------------
#[test]
fn scenario_f_unknown_task_noop() {
    let tasks = vec![b_task("t1", 100)];
    let state = ProgressionSnapshot::initial();
    let tasks_before = tasks.clone();

    assert!(process_task_completion("ghost", &tasks, &state, Some(1000)).is_none());
    assert_eq!(tasks, tasks_before);
}

// ---------------------------------------------------------------------------
// Property: XP bounds hold for every reachable snapshot
// ---------------------------------------------------------------------------
#[test]
fn xp_always_below_threshold() {
    let tasks: Vec<Task> = (0..30).map(|i| b_task(&format!("t{i}"), 700)).collect();
    let mut state = ProgressionSnapshot::initial();
    let mut list = tasks;
    let mut ts = 1000i64;

    for i in 0..30 {
        ts += 4000; // always inside the combo window, multiplier keeps growing
        let r = process_task_completion(&format!("t{i}"), &list, &state, Some(ts)).unwrap();
        assert!(r.state.current_xp < r.state.xp_for_next_level);
        assert!(r.state.level >= state.level);
        assert!(r.state.xp_for_next_level >= state.xp_for_next_level);
        assert_eq!(r.state.completed_tasks, state.completed_tasks + 1);
        list = r.tasks;
        state = r.state;
    }
}

// ---------------------------------------------------------------------------
// Property: second submission of the same id is a no-op
// ---------------------------------------------------------------------------
#[test]
fn noop_is_idempotent() {
    let tasks = vec![b_task("t1", 100)];
    let state = ProgressionSnapshot::initial();

    let r = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();
    assert!(process_task_completion("t1", &r.tasks, &r.state, Some(2000)).is_none());
}

// ---------------------------------------------------------------------------
// Property: identical inputs, identical outputs
// ---------------------------------------------------------------------------
#[test]
fn deterministic_for_fixed_timestamp() {
    let tasks = vec![b_task("t1", 100), Task::new("t2", DifficultyRank::S, 400)];
    let mut state = ProgressionSnapshot::initial();
    state.combo = ComboState {
        count: 2,
        multiplier: 1.2,
        last_completion_ts: 90_000,
    };
    state.completed_tasks = 2;

    let a = process_task_completion("t2", &tasks, &state, Some(100_000)).unwrap();
    let b = process_task_completion("t2", &tasks, &state, Some(100_000)).unwrap();

    assert_eq!(a.state, b.state);
    assert_eq!(a.tasks, b.tasks);
    assert_eq!(a.xp_gained, b.xp_gained);
    assert_eq!(a.state.state_hash(), b.state.state_hash());
}

// ---------------------------------------------------------------------------
// Property: the achievement set only grows, entries never change
// ---------------------------------------------------------------------------
#[test]
fn achievement_set_is_append_only() {
    let tasks: Vec<Task> = (0..6)
        .map(|i| Task::new(format!("t{i}"), DifficultyRank::S, 900))
        .collect();
    let mut state = ProgressionSnapshot::initial();
    let mut list = tasks;
    let mut ts = 1000i64;

    for i in 0..6 {
        ts += 2000;
        let before = state.achievements.clone();
        let r = process_task_completion(&format!("t{i}"), &list, &state, Some(ts)).unwrap();

        // Prefix preserved verbatim
        assert_eq!(&r.state.achievements[..before.len()], &before[..]);
        // Delta list equals the new suffix
        assert_eq!(
            &r.state.achievements[before.len()..],
            &r.achievements_unlocked[..]
        );
        // No duplicate ids
        for (i, a) in r.state.achievements.iter().enumerate() {
            assert!(!r.state.achievements[..i].iter().any(|b| b.id == a.id));
        }

        list = r.tasks;
        state = r.state;
    }

    // This workload hits every rule: first task, chains, S-rank, level 3+
    assert_eq!(state.achievements.len(), 4);
}

// ---------------------------------------------------------------------------
// Combo count resets to 1, not 0
// ---------------------------------------------------------------------------
#[test]
fn combo_resets_to_one() {
    let tasks = vec![b_task("t1", 100)];
    let state = ProgressionSnapshot::initial();

    let r = process_task_completion("t1", &tasks, &state, Some(1000)).unwrap();
    assert_eq!(r.state.combo.count, 1);
    assert_eq!(r.state.combo.last_completion_ts, 1000);
}

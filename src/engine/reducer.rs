//! Pure reducer: (task id, tasks, snapshot, timestamp) -> CompletionResult.
//!
//! This is the single state-transition entry point. All progression
//! math (combo windowing, XP multipliers, the leveling loop, momentum,
//! achievement unlocks) happens here, on copies of the inputs. Given
//! identical inputs the result is bit-identical, which the replay bench
//! and the test suite both lean on.

use chrono::Utc;

use super::achievements::{self, Unlocked};
use super::state::{
    ComboState, ProgressionSnapshot, Timestamp, COMBO_STEP, COMBO_WINDOW_MS,
};
use super::task::Task;

/// Everything that changed in one completion event.
///
/// `achievements_unlocked` holds only the badges unlocked by this event;
/// the accumulated set lives in `state.achievements`.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    /// Input list with the matched task's `completed` flag set.
    pub tasks: Vec<Task>,
    /// The replacement snapshot. The caller owns it; the old one can be
    /// dropped or persisted.
    pub state: ProgressionSnapshot,
    pub leveled_up: bool,
    /// XP after the combo multiplier, i.e. what was actually added.
    pub xp_gained: u64,
    pub achievements_unlocked: Vec<Unlocked>,
    /// True when this completion extended a chain (combo count > 1).
    pub combo_triggered: bool,
}

/// Process one task-completion event.
///
/// Returns `None` when there is nothing to do: the id matches no task,
/// or the task is already completed (double-click races land here).
/// That is a signal, not an error; nothing in this function panics on
/// caller data.
///
/// `at` is the event timestamp in epoch ms. `None` defaults to the wall
/// clock, so tests and simulation benches needing determinism must pass
/// it explicitly; when `at` is `Some` the clock is never read.
pub fn process_task_completion(
    task_id: &str,
    tasks: &[Task],
    state: &ProgressionSnapshot,
    at: Option<Timestamp>,
) -> Option<CompletionResult> {
    let idx = tasks.iter().position(|t| t.id == task_id)?;
    if tasks[idx].completed {
        return None;
    }
    let now = at.unwrap_or_else(|| Utc::now().timestamp_millis());

    let mut new_tasks = tasks.to_vec();
    new_tasks[idx].completed = true;
    let task = &new_tasks[idx];

    let mut next = state.clone();
    next.restore_invariants();
    let is_first_task = next.completed_tasks == 0;

    next.combo = evaluate_combo(&next.combo, now);
    let combo_triggered = next.combo.count > 1;

    let awarded_xp = (task.base_xp as f64 * next.combo.multiplier).floor() as u64;

    let leveled_up = apply_leveling(&mut next, awarded_xp);
    next.push_momentum(awarded_xp);

    // Rules see the post-combo, post-leveling snapshot; the completed
    // count is bumped after evaluation (is_first_task is pre-event).
    let unlocked = achievements::evaluate(&next, task, is_first_task, now);
    next.achievements.extend(unlocked.iter().cloned());
    next.completed_tasks += 1;

    Some(CompletionResult {
        tasks: new_tasks,
        state: next,
        leveled_up,
        xp_gained: awarded_xp,
        achievements_unlocked: unlocked,
        combo_triggered,
    })
}

/// Derive the next combo state from the previous one and the event time.
///
/// A chain extends only when there was a prior completion (ts > 0) and
/// this one lands strictly inside the window. A non-positive prior
/// timestamp always means "no prior combo", whatever delta it implies.
fn evaluate_combo(prev: &ComboState, now: Timestamp) -> ComboState {
    let chained =
        prev.last_completion_ts > 0 && now - prev.last_completion_ts < COMBO_WINDOW_MS;

    let count = if chained { prev.count + 1 } else { 1 };
    let multiplier = if chained {
        1.0 + count as f64 * COMBO_STEP
    } else {
        1.0
    };

    ComboState {
        count,
        multiplier,
        last_completion_ts: now,
    }
}

/// Fold awarded XP into the snapshot, looping over as many level-ups as
/// the award spans. Each new threshold is floor(1.5x) of the previous
/// one, computed in exact integer math.
fn apply_leveling(state: &mut ProgressionSnapshot, awarded_xp: u64) -> bool {
    let mut xp = state.current_xp + awarded_xp;
    let mut leveled = false;

    while xp >= state.xp_for_next_level {
        xp -= state.xp_for_next_level;
        state.level += 1;
        // floor(threshold * 1.5)
        state.xp_for_next_level += state.xp_for_next_level / 2;
        leveled = true;
    }

    state.current_xp = xp;
    leveled
}

//! Tasks: the units of work the engine marks complete.

use serde::{Deserialize, Serialize};

/// Difficulty rank of a task, hardest first.
///
/// Only `S` carries engine-visible meaning (the LEGENDARY badge); the
/// rest exist so callers can scale `base_xp` consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyRank {
    S,
    A,
    B,
    C,
}

impl DifficultyRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyRank::S => "S",
            DifficultyRank::A => "A",
            DifficultyRank::B => "B",
            DifficultyRank::C => "C",
        }
    }
}

/// A unit of work. `completed` is monotonic: once true it never reverts,
/// and the engine is the only party that flips it (on a copied list,
/// never in place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub rank: DifficultyRank,
    pub base_xp: u64,
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, rank: DifficultyRank, base_xp: u64) -> Self {
        Self {
            id: id.into(),
            rank,
            base_xp,
            completed: false,
        }
    }
}

/// Find a task by id. Callers guarantee id uniqueness within a list;
/// the engine takes the first match.
pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

/// Count of tasks not yet completed.
pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

/// Count of completed tasks in the list.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

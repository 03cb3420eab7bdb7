//! chorequest: an incentive engine that wraps ordinary chores in a
//! quest-game progression model (XP, levels, combo chains, achievements).
//!
//! The crate is a leaf: it performs no I/O, holds no globals, and never
//! reads the clock unless a caller omits the event timestamp. A session
//! controller owns the task list and the current [`engine::state::ProgressionSnapshot`],
//! calls [`engine::reducer::process_task_completion`] once per completion
//! event, and persists or renders whatever comes back.

pub mod engine;
pub mod logging;
pub mod sim;

pub use engine::achievements::{AchievementId, Unlocked};
pub use engine::reducer::{process_task_completion, CompletionResult};
pub use engine::state::{ComboState, ProgressionSnapshot, Timestamp};
pub use engine::task::{DifficultyRank, Task};

//! Core incentive engine with deterministic transition semantics.
//!
//! Architecture:
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │   Session    │────►│  Completion      │────►│   Reducer    │
//! │  controller  │     │  event (id, ts)  │     │  (pure fn)   │
//! └──────────────┘     └──────────────────┘     └──────────────┘
//!                                                      │
//!                                                      ▼
//!                      ┌──────────────────┐     ┌──────────────┐
//!                      │ CompletionResult │◄────│  Snapshot    │
//!                      │ (xp/level/badge) │     │  (hashed)    │
//!                      └──────────────────┘     └──────────────┘
//! ```
//!
//! Every transition is a pure transform of `(task id, task list,
//! snapshot, timestamp)` into a brand-new task list and snapshot; the
//! inputs are never mutated. Given identical inputs the output is
//! bit-identical, which is what the replay bench in [`crate::sim`]
//! verifies via snapshot hashing.

pub mod achievements;
pub mod reducer;
pub mod state;
pub mod task;

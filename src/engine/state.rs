//! Progression snapshot with deterministic hashing for replay validation.

use serde::{Deserialize, Serialize};

use super::achievements::{AchievementId, Unlocked};

/// Epoch milliseconds. Signed so an out-of-order event yields a negative
/// delta instead of an underflow; zero or below means "never".
pub type Timestamp = i64;

/// XP required to clear level 1.
pub const XP_FIRST_LEVEL: u64 = 1000;

/// A completion within this window of the previous one extends the combo.
pub const COMBO_WINDOW_MS: i64 = 30_000;

/// Multiplier gained per combo link: 1.0 + count * COMBO_STEP.
pub const COMBO_STEP: f64 = 0.1;

/// Momentum history cap; oldest samples drop first.
pub const MOMENTUM_CAP: usize = 20;

/// Fraction of awarded XP folded into each momentum sample.
pub const MOMENTUM_XP_WEIGHT: f64 = 0.5;

/// Seed samples so a fresh session renders a non-empty trend chart.
const MOMENTUM_SEED: [f64; 5] = [0.0, 100.0, 150.0, 120.0, 200.0];

/// Combo chain state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    /// Links in the current chain. Resets to 1 (not 0) on any
    /// unchained completion; never decremented outside a reset.
    pub count: u32,
    /// Effective XP multiplier, >= 1.0.
    pub multiplier: f64,
    /// Timestamp of the previous completion; 0 = never.
    pub last_completion_ts: Timestamp,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
            last_completion_ts: 0,
        }
    }
}

/// The player's entire incentive state at one instant.
///
/// Immutable by convention: the reducer reads one snapshot and returns
/// a brand-new one; nothing in this crate mutates a snapshot a caller
/// still holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub level: u32,
    /// Always in `[0, xp_for_next_level)` after a transition.
    pub current_xp: u64,
    /// Strictly increases across level-ups, never decreases otherwise.
    pub xp_for_next_level: u64,
    /// Incremented exactly once per non-no-op completion.
    pub completed_tasks: u64,
    /// Trailing XP-velocity samples, oldest first, capped at
    /// [`MOMENTUM_CAP`]. Trend display only.
    pub momentum: Vec<f64>,
    pub combo: ComboState,
    /// Unlocked badges, unique by id, insertion order preserved.
    pub achievements: Vec<Unlocked>,
}

impl ProgressionSnapshot {
    /// Starting snapshot for a fresh play session.
    pub fn initial() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_for_next_level: XP_FIRST_LEVEL,
            completed_tasks: 0,
            momentum: MOMENTUM_SEED.to_vec(),
            combo: ComboState::default(),
            achievements: Vec::new(),
        }
    }

    /// Clamp-and-proceed repair for malformed caller state.
    ///
    /// The engine never rejects a snapshot: a zero threshold, a level
    /// below 1, an oversized momentum history, or a negative combo
    /// timestamp are pulled back to the nearest valid value before the
    /// transition runs.
    pub fn restore_invariants(&mut self) {
        if self.level < 1 {
            self.level = 1;
        }
        if self.xp_for_next_level < 1 {
            self.xp_for_next_level = XP_FIRST_LEVEL;
        }
        if self.combo.last_completion_ts < 0 {
            self.combo.last_completion_ts = 0;
        }
        if self.combo.multiplier < 1.0 {
            self.combo.multiplier = 1.0;
        }
        let len = self.momentum.len();
        if len > MOMENTUM_CAP {
            self.momentum.drain(0..len - MOMENTUM_CAP);
        }
    }

    /// Append a momentum sample, dropping the oldest past the cap.
    pub fn push_momentum(&mut self, awarded_xp: u64) {
        let last = self.momentum.last().copied().unwrap_or(0.0);
        self.momentum.push(last + awarded_xp as f64 * MOMENTUM_XP_WEIGHT);
        if self.momentum.len() > MOMENTUM_CAP {
            self.momentum.remove(0);
        }
    }

    /// Whether a badge with this id is already unlocked.
    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Compute a deterministic hash for replay validation.
    pub fn state_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut h = DefaultHasher::new();

        self.level.hash(&mut h);
        self.current_xp.hash(&mut h);
        self.xp_for_next_level.hash(&mut h);
        self.completed_tasks.hash(&mut h);

        self.combo.count.hash(&mut h);
        // Quantized to avoid float comparison issues
        ((self.combo.multiplier * 1e8) as i64).hash(&mut h);
        self.combo.last_completion_ts.hash(&mut h);

        for sample in &self.momentum {
            ((sample * 1e8) as i64).hash(&mut h);
        }

        for badge in &self.achievements {
            badge.id.as_str().hash(&mut h);
            badge.unlocked_at.hash(&mut h);
        }

        h.finish()
    }
}

impl Default for ProgressionSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

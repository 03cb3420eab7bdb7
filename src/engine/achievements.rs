//! Achievement definitions and fixed-order rule evaluation.
//!
//! Four rules, checked on every completion, each gated only by "not
//! already unlocked". They are not mutually exclusive: one event can
//! unlock several, and the evaluation order below is what makes
//! simultaneous unlocks reproducible.

use serde::{Deserialize, Serialize};

use super::state::{ProgressionSnapshot, Timestamp};
use super::task::{DifficultyRank, Task};

/// Stable badge identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementId {
    /// First ever completed task.
    FirstBlood,
    /// Combo chain reached 3 links.
    ComboMaster,
    /// Completed an S-rank task.
    Legendary,
    /// Reached level 3.
    Veteran,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "FIRST_BLOOD",
            AchievementId::ComboMaster => "COMBO_MASTER",
            AchievementId::Legendary => "LEGENDARY",
            AchievementId::Veteran => "VETERAN",
        }
    }

    /// Display icon token shown next to the badge.
    pub fn icon(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "⚔️",
            AchievementId::ComboMaster => "🔥",
            AchievementId::Legendary => "👑",
            AchievementId::Veteran => "🎖️",
        }
    }
}

/// An unlocked badge. Once present in a snapshot neither `id` nor
/// `unlocked_at` ever changes, and the record is never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlocked {
    pub id: AchievementId,
    pub icon: String,
    pub unlocked_at: Timestamp,
}

impl Unlocked {
    fn new(id: AchievementId, at: Timestamp) -> Self {
        Self {
            id,
            icon: id.icon().to_string(),
            unlocked_at: at,
        }
    }
}

// Fixed evaluation order; simultaneous unlocks land in this order in
// both the delta list and the accumulated set.
const RULE_ORDER: [AchievementId; 4] = [
    AchievementId::FirstBlood,
    AchievementId::ComboMaster,
    AchievementId::Legendary,
    AchievementId::Veteran,
];

/// Evaluate the rule set against the post-combo, post-leveling
/// intermediate snapshot.
///
/// `is_first_task` reflects the pre-event completed count (true iff it
/// was 0 before this event). Returns only the badges newly unlocked by
/// this event, timestamped with the event's timestamp.
pub fn evaluate(
    state: &ProgressionSnapshot,
    task: &Task,
    is_first_task: bool,
    at: Timestamp,
) -> Vec<Unlocked> {
    let mut out = Vec::new();

    for id in RULE_ORDER {
        if state.has_achievement(id) {
            continue;
        }
        let hit = match id {
            AchievementId::FirstBlood => is_first_task,
            AchievementId::ComboMaster => state.combo.count >= 3,
            AchievementId::Legendary => task.rank == DifficultyRank::S,
            AchievementId::Veteran => state.level >= 3,
        };
        if hit {
            out.push(Unlocked::new(id, at));
        }
    }

    out
}

//! Achievement catalog and evaluator.
//!
//! Progress is a pure read-only function of the account state; the only
//! mutable piece is the unlock ledger, which records a timestamp exactly
//! once, the first time a threshold is crossed.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CompletionLog, Frequency, Rarity, Ritual};

/// Achievement grouping; each category has its own progress formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Streak,
    Essence,
    Rituals,
    Social,
    Special,
}

/// A static achievement definition.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub target: u32,
    pub category: AchievementCategory,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "ach-streak-7",
        name: "First Week",
        description: "Complete your rituals for 7 consecutive days",
        rarity: Rarity::Common,
        target: 7,
        category: AchievementCategory::Streak,
    },
    AchievementDef {
        id: "ach-streak-30",
        name: "Master of the Month",
        description: "Hold a 30-day streak without breaking it",
        rarity: Rarity::Rare,
        target: 30,
        category: AchievementCategory::Streak,
    },
    AchievementDef {
        id: "ach-streak-100",
        name: "Unbroken",
        description: "Reach a 100-day streak",
        rarity: Rarity::Legendary,
        target: 100,
        category: AchievementCategory::Streak,
    },
    AchievementDef {
        id: "ach-essence-1000",
        name: "Hoarder",
        description: "Accumulate 1,000 essence",
        rarity: Rarity::Common,
        target: 1000,
        category: AchievementCategory::Essence,
    },
    AchievementDef {
        id: "ach-essence-10000",
        name: "Ascended",
        description: "Reach 10,000 essence",
        rarity: Rarity::Rare,
        target: 10000,
        category: AchievementCategory::Essence,
    },
    AchievementDef {
        id: "ach-essence-50000",
        name: "Demigod",
        description: "Accumulate 50,000 essence",
        rarity: Rarity::Legendary,
        target: 50000,
        category: AchievementCategory::Essence,
    },
    AchievementDef {
        id: "ach-rituals-10",
        name: "Initiate",
        description: "Create 10 rituals",
        rarity: Rarity::Common,
        target: 10,
        category: AchievementCategory::Rituals,
    },
    AchievementDef {
        id: "ach-rituals-50",
        name: "Collector",
        description: "Create 50 distinct rituals",
        rarity: Rarity::Rare,
        target: 50,
        category: AchievementCategory::Rituals,
    },
    AchievementDef {
        id: "ach-complete-100",
        name: "Centurion",
        description: "Complete 100 rituals in total",
        rarity: Rarity::Rare,
        target: 100,
        category: AchievementCategory::Rituals,
    },
    AchievementDef {
        id: "ach-social-first",
        name: "First Voice",
        description: "Publish your first community post",
        rarity: Rarity::Common,
        target: 1,
        category: AchievementCategory::Social,
    },
    AchievementDef {
        id: "ach-social-10",
        name: "Influencer",
        description: "Publish 10 posts",
        rarity: Rarity::Common,
        target: 10,
        category: AchievementCategory::Social,
    },
    AchievementDef {
        id: "ach-perfect-week",
        name: "Perfect Week",
        description: "Complete every ritual on all 7 of the last 7 days",
        rarity: Rarity::Rare,
        target: 7,
        category: AchievementCategory::Special,
    },
    AchievementDef {
        id: "ach-all-difficulties",
        name: "Complete Master",
        description: "Complete rituals of every difficulty",
        rarity: Rarity::Rare,
        target: 3,
        category: AchievementCategory::Special,
    },
];

/// Read-only view over the state the evaluator consumes.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot<'a> {
    pub rituals: &'a [Ritual],
    pub logs: &'a [CompletionLog],
    pub essence: i64,
    /// Community post count, supplied by the (external) social feed.
    pub post_count: u32,
    pub today: NaiveDate,
}

/// Progress toward one achievement, capped at its target.
pub fn progress(def: &AchievementDef, snap: &ProgressSnapshot) -> u32 {
    let value = match def.category {
        AchievementCategory::Streak => {
            snap.rituals.iter().map(|r| r.streak).max().unwrap_or(0)
        }
        AchievementCategory::Essence => snap.essence.max(0).min(i64::from(def.target)) as u32,
        AchievementCategory::Rituals => {
            // Completion milestones count logs; creation milestones count rituals.
            if def.id.contains("complete") {
                snap.logs.len() as u32
            } else {
                snap.rituals.len() as u32
            }
        }
        AchievementCategory::Social => snap.post_count,
        AchievementCategory::Special => match def.id {
            "ach-perfect-week" => perfect_week_days(snap),
            "ach-all-difficulties" => completed_difficulties(snap),
            _ => 0,
        },
    };
    value.min(def.target)
}

/// Number of days among the 7 ending today on which every daily ritual
/// existing on that day has a completion log. A ritual created midweek
/// is only required from its creation day onward. Days before the first
/// daily ritual existed do not count; zero when none exist at all.
fn perfect_week_days(snap: &ProgressSnapshot) -> u32 {
    let daily: Vec<(Uuid, NaiveDate)> = snap
        .rituals
        .iter()
        .filter(|r| r.frequency == Frequency::Daily)
        .map(|r| (r.id, r.created_at.date_naive()))
        .collect();
    if daily.is_empty() {
        return 0;
    }
    let logged: HashSet<(Uuid, NaiveDate)> =
        snap.logs.iter().map(|l| (l.ritual_id, l.date)).collect();

    (0..7u64)
        .filter_map(|back| snap.today.checked_sub_days(Days::new(back)))
        .filter(|day| {
            let mut required = daily.iter().filter(|(_, created)| created <= day).peekable();
            required.peek().is_some() && required.all(|(id, _)| logged.contains(&(*id, *day)))
        })
        .count() as u32
}

/// Distinct difficulties among rituals with at least one completion.
fn completed_difficulties(snap: &ProgressSnapshot) -> u32 {
    let completed: HashSet<Uuid> = snap.logs.iter().map(|l| l.ritual_id).collect();
    snap.rituals
        .iter()
        .filter(|r| completed.contains(&r.id))
        .map(|r| r.difficulty)
        .collect::<HashSet<_>>()
        .len() as u32
}

/// Persisted record of when each achievement was first unlocked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockLedger {
    unlocked: BTreeMap<String, DateTime<Utc>>,
}

impl UnlockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the unlock timestamp if the threshold is crossed and none is
    /// recorded yet. Returns true only for a fresh unlock.
    pub fn record(&mut self, def: &AchievementDef, progress: u32, now: DateTime<Utc>) -> bool {
        if progress >= def.target && !self.unlocked.contains_key(def.id) {
            self.unlocked.insert(def.id.to_string(), now);
            true
        } else {
            false
        }
    }

    pub fn unlocked_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.unlocked.get(id).copied()
    }
}

/// One achievement with its evaluated progress and unlock state.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub def: AchievementDef,
    pub progress: u32,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Evaluate the whole catalog, recording any freshly crossed thresholds in
/// the ledger. Unlocked means the threshold is met AND a timestamp is on
/// record.
pub fn evaluate(
    snap: &ProgressSnapshot,
    ledger: &mut UnlockLedger,
    now: DateTime<Utc>,
) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|def| {
            let progress = progress(def, snap);
            ledger.record(def, progress, now);
            let unlocked_at = ledger.unlocked_at(def.id);
            AchievementStatus {
                def: *def,
                progress,
                unlocked: progress >= def.target && unlocked_at.is_some(),
                unlocked_at,
            }
        })
        .collect()
}

//! Ritual record and its closed attribute enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum accepted ritual title length.
pub const MAX_TITLE_LEN: usize = 100;

/// Ritual difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Novice,
    Adept,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Novice, Difficulty::Adept, Difficulty::Master];

    /// Default essence reward for a daily ritual of this tier.
    pub fn base_reward(&self) -> u32 {
        match self {
            Difficulty::Novice => 10,
            Difficulty::Adept => 25,
            Difficulty::Master => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Novice => "novice",
            Difficulty::Adept => "adept",
            Difficulty::Master => "master",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s {
            "novice" => Some(Difficulty::Novice),
            "adept" => Some(Difficulty::Adept),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }
}

/// How often the ritual recurs. Weekly rituals pay a triple default reward;
/// streak accounting is per calendar day regardless of frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Frequency {
    pub fn reward_multiplier(&self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Frequency> {
        match s {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            _ => None,
        }
    }
}

/// Category tag used by the template library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RitualCategory {
    Health,
    Productivity,
    Mental,
    Physical,
    Social,
    Learning,
    Creativity,
    Spiritual,
}

impl RitualCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RitualCategory::Health => "health",
            RitualCategory::Productivity => "productivity",
            RitualCategory::Mental => "mental",
            RitualCategory::Physical => "physical",
            RitualCategory::Social => "social",
            RitualCategory::Learning => "learning",
            RitualCategory::Creativity => "creativity",
            RitualCategory::Spiritual => "spiritual",
        }
    }
}

/// A user-defined recurring habit.
///
/// `streak` is mutated exclusively through completion toggling; it always
/// reflects the run length ending at the most recent completion.
/// `last_broken_streak` remembers the run length lost the last time a
/// completion landed after a gap, so a restore-streak item can recover it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ritual {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub frequency: Frequency,
    pub essence_reward: u32,
    pub streak: u32,
    #[serde(default)]
    pub last_broken_streak: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a ritual, from the manual form, an accepted AI
/// suggestion, or a library template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub frequency: Frequency,
    /// Explicit reward override; `None` derives it from difficulty and frequency.
    #[serde(default)]
    pub essence_reward: Option<u32>,
}

impl RitualDraft {
    pub fn new(title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            difficulty,
            frequency: Frequency::Daily,
            essence_reward: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_reward(mut self, reward: u32) -> Self {
        self.essence_reward = Some(reward);
        self
    }

    /// The reward this draft resolves to.
    pub fn resolved_reward(&self) -> u32 {
        self.essence_reward
            .unwrap_or_else(|| self.difficulty.base_reward() * self.frequency.reward_multiplier())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(ValidationError::invalid(
                "title",
                format!("must be at most {MAX_TITLE_LEN} characters"),
            ));
        }
        if self.essence_reward == Some(0) {
            return Err(ValidationError::invalid("essence_reward", "must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rewards_by_tier() {
        assert_eq!(Difficulty::Novice.base_reward(), 10);
        assert_eq!(Difficulty::Adept.base_reward(), 25);
        assert_eq!(Difficulty::Master.base_reward(), 50);
    }

    #[test]
    fn test_weekly_triples_default_reward() {
        let draft = RitualDraft::new("Weekly review", Difficulty::Adept)
            .with_frequency(Frequency::Weekly);
        assert_eq!(draft.resolved_reward(), 75);
    }

    #[test]
    fn test_explicit_reward_wins() {
        let draft = RitualDraft::new("Cold shower", Difficulty::Master).with_reward(40);
        assert_eq!(draft.resolved_reward(), 40);
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let draft = RitualDraft::new("   ", Difficulty::Novice);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlong_title() {
        let draft = RitualDraft::new("x".repeat(101), Difficulty::Novice);
        assert!(draft.validate().is_err());
        let draft = RitualDraft::new("x".repeat(100), Difficulty::Novice);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_difficulty_parse_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.label()), Some(d));
        }
        assert_eq!(Difficulty::parse("legendary"), None);
    }
}

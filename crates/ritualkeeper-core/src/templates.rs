//! Curated ritual template library, importable into an account.

use serde::Serialize;

use crate::model::{Difficulty, Frequency, RitualCategory, RitualDraft};

/// A library entry: a ready-made ritual the user can import.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RitualTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub category: RitualCategory,
    pub frequency: Frequency,
    pub essence_reward: u32,
    pub popular: bool,
}

impl RitualTemplate {
    /// Turn the template into a creatable draft.
    pub fn to_draft(&self) -> RitualDraft {
        RitualDraft::new(self.title, self.difficulty)
            .with_description(self.description)
            .with_frequency(self.frequency)
            .with_reward(self.essence_reward)
    }
}

pub const RITUAL_LIBRARY: &[RitualTemplate] = &[
    RitualTemplate {
        id: "lib-health-1",
        title: "Morning Hydration",
        description: "Drink 500ml of water on waking, before any other drink.",
        difficulty: Difficulty::Novice,
        category: RitualCategory::Health,
        frequency: Frequency::Daily,
        essence_reward: 10,
        popular: true,
    },
    RitualTemplate {
        id: "lib-health-2",
        title: "Cold Shower Protocol",
        description: "A cold shower of at least 2 minutes to harden the will.",
        difficulty: Difficulty::Adept,
        category: RitualCategory::Health,
        frequency: Frequency::Daily,
        essence_reward: 25,
        popular: true,
    },
    RitualTemplate {
        id: "lib-health-3",
        title: "10K Daily Steps",
        description: "Walk at least 10,000 steps every day, no exceptions.",
        difficulty: Difficulty::Adept,
        category: RitualCategory::Health,
        frequency: Frequency::Daily,
        essence_reward: 25,
        popular: false,
    },
    RitualTemplate {
        id: "lib-prod-1",
        title: "Deep Work Block",
        description: "90 uninterrupted minutes on the single most important task.",
        difficulty: Difficulty::Adept,
        category: RitualCategory::Productivity,
        frequency: Frequency::Daily,
        essence_reward: 25,
        popular: true,
    },
    RitualTemplate {
        id: "lib-prod-2",
        title: "Inbox Zero",
        description: "Empty every inbox before the day ends.",
        difficulty: Difficulty::Novice,
        category: RitualCategory::Productivity,
        frequency: Frequency::Daily,
        essence_reward: 10,
        popular: false,
    },
    RitualTemplate {
        id: "lib-prod-3",
        title: "Weekly Review",
        description: "Audit the week: what advanced, what slipped, what changes.",
        difficulty: Difficulty::Adept,
        category: RitualCategory::Productivity,
        frequency: Frequency::Weekly,
        essence_reward: 75,
        popular: true,
    },
    RitualTemplate {
        id: "lib-mental-1",
        title: "Morning Meditation",
        description: "Ten minutes of stillness before the noise begins.",
        difficulty: Difficulty::Novice,
        category: RitualCategory::Mental,
        frequency: Frequency::Daily,
        essence_reward: 10,
        popular: true,
    },
    RitualTemplate {
        id: "lib-mental-2",
        title: "Digital Sunset",
        description: "No screens in the final hour before sleep.",
        difficulty: Difficulty::Master,
        category: RitualCategory::Mental,
        frequency: Frequency::Daily,
        essence_reward: 50,
        popular: false,
    },
    RitualTemplate {
        id: "lib-physical-1",
        title: "Strength Session",
        description: "A full resistance workout. The body obeys the mind.",
        difficulty: Difficulty::Master,
        category: RitualCategory::Physical,
        frequency: Frequency::Daily,
        essence_reward: 50,
        popular: true,
    },
    RitualTemplate {
        id: "lib-learning-1",
        title: "Read 20 Pages",
        description: "Twenty pages of a real book, every day.",
        difficulty: Difficulty::Novice,
        category: RitualCategory::Learning,
        frequency: Frequency::Daily,
        essence_reward: 10,
        popular: true,
    },
    RitualTemplate {
        id: "lib-creativity-1",
        title: "Morning Pages",
        description: "Three pages of longhand writing before breakfast.",
        difficulty: Difficulty::Adept,
        category: RitualCategory::Creativity,
        frequency: Frequency::Daily,
        essence_reward: 25,
        popular: false,
    },
    RitualTemplate {
        id: "lib-spiritual-1",
        title: "Evening Reflection",
        description: "Write down one failure and one victory of the day.",
        difficulty: Difficulty::Novice,
        category: RitualCategory::Spiritual,
        frequency: Frequency::Daily,
        essence_reward: 10,
        popular: false,
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static RitualTemplate> {
    RITUAL_LIBRARY.iter().find(|t| t.id == id)
}

/// Templates in a category, library order.
pub fn templates_in(category: RitualCategory) -> Vec<&'static RitualTemplate> {
    RITUAL_LIBRARY.iter().filter(|t| t.category == category).collect()
}

/// The popular subset, library order.
pub fn popular_templates() -> Vec<&'static RitualTemplate> {
    RITUAL_LIBRARY.iter().filter(|t| t.popular).collect()
}

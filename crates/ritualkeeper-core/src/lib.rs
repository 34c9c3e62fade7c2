//! # Ritualkeeper Core Library
//!
//! Core business logic for Ritualkeeper, a gamified habit tracker. All
//! operations are available through a standalone CLI binary; any GUI is a
//! thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Reward Engine**: pure streak/essence state machine; completing or
//!   undoing a day is planned without side effects and applied afterwards
//! - **Repository**: the authoritative ritual and completion-log
//!   collections, persisted as independent JSON documents
//! - **Ledger**: essence balance, shop purchases and time-boxed buffs
//! - **Achievements**: read-only progress evaluation over the above
//! - **Storage**: pluggable whole-document store plus TOML configuration
//!
//! ## Key Components
//!
//! - [`HabitService`]: the service object owning all mutable state
//! - [`engine`]: completion/undo planning
//! - [`RitualStore`]: ritual and log collections
//! - [`Store`]: persistence collaborator trait

pub mod achievements;
pub mod clock;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod repository;
pub mod service;
pub mod stats;
pub mod storage;
pub mod suggest;
pub mod templates;

pub use achievements::{AchievementCategory, AchievementDef, AchievementStatus, UnlockLedger, ACHIEVEMENTS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{CompletionOutcome, UndoOutcome, STREAK_BONUS};
pub use error::{CoreError, Result, StorageError, SuggestError, ValidationError};
pub use model::{
    find_item, ActiveBuff, CompletionLog, Difficulty, Frequency, ItemEffect, Rank, Rarity, Ritual,
    RitualCategory, RitualDraft, ShopItem, UserAccount, SHOP_ITEMS,
};
pub use repository::RitualStore;
pub use service::{ExportSnapshot, HabitService, ToggleReport};
pub use stats::{DayCell, ProgressAnalyzer, ProgressReport};
pub use storage::{Config, FileStore, MemoryStore, Store};
pub use suggest::{
    local_fallback, HttpSuggestionProvider, RitualSuggestion, SuggestionProvider,
};
pub use templates::{find_template, popular_templates, RitualTemplate, RITUAL_LIBRARY};

//! User account, inventory, buffs and the derived rank ladder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-boxed essence multiplier granted by consuming a boost item.
///
/// Expiry is checked at read time; expired buffs are inert and get swept
/// on the next ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub item_id: String,
    /// Absolute expiry, milliseconds since the Unix epoch.
    pub expires_at_ms: i64,
    pub multiplier: f64,
}

impl ActiveBuff {
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms
    }
}

/// The account owning rituals, essence and inventory.
///
/// `essence` never goes below zero after any single operation; the ledger
/// clamps on subtraction. The inventory is an ordered multiset of shop
/// item ids (duplicates allowed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub essence: i64,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub active_buffs: Vec<ActiveBuff>,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(username: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            essence: 0,
            inventory: Vec::new(),
            active_buffs: Vec::new(),
            created_at,
        }
    }

    /// Display rank, a pure function of the current balance.
    pub fn rank(&self) -> Rank {
        Rank::from_essence(self.essence)
    }

    /// How many copies of an item the inventory holds.
    pub fn owned_count(&self, item_id: &str) -> usize {
        self.inventory.iter().filter(|i| i.as_str() == item_id).count()
    }
}

/// Display rank derived from the essence balance. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Unkindled,
    Neophyte,
    Adept,
    Warlock,
    Lich,
    DemiGod,
}

impl Rank {
    pub fn from_essence(essence: i64) -> Rank {
        match essence {
            e if e < 100 => Rank::Unkindled,
            e if e < 500 => Rank::Neophyte,
            e if e < 1000 => Rank::Adept,
            e if e < 2500 => Rank::Warlock,
            e if e < 5000 => Rank::Lich,
            _ => Rank::DemiGod,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Rank::Unkindled => "Unkindled",
            Rank::Neophyte => "Neophyte",
            Rank::Adept => "Adept",
            Rank::Warlock => "Warlock",
            Rank::Lich => "Lich",
            Rank::DemiGod => "Demi-God",
        }
    }

    /// Essence needed for the next rank (the ladder tops out at 10000,
    /// which Demi-God progress is displayed against).
    pub fn next_threshold(&self) -> i64 {
        match self {
            Rank::Unkindled => 100,
            Rank::Neophyte => 500,
            Rank::Adept => 1000,
            Rank::Warlock => 2500,
            Rank::Lich => 5000,
            Rank::DemiGod => 10000,
        }
    }
}

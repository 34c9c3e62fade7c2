//! Static shop catalog.

use serde::Serialize;

/// Shop item rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }
}

/// What consuming an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    /// Multiplies essence gains while the buff is active.
    EssenceBoost,
    /// Recovers the last broken streak of a chosen ritual.
    RestoreStreak,
    /// Inventory-only, no further state.
    Cosmetic,
    /// Unlocks master-tier rituals; inventory-only.
    UnlockMaster,
}

/// A catalog entry. The catalog is static data, not user state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: i64,
    pub rarity: Rarity,
    pub effect: ItemEffect,
    /// Multiplier; only meaningful for essence boosts.
    pub effect_value: f64,
    /// Buff duration in milliseconds. 0 = instantaneous, -1 = permanent.
    pub duration_ms: i64,
}

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// The four items of the shop.
pub const SHOP_ITEMS: &[ShopItem] = &[
    ShopItem {
        id: "potion_discipline",
        name: "Elixir of Discipline",
        description: "Grants +50% essence gained for 24 hours. The taste is metallic and cold.",
        cost: 500,
        rarity: Rarity::Rare,
        effect: ItemEffect::EssenceBoost,
        effect_value: 1.5,
        duration_ms: DAY_MS,
    },
    ShopItem {
        id: "potion_oblivion",
        name: "Potion of Oblivion",
        description: "Restores a lost streak if consumed before the next dawn. Erases the failure.",
        cost: 1000,
        rarity: Rarity::Legendary,
        effect: ItemEffect::RestoreStreak,
        effect_value: 1.0,
        duration_ms: 0,
    },
    ShopItem {
        id: "shadow_amulet",
        name: "Shadow Amulet",
        description: "A cosmetic trinket that darkens your profile. Others will see your commitment to the void.",
        cost: 2500,
        rarity: Rarity::Rare,
        effect: ItemEffect::Cosmetic,
        effect_value: 1.0,
        duration_ms: -1,
    },
    ShopItem {
        id: "binding_contract",
        name: "Binding Contract",
        description: "Unlocks master-tier rituals. Once signed, there is no way back.",
        cost: 5000,
        rarity: Rarity::Legendary,
        effect: ItemEffect::UnlockMaster,
        effect_value: 1.0,
        duration_ms: -1,
    },
];

/// Look up a catalog entry by id.
pub fn find_item(id: &str) -> Option<&'static ShopItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

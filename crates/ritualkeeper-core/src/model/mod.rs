//! Domain model: rituals, completion logs, accounts, shop items.

mod account;
mod item;
mod log;
mod ritual;

pub use account::{ActiveBuff, Rank, UserAccount};
pub use item::{find_item, ItemEffect, Rarity, ShopItem, SHOP_ITEMS};
pub use log::CompletionLog;
pub use ritual::{Difficulty, Frequency, Ritual, RitualCategory, RitualDraft};

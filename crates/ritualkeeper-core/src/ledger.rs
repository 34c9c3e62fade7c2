//! Account ledger: essence deltas, purchases and buff bookkeeping.
//!
//! Every operation either applies fully or not at all from the account's
//! point of view. Buff stacking is additive: the effective multiplier is
//! the sum of all unexpired boost multipliers, 1.0 when none are active.

use crate::error::{CoreError, Result};
use crate::model::{ActiveBuff, ItemEffect, ShopItem, UserAccount};

/// Apply a signed essence delta, clamping the balance at zero on
/// subtraction. Addition is unbounded.
pub fn apply_essence_delta(account: &mut UserAccount, delta: i64) {
    account.essence = (account.essence + delta).max(0);
}

/// Buy an item: deduct the cost and append the item id to the inventory.
///
/// # Errors
/// [`CoreError::InsufficientEssence`] when the balance does not cover the
/// cost; the account is left untouched.
pub fn purchase(account: &mut UserAccount, item: &ShopItem) -> Result<()> {
    if account.essence < item.cost {
        return Err(CoreError::InsufficientEssence {
            balance: account.essence,
            cost: item.cost,
        });
    }
    account.essence -= item.cost;
    account.inventory.push(item.id.to_string());
    Ok(())
}

/// Consume one inventory instance of an item and apply its account-side
/// effect. Restore-streak targets a ritual and is resolved by the service
/// layer; here it only consumes the inventory slot, as do cosmetics and
/// unlocks.
///
/// # Errors
/// [`CoreError::ItemNotOwned`] when the inventory holds no instance.
pub fn consume_item(account: &mut UserAccount, item: &ShopItem, now_ms: i64) -> Result<()> {
    let pos = account
        .inventory
        .iter()
        .position(|i| i.as_str() == item.id)
        .ok_or_else(|| CoreError::ItemNotOwned(item.id.to_string()))?;
    account.inventory.remove(pos);
    sweep_expired(account, now_ms);

    match item.effect {
        ItemEffect::EssenceBoost => {
            if let Some(buff) = account
                .active_buffs
                .iter_mut()
                .find(|b| b.item_id == item.id)
            {
                // Drinking the same elixir again extends the running buff.
                buff.expires_at_ms += item.duration_ms;
            } else {
                account.active_buffs.push(ActiveBuff {
                    item_id: item.id.to_string(),
                    expires_at_ms: now_ms + item.duration_ms,
                    multiplier: item.effect_value,
                });
            }
        }
        ItemEffect::RestoreStreak | ItemEffect::Cosmetic | ItemEffect::UnlockMaster => {}
    }
    Ok(())
}

/// Effective essence multiplier at an instant: the sum of unexpired boost
/// multipliers, or 1.0 when none are in force.
pub fn boost_multiplier(account: &UserAccount, now_ms: i64) -> f64 {
    let sum: f64 = account
        .active_buffs
        .iter()
        .filter(|b| b.is_active(now_ms))
        .map(|b| b.multiplier)
        .sum();
    if sum > 0.0 {
        sum
    } else {
        1.0
    }
}

/// Drop buffs whose expiry has passed. Called on each mutation; expired
/// buffs are already inert at read time either way.
pub fn sweep_expired(account: &mut UserAccount, now_ms: i64) {
    account.active_buffs.retain(|b| b.is_active(now_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::find_item;
    use chrono::Utc;

    fn account_with(essence: i64) -> UserAccount {
        let mut account = UserAccount::new("ash", Utc::now());
        account.essence = essence;
        account
    }

    #[test]
    fn test_delta_clamps_at_zero_on_subtraction() {
        let mut account = account_with(5);
        apply_essence_delta(&mut account, -20);
        assert_eq!(account.essence, 0);
        apply_essence_delta(&mut account, 7);
        assert_eq!(account.essence, 7);
    }

    #[test]
    fn test_purchase_exact_balance_succeeds() {
        let mut account = account_with(500);
        let elixir = find_item("potion_discipline").unwrap();
        purchase(&mut account, elixir).unwrap();
        assert_eq!(account.essence, 0);
        assert_eq!(account.inventory, vec!["potion_discipline".to_string()]);
    }

    #[test]
    fn test_purchase_insufficient_is_a_noop() {
        let mut account = account_with(400);
        let elixir = find_item("potion_discipline").unwrap();
        let err = purchase(&mut account, elixir).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientEssence { balance: 400, cost: 500 }
        ));
        assert_eq!(account.essence, 400);
        assert!(account.inventory.is_empty());
    }

    #[test]
    fn test_consume_requires_ownership() {
        let mut account = account_with(0);
        let elixir = find_item("potion_discipline").unwrap();
        let err = consume_item(&mut account, elixir, 0).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotOwned(_)));
    }

    #[test]
    fn test_consume_boost_adds_buff() {
        let mut account = account_with(0);
        let elixir = find_item("potion_discipline").unwrap();
        account.inventory.push(elixir.id.to_string());
        consume_item(&mut account, elixir, 1_000).unwrap();
        assert!(account.inventory.is_empty());
        assert_eq!(account.active_buffs.len(), 1);
        assert_eq!(account.active_buffs[0].expires_at_ms, 1_000 + elixir.duration_ms);
        assert_eq!(account.active_buffs[0].multiplier, 1.5);
    }

    #[test]
    fn test_consume_boost_extends_existing_buff() {
        let mut account = account_with(0);
        let elixir = find_item("potion_discipline").unwrap();
        account.inventory.push(elixir.id.to_string());
        account.inventory.push(elixir.id.to_string());
        consume_item(&mut account, elixir, 0).unwrap();
        consume_item(&mut account, elixir, 1_000).unwrap();
        assert_eq!(account.active_buffs.len(), 1);
        assert_eq!(account.active_buffs[0].expires_at_ms, 2 * elixir.duration_ms);
    }

    #[test]
    fn test_multiplier_sums_active_buffs() {
        let mut account = account_with(0);
        account.active_buffs.push(ActiveBuff {
            item_id: "a".to_string(),
            expires_at_ms: 100,
            multiplier: 1.5,
        });
        account.active_buffs.push(ActiveBuff {
            item_id: "b".to_string(),
            expires_at_ms: 100,
            multiplier: 2.0,
        });
        assert_eq!(boost_multiplier(&account, 50), 3.5);
        // Both expired: back to neutral.
        assert_eq!(boost_multiplier(&account, 100), 1.0);
    }

    #[test]
    fn test_sweep_drops_expired_only() {
        let mut account = account_with(0);
        account.active_buffs.push(ActiveBuff {
            item_id: "a".to_string(),
            expires_at_ms: 100,
            multiplier: 1.5,
        });
        account.active_buffs.push(ActiveBuff {
            item_id: "b".to_string(),
            expires_at_ms: 300,
            multiplier: 2.0,
        });
        sweep_expired(&mut account, 200);
        assert_eq!(account.active_buffs.len(), 1);
        assert_eq!(account.active_buffs[0].item_id, "b");
    }

    #[test]
    fn test_cosmetic_consumption_only_touches_inventory() {
        let mut account = account_with(0);
        let amulet = find_item("shadow_amulet").unwrap();
        account.inventory.push(amulet.id.to_string());
        consume_item(&mut account, amulet, 0).unwrap();
        assert!(account.inventory.is_empty());
        assert!(account.active_buffs.is_empty());
    }
}

//! The habit service: one explicit object owning the account, the ritual
//! collections and the unlock ledger, replacing any ambient global state.
//!
//! Mutation flow per operation: plan (pure, fallible) -> apply to memory
//! -> persist each touched document. Plans fail before anything mutates;
//! a failed save surfaces [`StorageError`] while the in-memory state stays
//! coherent, and the next successful save rewrites whole documents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::{evaluate, AchievementStatus, UnlockLedger};
use crate::clock::Clock;
use crate::engine;
use crate::error::{CoreError, Result, ValidationError};
use crate::ledger;
use crate::model::{
    find_item, CompletionLog, ItemEffect, Rank, Ritual, RitualDraft, ShopItem, UserAccount,
};
use crate::repository::RitualStore;
use crate::stats::{ProgressAnalyzer, ProgressReport};
use crate::storage::{keys, Store};
use crate::suggest::{suggest_or_fallback, validate_goal, RitualSuggestion, SuggestionProvider};
use crate::templates::find_template;

/// Result of a completion or undo, for display.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReport {
    pub ritual_id: Uuid,
    pub date: NaiveDate,
    pub streak: u32,
    pub essence_delta: i64,
    pub balance: i64,
}

/// Versioned snapshot for export/import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub account: UserAccount,
    pub rituals: Vec<Ritual>,
    pub logs: Vec<CompletionLog>,
}

pub const EXPORT_VERSION: &str = "1.0.0";

pub struct HabitService<S: Store, C: Clock> {
    store: S,
    clock: C,
    account: UserAccount,
    rituals: RitualStore,
    unlocks: UnlockLedger,
}

impl<S: Store, C: Clock> HabitService<S, C> {
    /// Load all documents from the store, creating a fresh account under
    /// `username` on first run.
    pub fn open(store: S, clock: C, username: &str) -> Result<Self> {
        let account = match load_doc::<UserAccount>(&store, keys::ACCOUNT)? {
            Some(account) => account,
            None => UserAccount::new(username, clock.now()),
        };
        let rituals = load_doc::<Vec<Ritual>>(&store, keys::RITUALS)?.unwrap_or_default();
        let logs = load_doc::<Vec<CompletionLog>>(&store, keys::LOGS)?.unwrap_or_default();
        let unlocks = load_doc::<UnlockLedger>(&store, keys::UNLOCKS)?.unwrap_or_default();

        Ok(Self {
            store,
            clock,
            account,
            rituals: RitualStore::from_parts(rituals, logs),
            unlocks,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn account(&self) -> &UserAccount {
        &self.account
    }

    pub fn rituals(&self) -> &[Ritual] {
        self.rituals.rituals()
    }

    pub fn logs(&self) -> &[CompletionLog] {
        self.rituals.logs()
    }

    pub fn rank(&self) -> Rank {
        self.account.rank()
    }

    pub fn get_ritual(&self, id: Uuid) -> Result<&Ritual> {
        self.rituals.get(id)
    }

    // ── Ritual lifecycle ─────────────────────────────────────────────

    pub fn create_ritual(&mut self, draft: RitualDraft) -> Result<Ritual> {
        let ritual = self
            .rituals
            .create_ritual(self.account.id, draft, self.clock.now())?;
        self.save_rituals()?;
        Ok(ritual)
    }

    pub fn create_from_template(&mut self, template_id: &str) -> Result<Ritual> {
        let template = find_template(template_id)
            .ok_or_else(|| CoreError::ItemNotFound(template_id.to_string()))?;
        self.create_ritual(template.to_draft())
    }

    /// Suggestions for a goal: the provider when it answers, the
    /// deterministic local list otherwise. Only goal validation can fail.
    pub fn suggest_rituals(
        &self,
        provider: &dyn SuggestionProvider,
        goal: &str,
    ) -> Result<Vec<RitualSuggestion>> {
        validate_goal(goal)?;
        Ok(suggest_or_fallback(provider, goal))
    }

    pub fn delete_ritual(&mut self, id: Uuid) -> Result<Ritual> {
        let ritual = self.rituals.delete_ritual(id)?;
        self.save_rituals()?;
        self.save_logs()?;
        Ok(ritual)
    }

    // ── Completion toggling ──────────────────────────────────────────

    /// Mark a ritual complete for today. The credited essence includes
    /// the flat streak bonus and any active boost multiplier; the new log
    /// stores the credited amount for exact reversal.
    pub fn complete_today(&mut self, ritual_id: Uuid) -> Result<ToggleReport> {
        let date = self.clock.today();
        let now_ms = self.clock.now_ms();
        let ritual = self.rituals.get(ritual_id)?;
        let logs = self.rituals.logs_for(ritual_id);
        let multiplier = ledger::boost_multiplier(&self.account, now_ms);

        let outcome = engine::plan_completion(ritual, &logs, date, multiplier)?;

        let log = CompletionLog::new(
            ritual_id,
            self.account.id,
            date,
            outcome.essence_delta,
            self.clock.now(),
        );
        self.rituals.append_log(log)?;
        {
            let ritual = self.rituals.get_mut(ritual_id)?;
            ritual.streak = outcome.streak_after;
            if let Some(broken) = outcome.broken_streak {
                ritual.last_broken_streak = Some(broken);
            }
        }
        ledger::apply_essence_delta(&mut self.account, outcome.essence_delta);
        ledger::sweep_expired(&mut self.account, now_ms);

        self.refresh_unlocks()?;
        self.save_rituals()?;
        self.save_logs()?;
        self.save_account()?;

        Ok(ToggleReport {
            ritual_id,
            date,
            streak: outcome.streak_after,
            essence_delta: outcome.essence_delta,
            balance: self.account.essence,
        })
    }

    /// Undo today's completion: removes the log and deducts exactly what
    /// it credited, clamped at a zero balance.
    pub fn undo_today(&mut self, ritual_id: Uuid) -> Result<ToggleReport> {
        let date = self.clock.today();
        let ritual = self.rituals.get(ritual_id)?;
        let logs = self.rituals.logs_for(ritual_id);

        let outcome = engine::plan_undo(ritual, &logs, date)?;

        self.rituals.remove_log(ritual_id, date)?;
        self.rituals.get_mut(ritual_id)?.streak = outcome.streak_after;
        ledger::apply_essence_delta(&mut self.account, outcome.essence_delta);

        self.save_rituals()?;
        self.save_logs()?;
        self.save_account()?;

        Ok(ToggleReport {
            ritual_id,
            date,
            streak: outcome.streak_after,
            essence_delta: outcome.essence_delta,
            balance: self.account.essence,
        })
    }

    // ── Shop & inventory ─────────────────────────────────────────────

    pub fn purchase(&mut self, item_id: &str) -> Result<&'static ShopItem> {
        let item = find_item(item_id).ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        ledger::purchase(&mut self.account, item)?;
        self.save_account()?;
        Ok(item)
    }

    /// Consume one owned instance of an item. Restore-streak items need a
    /// target ritual with a broken streak on record; the target check runs
    /// before anything mutates.
    pub fn use_item(&mut self, item_id: &str, target_ritual: Option<Uuid>) -> Result<()> {
        let item = find_item(item_id).ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()))?;
        let now_ms = self.clock.now_ms();

        let restore = if item.effect == ItemEffect::RestoreStreak {
            let ritual_id = target_ritual.ok_or_else(|| {
                CoreError::Validation(ValidationError::MissingField("ritual".to_string()))
            })?;
            let ritual = self.rituals.get(ritual_id)?;
            let broken = ritual.last_broken_streak.ok_or(CoreError::NothingToRestore)?;
            Some((ritual_id, broken))
        } else {
            None
        };

        ledger::consume_item(&mut self.account, item, now_ms)?;

        if let Some((ritual_id, broken)) = restore {
            let ritual = self.rituals.get_mut(ritual_id)?;
            ritual.streak += broken;
            ritual.last_broken_streak = None;
            self.save_rituals()?;
        }
        self.save_account()?;
        Ok(())
    }

    // ── Derived views ────────────────────────────────────────────────

    /// Evaluate the achievement catalog. `post_count` comes from the
    /// external social feed. Fresh unlocks are recorded and persisted.
    pub fn achievements(&mut self, post_count: u32) -> Result<Vec<AchievementStatus>> {
        let snap = crate::achievements::ProgressSnapshot {
            rituals: self.rituals.rituals(),
            logs: self.rituals.logs(),
            essence: self.account.essence,
            post_count,
            today: self.clock.today(),
        };
        let statuses = evaluate(&snap, &mut self.unlocks, self.clock.now());
        self.save_unlocks()?;
        Ok(statuses)
    }

    pub fn stats(&self, window_days: u32) -> ProgressReport {
        ProgressAnalyzer::with_window(window_days).analyze(
            self.rituals.rituals(),
            self.rituals.logs(),
            self.clock.today(),
        )
    }

    // ── Export / import ──────────────────────────────────────────────

    pub fn export_json(&self) -> Result<String> {
        let snapshot = ExportSnapshot {
            version: EXPORT_VERSION.to_string(),
            exported_at: self.clock.now(),
            account: self.account.clone(),
            rituals: self.rituals.rituals().to_vec(),
            logs: self.rituals.logs().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Replace the whole state from an exported snapshot and persist it.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let snapshot: ExportSnapshot = serde_json::from_str(json)?;
        if snapshot.version.is_empty() {
            return Err(CoreError::Validation(ValidationError::MissingField(
                "version".to_string(),
            )));
        }
        self.account = snapshot.account;
        self.rituals = RitualStore::from_parts(snapshot.rituals, snapshot.logs);
        self.save_rituals()?;
        self.save_logs()?;
        self.save_account()?;
        Ok(())
    }

    /// Log history as CSV: date, ritual title, difficulty, essence gained.
    pub fn export_csv(&self) -> String {
        let mut out = String::from("date,ritual,difficulty,essence_gained\n");
        for log in self.rituals.logs() {
            let (title, difficulty) = self
                .rituals
                .get(log.ritual_id)
                .map(|r| (r.title.as_str(), r.difficulty.label()))
                .unwrap_or(("unknown", "n/a"));
            out.push_str(&format!(
                "{},\"{}\",{},{}\n",
                log.date,
                title.replace('"', "\"\""),
                difficulty,
                log.essence_gained
            ));
        }
        out
    }

    // ── Persistence ──────────────────────────────────────────────────

    fn refresh_unlocks(&mut self) -> Result<()> {
        let snap = crate::achievements::ProgressSnapshot {
            rituals: self.rituals.rituals(),
            logs: self.rituals.logs(),
            essence: self.account.essence,
            post_count: 0,
            today: self.clock.today(),
        };
        evaluate(&snap, &mut self.unlocks, self.clock.now());
        self.save_unlocks()
    }

    fn save_account(&self) -> Result<()> {
        save_doc(&self.store, keys::ACCOUNT, &self.account)
    }

    fn save_rituals(&self) -> Result<()> {
        save_doc(&self.store, keys::RITUALS, &self.rituals.rituals())
    }

    fn save_logs(&self) -> Result<()> {
        save_doc(&self.store, keys::LOGS, &self.rituals.logs())
    }

    fn save_unlocks(&self) -> Result<()> {
        save_doc(&self.store, keys::UNLOCKS, &self.unlocks)
    }
}

fn load_doc<T: serde::de::DeserializeOwned>(store: &impl Store, key: &str) -> Result<Option<T>> {
    match store.load(key)? {
        Some(bytes) => {
            let value = serde_json::from_slice(&bytes).map_err(|e| {
                CoreError::Storage(crate::error::StorageError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

fn save_doc<T: Serialize>(store: &impl Store, key: &str, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    store.save(key, &bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::Difficulty;
    use crate::storage::MemoryStore;

    fn day(s: &str) -> chrono::NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_open_creates_fresh_account() {
        let clock = FixedClock::on(day("2026-08-01"));
        let service = HabitService::open(MemoryStore::new(), clock, "keeper").unwrap();
        assert_eq!(service.account().username, "keeper");
        assert_eq!(service.account().essence, 0);
        assert!(service.rituals().is_empty());
    }

    #[test]
    fn test_create_and_complete_on_a_pinned_day() {
        let clock = FixedClock::on(day("2026-08-01"));
        let mut service = HabitService::open(MemoryStore::new(), clock, "keeper").unwrap();
        let ritual = service
            .create_ritual(RitualDraft::new("Stretch", Difficulty::Novice))
            .unwrap();
        let report = service.complete_today(ritual.id).unwrap();
        assert_eq!(report.date, day("2026-08-01"));
        assert_eq!(report.streak, 1);
        assert_eq!(report.balance, 10);
    }
}

//! Ritual repository: the authoritative collections of rituals and
//! completion logs for one account.
//!
//! Rituals and logs reference each other by id only. A date index per
//! ritual backs the one-log-per-day invariant and the engine's
//! yesterday lookups without scanning the full log list.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::model::{CompletionLog, Ritual, RitualDraft};

#[derive(Debug, Default)]
pub struct RitualStore {
    rituals: Vec<Ritual>,
    logs: Vec<CompletionLog>,
    dates_by_ritual: HashMap<Uuid, HashSet<NaiveDate>>,
}

impl RitualStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted collections.
    pub fn from_parts(rituals: Vec<Ritual>, logs: Vec<CompletionLog>) -> Self {
        let mut dates_by_ritual: HashMap<Uuid, HashSet<NaiveDate>> = HashMap::new();
        for log in &logs {
            dates_by_ritual.entry(log.ritual_id).or_default().insert(log.date);
        }
        Self {
            rituals,
            logs,
            dates_by_ritual,
        }
    }

    // ── Rituals ──────────────────────────────────────────────────────

    /// Validate a draft and add the ritual with a fresh id and zero streak.
    pub fn create_ritual(
        &mut self,
        account_id: Uuid,
        draft: RitualDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Ritual> {
        draft.validate()?;
        let essence_reward = draft.resolved_reward();
        let ritual = Ritual {
            id: Uuid::new_v4(),
            account_id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            difficulty: draft.difficulty,
            frequency: draft.frequency,
            essence_reward,
            streak: 0,
            last_broken_streak: None,
            created_at,
        };
        self.rituals.push(ritual.clone());
        Ok(ritual)
    }

    /// Remove a ritual and cascade-delete its logs.
    pub fn delete_ritual(&mut self, id: Uuid) -> Result<Ritual> {
        let pos = self
            .rituals
            .iter()
            .position(|r| r.id == id)
            .ok_or(CoreError::RitualNotFound(id))?;
        let ritual = self.rituals.remove(pos);
        self.logs.retain(|l| l.ritual_id != id);
        self.dates_by_ritual.remove(&id);
        Ok(ritual)
    }

    pub fn get(&self, id: Uuid) -> Result<&Ritual> {
        self.rituals
            .iter()
            .find(|r| r.id == id)
            .ok_or(CoreError::RitualNotFound(id))
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Ritual> {
        self.rituals
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::RitualNotFound(id))
    }

    pub fn rituals(&self) -> &[Ritual] {
        &self.rituals
    }

    // ── Logs ─────────────────────────────────────────────────────────

    pub fn logs(&self) -> &[CompletionLog] {
        &self.logs
    }

    pub fn logs_for(&self, ritual_id: Uuid) -> Vec<CompletionLog> {
        self.logs
            .iter()
            .filter(|l| l.ritual_id == ritual_id)
            .cloned()
            .collect()
    }

    pub fn is_completed_on(&self, ritual_id: Uuid, date: NaiveDate) -> bool {
        self.dates_by_ritual
            .get(&ritual_id)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Append a log, enforcing one log per (ritual, date).
    pub fn append_log(&mut self, log: CompletionLog) -> Result<()> {
        self.get(log.ritual_id)?;
        if self.is_completed_on(log.ritual_id, log.date) {
            return Err(CoreError::AlreadyCompleted(log.date));
        }
        self.dates_by_ritual
            .entry(log.ritual_id)
            .or_default()
            .insert(log.date);
        self.logs.push(log);
        Ok(())
    }

    /// Remove the log for a (ritual, date) pair and return it.
    pub fn remove_log(&mut self, ritual_id: Uuid, date: NaiveDate) -> Result<CompletionLog> {
        let pos = self
            .logs
            .iter()
            .position(|l| l.ritual_id == ritual_id && l.date == date)
            .ok_or(CoreError::NothingToUndo(date))?;
        let log = self.logs.remove(pos);
        if let Some(dates) = self.dates_by_ritual.get_mut(&ritual_id) {
            dates.remove(&date);
        }
        Ok(log)
    }

    /// Consume the store back into its persistable collections.
    pub fn into_parts(self) -> (Vec<Ritual>, Vec<CompletionLog>) {
        (self.rituals, self.logs)
    }
}

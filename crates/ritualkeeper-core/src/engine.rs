//! Reward engine: the streak/essence state machine.
//!
//! Both operations are pure plans over immutable inputs. They compute the
//! new streak value, the signed essence delta and the log mutation; the
//! caller (the service layer) applies them to the repository and the
//! ledger afterwards, so a failed plan never leaves partial state behind.
//!
//! The engine is defined for `date == today` of the acting account's
//! clock. Editing arbitrary past days would require walking forward from
//! the edited day to rebuild every dependent streak and is deliberately
//! not supported.

use chrono::NaiveDate;

use crate::error::{CoreError, Result};
use crate::model::{CompletionLog, Ritual};

/// Flat bonus credited when a completion extends yesterday's chain.
/// Independent of difficulty.
pub const STREAK_BONUS: i64 = 10;

/// Plan for marking a ritual complete on a day.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    /// Streak value the ritual takes after the completion.
    pub streak_after: u32,
    /// Essence credited to the account (buff multiplier already applied).
    pub essence_delta: i64,
    /// The run length that was lost, when this completion lands after a
    /// gap and a previous run existed. Feeds `Ritual::last_broken_streak`.
    pub broken_streak: Option<u32>,
}

/// Plan for undoing a completion on a day.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoOutcome {
    /// Streak value the ritual recovers to after the removal.
    pub streak_after: u32,
    /// Negative delta: the exact `essence_gained` stored on the removed
    /// log, never a recomputation under current rules.
    pub essence_delta: i64,
}

fn has_log_on(logs: &[CompletionLog], ritual: &Ritual, date: NaiveDate) -> bool {
    logs.iter().any(|l| l.ritual_id == ritual.id && l.date == date)
}

fn find_log_on<'a>(
    logs: &'a [CompletionLog],
    ritual: &Ritual,
    date: NaiveDate,
) -> Option<&'a CompletionLog> {
    logs.iter().find(|l| l.ritual_id == ritual.id && l.date == date)
}

/// Compute the effect of completing `ritual` on `date`.
///
/// `multiplier` is the effective essence-boost multiplier in force at the
/// moment of completion (1.0 when no buff is active). The credited amount
/// is rounded to the nearest whole essence.
///
/// # Errors
/// [`CoreError::AlreadyCompleted`] when a log already exists for `date`;
/// completion is a boolean per day, never a counter.
pub fn plan_completion(
    ritual: &Ritual,
    logs_for_ritual: &[CompletionLog],
    date: NaiveDate,
    multiplier: f64,
) -> Result<CompletionOutcome> {
    if has_log_on(logs_for_ritual, ritual, date) {
        return Err(CoreError::AlreadyCompleted(date));
    }

    let continues = date
        .pred_opt()
        .map(|yesterday| has_log_on(logs_for_ritual, ritual, yesterday))
        .unwrap_or(false);

    let streak_after = if continues { ritual.streak + 1 } else { 1 };
    let bonus = if continues { STREAK_BONUS } else { 0 };
    let base = i64::from(ritual.essence_reward) + bonus;
    let essence_delta = ((base as f64) * multiplier).round() as i64;

    let broken_streak = if !continues && ritual.streak > 0 {
        Some(ritual.streak)
    } else {
        None
    };

    Ok(CompletionOutcome {
        streak_after,
        essence_delta,
        broken_streak,
    })
}

/// Compute the effect of undoing the completion of `ritual` on `date`.
///
/// Streak recovery is not blindly `streak - 1`: it only steps back when
/// yesterday's log survives the removal, otherwise the chain assumption is
/// gone and the streak drops to zero.
///
/// # Errors
/// [`CoreError::NothingToUndo`] when no log exists for `date`.
pub fn plan_undo(
    ritual: &Ritual,
    logs_for_ritual: &[CompletionLog],
    date: NaiveDate,
) -> Result<UndoOutcome> {
    let removed = find_log_on(logs_for_ritual, ritual, date)
        .ok_or(CoreError::NothingToUndo(date))?;

    // Yesterday's log is a different date, so checking the pre-removal set
    // is equivalent to checking the post-removal one.
    let had_yesterday = date
        .pred_opt()
        .map(|yesterday| has_log_on(logs_for_ritual, ritual, yesterday))
        .unwrap_or(false);

    let streak_after = if had_yesterday {
        ritual.streak.saturating_sub(1)
    } else {
        0
    };

    Ok(UndoOutcome {
        streak_after,
        essence_delta: -removed.essence_gained,
    })
}

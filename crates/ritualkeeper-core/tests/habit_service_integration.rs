//! End-to-end tests for the habit service.
//!
//! This test file verifies:
//! - Completion/undo round-trips through repository, ledger and storage
//! - Streak growth and reset across calendar days
//! - Buffs modifying credited essence
//! - Shop purchase atomicity and restore-streak semantics
//! - Persistence across service reopen and save-failure propagation

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Days, NaiveDate, Utc};
use ritualkeeper_core::{
    Clock, CoreError, Difficulty, HabitService, MemoryStore, RitualDraft,
};

/// Clock whose day can be advanced mid-test.
#[derive(Clone)]
struct SharedClock(Arc<Mutex<(NaiveDate, i64)>>);

impl SharedClock {
    fn starting(date: &str) -> Self {
        Self(Arc::new(Mutex::new((date.parse().unwrap(), 0))))
    }

    fn advance_days(&self, days: u64) {
        let mut inner = self.0.lock().unwrap();
        inner.0 = inner.0.checked_add_days(Days::new(days)).unwrap();
        inner.1 += days as i64 * 24 * 60 * 60 * 1000;
    }

    fn advance_ms(&self, ms: i64) {
        self.0.lock().unwrap().1 += ms;
    }
}

impl Clock for SharedClock {
    fn today(&self) -> NaiveDate {
        self.0.lock().unwrap().0
    }

    fn now_ms(&self) -> i64 {
        self.0.lock().unwrap().1
    }

    // Created-at stamps must track the simulated day, not the wall clock.
    fn now(&self) -> DateTime<Utc> {
        self.today().and_hms_opt(12, 0, 0).unwrap().and_utc()
    }
}

fn service_on(date: &str) -> (HabitService<Arc<MemoryStore>, SharedClock>, SharedClock) {
    let clock = SharedClock::starting(date);
    let service = HabitService::open(Arc::new(MemoryStore::new()), clock.clone(), "ash").unwrap();
    (service, clock)
}

#[test]
fn test_boundary_scenario_no_bonus_then_bonus() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Meditate", Difficulty::Novice).with_reward(10))
        .unwrap();

    let first = service.complete_today(ritual.id).unwrap();
    assert_eq!(first.streak, 1);
    assert_eq!(first.essence_delta, 10);
    assert_eq!(first.balance, 10);

    clock.advance_days(1);
    let second = service.complete_today(ritual.id).unwrap();
    assert_eq!(second.streak, 2);
    assert_eq!(second.essence_delta, 20);
    assert_eq!(second.balance, 30);
}

#[test]
fn test_streak_resets_after_gap() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Run", Difficulty::Novice))
        .unwrap();

    assert_eq!(service.complete_today(ritual.id).unwrap().streak, 1);
    clock.advance_days(2);
    let after_gap = service.complete_today(ritual.id).unwrap();
    assert_eq!(after_gap.streak, 1);
    // The one-day run is remembered for the restore item.
    assert_eq!(service.get_ritual(ritual.id).unwrap().last_broken_streak, Some(1));
}

#[test]
fn test_complete_undo_roundtrip_exact() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Read", Difficulty::Adept))
        .unwrap();

    for _ in 0..3 {
        service.complete_today(ritual.id).unwrap();
        clock.advance_days(1);
    }
    let balance_before = service.account().essence;
    let streak_before = service.get_ritual(ritual.id).unwrap().streak;

    service.complete_today(ritual.id).unwrap();
    let undone = service.undo_today(ritual.id).unwrap();

    assert_eq!(undone.streak, streak_before);
    assert_eq!(service.account().essence, balance_before);
}

#[test]
fn test_double_complete_and_double_undo_rejected() {
    let (mut service, _clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Write", Difficulty::Novice))
        .unwrap();

    service.complete_today(ritual.id).unwrap();
    assert!(matches!(
        service.complete_today(ritual.id).unwrap_err(),
        CoreError::AlreadyCompleted(_)
    ));
    service.undo_today(ritual.id).unwrap();
    assert!(matches!(
        service.undo_today(ritual.id).unwrap_err(),
        CoreError::NothingToUndo(_)
    ));
    // State unchanged by the failed undo.
    assert_eq!(service.account().essence, 0);
    assert_eq!(service.get_ritual(ritual.id).unwrap().streak, 0);
}

#[test]
fn test_active_buff_multiplies_credited_essence() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Train", Difficulty::Novice).with_reward(10))
        .unwrap();

    // Earn enough for the elixir, buy and drink it.
    for _ in 0..60 {
        service.complete_today(ritual.id).unwrap();
        clock.advance_days(1);
    }
    let balance = service.account().essence;
    service.purchase("potion_discipline").unwrap();
    assert_eq!(service.account().essence, balance - 500);
    service.use_item("potion_discipline", None).unwrap();
    assert_eq!(service.account().active_buffs.len(), 1);

    // Streak continues, so base is 10 + 10, boosted by 1.5.
    let boosted = service.complete_today(ritual.id).unwrap();
    assert_eq!(boosted.essence_delta, 30);

    // Undo returns exactly the boosted amount.
    let balance_after = service.account().essence;
    let undone = service.undo_today(ritual.id).unwrap();
    assert_eq!(undone.essence_delta, -30);
    assert_eq!(service.account().essence, balance_after - 30);

    // Past expiry the buff is inert.
    service.complete_today(ritual.id).unwrap();
    clock.advance_days(1);
    clock.advance_ms(1);
    let plain = service.complete_today(ritual.id).unwrap();
    assert_eq!(plain.essence_delta, 20);
}

#[test]
fn test_purchase_atomicity() {
    let (mut service, _clock) = service_on("2026-08-01");
    let grind = service
        .create_ritual(RitualDraft::new("Grind", Difficulty::Novice).with_reward(400))
        .unwrap();
    service.complete_today(grind.id).unwrap();
    assert_eq!(service.account().essence, 400);

    // 400 against a cost of 500: rejected, nothing changes.
    let err = service.purchase("potion_discipline").unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientEssence { balance: 400, cost: 500 }
    ));
    assert_eq!(service.account().essence, 400);
    assert!(service.account().inventory.is_empty());

    // Exactly 500: accepted, balance drained, item added once.
    let topup = service
        .create_ritual(RitualDraft::new("Topup", Difficulty::Novice).with_reward(100))
        .unwrap();
    service.complete_today(topup.id).unwrap();
    assert_eq!(service.account().essence, 500);
    service.purchase("potion_discipline").unwrap();
    assert_eq!(service.account().essence, 0);
    assert_eq!(service.account().owned_count("potion_discipline"), 1);
}

#[test]
fn test_restore_streak_item() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Row", Difficulty::Novice).with_reward(1000))
        .unwrap();

    // Build a 5-day run, break it, then restore.
    for _ in 0..5 {
        service.complete_today(ritual.id).unwrap();
        clock.advance_days(1);
    }
    clock.advance_days(3);
    service.complete_today(ritual.id).unwrap();
    assert_eq!(service.get_ritual(ritual.id).unwrap().streak, 1);
    assert_eq!(service.get_ritual(ritual.id).unwrap().last_broken_streak, Some(5));

    service.purchase("potion_oblivion").unwrap();
    service.use_item("potion_oblivion", Some(ritual.id)).unwrap();
    let restored = service.get_ritual(ritual.id).unwrap();
    assert_eq!(restored.streak, 6);
    assert_eq!(restored.last_broken_streak, None);

    // A second potion has nothing left to restore; the check runs before
    // the inventory is touched.
    service.purchase("potion_oblivion").unwrap();
    let err = service.use_item("potion_oblivion", Some(ritual.id)).unwrap_err();
    assert!(matches!(err, CoreError::NothingToRestore));
    assert_eq!(service.account().owned_count("potion_oblivion"), 1);
}

#[test]
fn test_state_survives_reopen() {
    let store = Arc::new(MemoryStore::new());
    let clock = SharedClock::starting("2026-08-01");
    let ritual_id = {
        let mut service =
            HabitService::open(store.clone(), clock.clone(), "ash").unwrap();
        let ritual = service
            .create_ritual(RitualDraft::new("Persist", Difficulty::Master))
            .unwrap();
        service.complete_today(ritual.id).unwrap();
        ritual.id
    };

    let reopened = HabitService::open(store, clock, "ignored").unwrap();
    assert_eq!(reopened.account().username, "ash");
    assert_eq!(reopened.account().essence, 50);
    let ritual = reopened.get_ritual(ritual_id).unwrap();
    assert_eq!(ritual.streak, 1);
    assert_eq!(reopened.logs().len(), 1);
}

#[test]
fn test_save_failure_propagates_as_storage_error() {
    let store = Arc::new(MemoryStore::new());
    let clock = SharedClock::starting("2026-08-01");
    let mut service = HabitService::open(store.clone(), clock, "ash").unwrap();

    store.fail_saves(true);
    let err = service
        .create_ritual(RitualDraft::new("Doomed", Difficulty::Novice))
        .unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
}

#[test]
fn test_delete_ritual_cascades() {
    let (mut service, _clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Fleeting", Difficulty::Novice))
        .unwrap();
    service.complete_today(ritual.id).unwrap();
    service.delete_ritual(ritual.id).unwrap();
    assert!(service.rituals().is_empty());
    assert!(service.logs().is_empty());
    assert!(matches!(
        service.complete_today(ritual.id).unwrap_err(),
        CoreError::RitualNotFound(_)
    ));
}

#[test]
fn test_export_import_roundtrip() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Archive", Difficulty::Adept))
        .unwrap();
    service.complete_today(ritual.id).unwrap();
    clock.advance_days(1);
    service.complete_today(ritual.id).unwrap();

    let json = service.export_json().unwrap();

    let (mut fresh, _clock) = service_on("2026-09-01");
    fresh.import_json(&json).unwrap();
    assert_eq!(fresh.account().username, "ash");
    assert_eq!(fresh.account().essence, service.account().essence);
    assert_eq!(fresh.logs().len(), 2);
    assert_eq!(fresh.get_ritual(ritual.id).unwrap().streak, 2);

    let csv = fresh.export_csv();
    assert!(csv.starts_with("date,ritual,difficulty,essence_gained\n"));
    assert!(csv.contains("\"Archive\",adept,"));
}

#[test]
fn test_achievements_unlock_once_and_persist() {
    let (mut service, clock) = service_on("2026-08-01");
    let ritual = service
        .create_ritual(RitualDraft::new("Climb", Difficulty::Novice))
        .unwrap();
    for _ in 0..7 {
        service.complete_today(ritual.id).unwrap();
        clock.advance_days(1);
    }

    let statuses = service.achievements(0).unwrap();
    let week = statuses.iter().find(|s| s.def.id == "ach-streak-7").unwrap();
    assert!(week.unlocked);
    let first_stamp = week.unlocked_at.unwrap();

    // Breaking the streak regresses progress, but the recorded timestamp
    // is never re-stamped.
    clock.advance_days(5);
    service.complete_today(ritual.id).unwrap();
    let statuses = service.achievements(0).unwrap();
    let week = statuses.iter().find(|s| s.def.id == "ach-streak-7").unwrap();
    assert_eq!(week.progress, 1);
    assert!(!week.unlocked);
    assert_eq!(week.unlocked_at.unwrap(), first_stamp);
}

#[test]
fn test_perfect_week_survives_midweek_ritual_creation() {
    let (mut service, clock) = service_on("2026-08-01");
    let veteran = service
        .create_ritual(RitualDraft::new("Veteran", Difficulty::Novice))
        .unwrap();
    for _ in 0..6 {
        service.complete_today(veteran.id).unwrap();
        clock.advance_days(1);
    }

    // Day seven: a second ritual appears and both get completed.
    let newcomer = service
        .create_ritual(RitualDraft::new("Newcomer", Difficulty::Novice))
        .unwrap();
    service.complete_today(veteran.id).unwrap();
    service.complete_today(newcomer.id).unwrap();

    let statuses = service.achievements(0).unwrap();
    let week = statuses
        .iter()
        .find(|s| s.def.id == "ach-perfect-week")
        .unwrap();
    assert_eq!(week.progress, 7);
    assert!(week.unlocked);
}

#[test]
fn test_suggestions_fall_back_locally() {
    use ritualkeeper_core::{HttpSuggestionProvider, SuggestionProvider};

    let (service, _clock) = service_on("2026-08-01");
    let provider = HttpSuggestionProvider::new("");
    assert!(provider.suggest("x").is_err());
    let suggestions = service.suggest_rituals(&provider, "tame the mornings").unwrap();
    assert_eq!(suggestions.len(), 3);
    assert!(service.suggest_rituals(&provider, "   ").is_err());
}

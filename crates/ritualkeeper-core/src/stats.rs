//! Derived progress analytics: completion heatmap, streak summary and
//! completion rates. Read-only over rituals and logs; no rendering.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{CompletionLog, Frequency, Ritual};

/// Default heatmap window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// One calendar day of the heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub completions: u32,
    pub essence: i64,
    /// 0.0 .. 1.0 relative to the busiest day in the window.
    pub intensity: f64,
}

impl DayCell {
    /// Terminal block character for the intensity bucket.
    pub fn heat_char(&self) -> char {
        match self.intensity {
            i if i <= 0.0 => ' ',
            i if i <= 0.25 => '░',
            i if i <= 0.5 => '▒',
            i if i <= 0.75 => '▓',
            _ => '█',
        }
    }
}

/// Aggregated view over a trailing window ending today.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    /// Oldest day first, today last.
    pub cells: Vec<DayCell>,
    pub total_completions: u32,
    pub total_essence: i64,
    /// Longest consecutive run found anywhere in the log history.
    pub best_streak: u32,
    /// Highest current streak among rituals.
    pub active_streak: u32,
    /// Completions over (daily rituals x days), last 7 days, clamped to 1.0.
    pub rate_7d: f64,
    /// Same over the last 30 days.
    pub rate_30d: f64,
}

/// Computes [`ProgressReport`]s from rituals and logs.
#[derive(Debug, Clone)]
pub struct ProgressAnalyzer {
    window_days: u32,
}

impl Default for ProgressAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAnalyzer {
    pub fn new() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_window(window_days: u32) -> Self {
        Self {
            window_days: window_days.max(1),
        }
    }

    pub fn analyze(&self, rituals: &[Ritual], logs: &[CompletionLog], today: NaiveDate) -> ProgressReport {
        let mut per_day: HashMap<NaiveDate, (u32, i64)> = HashMap::new();
        for log in logs {
            let entry = per_day.entry(log.date).or_default();
            entry.0 += 1;
            entry.1 += log.essence_gained;
        }

        let days: Vec<NaiveDate> = (0..u64::from(self.window_days))
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .collect();

        let peak = days
            .iter()
            .filter_map(|d| per_day.get(d))
            .map(|(count, _)| *count)
            .max()
            .unwrap_or(0);

        let cells: Vec<DayCell> = days
            .iter()
            .map(|&date| {
                let (completions, essence) = per_day.get(&date).copied().unwrap_or((0, 0));
                let intensity = if peak == 0 {
                    0.0
                } else {
                    f64::from(completions) / f64::from(peak)
                };
                DayCell {
                    date,
                    completions,
                    essence,
                    intensity,
                }
            })
            .collect();

        ProgressReport {
            total_completions: cells.iter().map(|c| c.completions).sum(),
            total_essence: cells.iter().map(|c| c.essence).sum(),
            best_streak: best_streak(logs),
            active_streak: rituals.iter().map(|r| r.streak).max().unwrap_or(0),
            rate_7d: completion_rate(rituals, &per_day, today, 7),
            rate_30d: completion_rate(rituals, &per_day, today, 30),
            cells,
        }
    }
}

/// Longest consecutive-day run across all rituals, reconstructed from the
/// raw log dates rather than the stored counters.
fn best_streak(logs: &[CompletionLog]) -> u32 {
    let mut dates_by_ritual: HashMap<Uuid, Vec<NaiveDate>> = HashMap::new();
    for log in logs {
        dates_by_ritual.entry(log.ritual_id).or_default().push(log.date);
    }

    let mut best = 0u32;
    for dates in dates_by_ritual.values_mut() {
        dates.sort_unstable();
        dates.dedup();
        let mut run = 1u32;
        for pair in dates.windows(2) {
            if pair[0].succ_opt() == Some(pair[1]) {
                run += 1;
            } else {
                run = 1;
            }
            best = best.max(run);
        }
        if !dates.is_empty() {
            best = best.max(1);
        }
    }
    best
}

fn completion_rate(
    rituals: &[Ritual],
    per_day: &HashMap<NaiveDate, (u32, i64)>,
    today: NaiveDate,
    days: u64,
) -> f64 {
    // Weekly rituals are not expected daily, so only daily rituals form
    // the denominator.
    let daily = rituals
        .iter()
        .filter(|r| r.frequency == Frequency::Daily)
        .count();
    if daily == 0 {
        return 0.0;
    }
    let completed: u32 = (0..days)
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .filter_map(|d| per_day.get(&d))
        .map(|(count, _)| *count)
        .sum();
    let possible = daily as f64 * days as f64;
    (f64::from(completed) / possible).min(1.0)
}

//! Progress statistics commands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Summary over a trailing window
    Summary {
        /// Window size in days
        #[arg(long)]
        days: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Completion heatmap strip for the window
    Heatmap {
        /// Window size in days
        #[arg(long)]
        days: Option<u32>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    match action {
        StatsAction::Summary { days, json } => {
            let service = super::open_service()?;
            let report = service.stats(days.unwrap_or(config.stats.window_days));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            println!("completions: {}", report.total_completions);
            println!("essence earned: {}", report.total_essence);
            println!("best streak: {}", report.best_streak);
            println!("active streak: {}", report.active_streak);
            println!("7-day rate: {:.0}%", report.rate_7d * 100.0);
            println!("30-day rate: {:.0}%", report.rate_30d * 100.0);
        }
        StatsAction::Heatmap { days } => {
            let service = super::open_service()?;
            let report = service.stats(days.unwrap_or(config.stats.window_days));
            let strip: String = report.cells.iter().map(|c| c.heat_char()).collect();
            let first = report.cells.first().map(|c| c.date.to_string()).unwrap_or_default();
            let last = report.cells.last().map(|c| c.date.to_string()).unwrap_or_default();
            println!("{first} |{strip}| {last}");
        }
    }
    Ok(())
}

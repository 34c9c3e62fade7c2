//! Achievement commands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List achievements with progress
    List {
        /// Only show unlocked achievements
        #[arg(long)]
        unlocked: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AchievementsAction::List { unlocked, json } => {
            let mut service = super::open_service()?;
            // The social feed is external; the CLI has no posts to count.
            let statuses = service.achievements(0)?;
            let filtered: Vec<_> = statuses
                .into_iter()
                .filter(|s| !unlocked || s.unlocked)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
                return Ok(());
            }
            for status in filtered {
                let mark = if status.unlocked { "x" } else { " " };
                println!(
                    "[{mark}] {:<22} {:>5}/{:<5} {}",
                    status.def.name, status.progress, status.def.target, status.def.description,
                );
            }
        }
    }
    Ok(())
}

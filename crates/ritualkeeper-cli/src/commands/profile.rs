//! Profile commands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the account, rank and progress to the next rank
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Show { json } => {
            let service = super::open_service()?;
            let account = service.account();
            if json {
                println!("{}", serde_json::to_string_pretty(account)?);
                return Ok(());
            }
            let rank = service.rank();
            let next = rank.next_threshold();
            let progress = (account.essence as f64 / next as f64 * 100.0).min(100.0);
            println!("{} -- {}", account.username, rank.title());
            println!("essence: {} ({progress:.0}% toward {next})", account.essence);
            println!("items owned: {}", account.inventory.len());
        }
    }
    Ok(())
}

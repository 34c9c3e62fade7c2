use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ritualkeeper-cli", version, about = "Ritualkeeper CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ritual management and completion toggling
    Ritual {
        #[command(subcommand)]
        action: commands::ritual::RitualAction,
    },
    /// Shop catalog and purchases
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Inventory and item consumption
    Inventory {
        #[command(subcommand)]
        action: commands::inventory::InventoryAction,
    },
    /// Account profile and rank
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Achievement progress
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// AI ritual suggestions for a goal
    Suggest {
        /// The goal to suggest rituals for
        goal: String,
    },
    /// Data export and import
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ritual { action } => commands::ritual::run(action),
        Commands::Shop { action } => commands::shop::run(action),
        Commands::Inventory { action } => commands::inventory::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Achievements { action } => commands::achievements::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Suggest { goal } => commands::suggest::run(&goal),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

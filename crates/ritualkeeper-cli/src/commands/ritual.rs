//! Ritual management commands.

use clap::Subcommand;
use ritualkeeper_core::{popular_templates, Difficulty, Frequency, RitualDraft, RITUAL_LIBRARY};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum RitualAction {
    /// Create a new ritual
    Create {
        /// Ritual title
        title: String,
        /// Ritual description
        #[arg(long, default_value = "")]
        description: String,
        /// Difficulty: novice, adept or master
        #[arg(long, default_value = "novice")]
        difficulty: String,
        /// Frequency: daily or weekly
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Essence reward override (defaults from difficulty and frequency)
        #[arg(long)]
        reward: Option<u32>,
    },
    /// Create a ritual from the template library
    Import {
        /// Template id (see `ritual templates`)
        template_id: String,
    },
    /// List the template library
    Templates {
        /// Only show popular templates
        #[arg(long)]
        popular: bool,
    },
    /// List rituals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one ritual with its log history
    Show {
        /// Ritual ID
        id: String,
    },
    /// Delete a ritual and its logs
    Delete {
        /// Ritual ID
        id: String,
    },
    /// Mark a ritual complete for today
    Complete {
        /// Ritual ID
        id: String,
    },
    /// Undo today's completion
    Undo {
        /// Ritual ID
        id: String,
    },
}

pub fn run(action: RitualAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RitualAction::Create {
            title,
            description,
            difficulty,
            frequency,
            reward,
        } => {
            let difficulty = Difficulty::parse(&difficulty)
                .ok_or("difficulty must be one of: novice, adept, master")?;
            let frequency =
                Frequency::parse(&frequency).ok_or("frequency must be one of: daily, weekly")?;
            let mut draft = RitualDraft::new(title, difficulty)
                .with_description(description)
                .with_frequency(frequency);
            if let Some(reward) = reward {
                draft = draft.with_reward(reward);
            }
            let mut service = super::open_service()?;
            let ritual = service.create_ritual(draft)?;
            println!("created {} ({})", ritual.title, ritual.id);
            println!("  reward: {} essence", ritual.essence_reward);
        }
        RitualAction::Import { template_id } => {
            let mut service = super::open_service()?;
            let ritual = service.create_from_template(&template_id)?;
            println!("imported {} ({})", ritual.title, ritual.id);
        }
        RitualAction::Templates { popular } => {
            let templates = if popular {
                popular_templates()
            } else {
                RITUAL_LIBRARY.iter().collect()
            };
            for template in templates {
                println!(
                    "{:<18} [{:>6}] {:<24} {} essence",
                    template.id,
                    template.difficulty.label(),
                    template.title,
                    template.essence_reward,
                );
            }
        }
        RitualAction::List { json } => {
            let service = super::open_service()?;
            if json {
                println!("{}", serde_json::to_string_pretty(service.rituals())?);
            } else if service.rituals().is_empty() {
                println!("no rituals yet; create one with `ritual create`");
            } else {
                for ritual in service.rituals() {
                    println!(
                        "{}  {:<30} streak {:>3}  [{}]",
                        ritual.id,
                        ritual.title,
                        ritual.streak,
                        ritual.difficulty.label(),
                    );
                }
            }
        }
        RitualAction::Show { id } => {
            let id: Uuid = id.parse()?;
            let service = super::open_service()?;
            let ritual = service.get_ritual(id)?;
            println!("{}", serde_json::to_string_pretty(ritual)?);
            let mut dates: Vec<_> = service
                .logs()
                .iter()
                .filter(|l| l.ritual_id == id)
                .map(|l| (l.date, l.essence_gained))
                .collect();
            dates.sort();
            for (date, essence) in dates {
                println!("  {date}  +{essence}");
            }
        }
        RitualAction::Delete { id } => {
            let id: Uuid = id.parse()?;
            let mut service = super::open_service()?;
            let ritual = service.delete_ritual(id)?;
            println!("deleted {}", ritual.title);
        }
        RitualAction::Complete { id } => {
            let id: Uuid = id.parse()?;
            let mut service = super::open_service()?;
            let report = service.complete_today(id)?;
            println!(
                "{}: streak {}, +{} essence (balance {})",
                report.date, report.streak, report.essence_delta, report.balance
            );
        }
        RitualAction::Undo { id } => {
            let id: Uuid = id.parse()?;
            let mut service = super::open_service()?;
            let report = service.undo_today(id)?;
            println!(
                "{}: streak {}, {} essence (balance {})",
                report.date, report.streak, report.essence_delta, report.balance
            );
        }
    }
    Ok(())
}

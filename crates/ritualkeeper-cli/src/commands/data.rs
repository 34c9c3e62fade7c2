//! Export/import commands.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum DataAction {
    /// Export the full account snapshot
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Export the log history as CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
    /// Import a previously exported snapshot, replacing current state
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Export { out, csv } => {
            let service = super::open_service()?;
            let content = if csv {
                service.export_csv()
            } else {
                service.export_json()?
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("exported to {}", path.display());
                }
                None => print!("{content}"),
            }
        }
        DataAction::Import { file } => {
            let content = std::fs::read_to_string(&file)?;
            let mut service = super::open_service()?;
            service.import_json(&content)?;
            println!(
                "imported {} rituals, {} logs",
                service.rituals().len(),
                service.logs().len()
            );
        }
    }
    Ok(())
}

//! Inventory commands.

use clap::Subcommand;
use ritualkeeper_core::find_item;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum InventoryAction {
    /// List owned items and active buffs
    List,
    /// Consume one instance of an item
    Use {
        /// Item id
        item_id: String,
        /// Target ritual for restore-streak items
        #[arg(long)]
        ritual: Option<String>,
    },
}

pub fn run(action: InventoryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        InventoryAction::List => {
            let service = super::open_service()?;
            let account = service.account();
            if account.inventory.is_empty() {
                println!("inventory is empty");
            }
            for item_id in &account.inventory {
                let name = find_item(item_id).map(|i| i.name).unwrap_or("unknown item");
                println!("{item_id:<18} {name}");
            }
            for buff in &account.active_buffs {
                println!(
                    "buff {} x{} until {}",
                    buff.item_id, buff.multiplier, buff.expires_at_ms
                );
            }
        }
        InventoryAction::Use { item_id, ritual } => {
            let target: Option<Uuid> = match ritual {
                Some(id) => Some(id.parse()?),
                None => None,
            };
            let mut service = super::open_service()?;
            service.use_item(&item_id, target)?;
            println!("used {item_id}");
        }
    }
    Ok(())
}

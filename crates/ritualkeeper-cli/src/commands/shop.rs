//! Shop commands.

use clap::Subcommand;
use ritualkeeper_core::SHOP_ITEMS;

#[derive(Subcommand)]
pub enum ShopAction {
    /// List the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Buy an item
    Buy {
        /// Item id (see `shop list`)
        item_id: String,
    },
}

pub fn run(action: ShopAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ShopAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(SHOP_ITEMS)?);
            } else {
                for item in SHOP_ITEMS {
                    println!(
                        "{:<18} {:>5} essence  [{:<9}] {}",
                        item.id,
                        item.cost,
                        item.rarity.label(),
                        item.name,
                    );
                }
            }
        }
        ShopAction::Buy { item_id } => {
            let mut service = super::open_service()?;
            let item = service.purchase(&item_id)?;
            println!(
                "bought {} for {} essence (balance {})",
                item.name,
                item.cost,
                service.account().essence
            );
        }
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use eyre::{bail, OptionExt, Result};
use mensa_client::{
    CartEvents, CartManager, FileCustomizationStore, HttpCartGateway, MenuService,
};
use mensa_primitives::{AddonId, CustomizationChoice, ItemId, LineId, MenuItem, SizeOption};

use crate::cli::Environment;
use crate::defaults;
use crate::output::CartPage;

/// Inspect and mutate the cart
#[derive(Debug, Parser)]
pub struct CartCommand {
    #[command(subcommand)]
    command: CartSubCommand,
}

#[derive(Debug, Subcommand)]
enum CartSubCommand {
    /// Show the cart with customizations applied
    Show,
    /// Add one unit of an item, optionally customized
    Add {
        item_id: ItemId,
        /// Size option by name, e.g. "Large"
        #[arg(long)]
        size: Option<String>,
        /// Add-on id, repeatable
        #[arg(long = "addon", value_name = "ADDON_ID")]
        addons: Vec<AddonId>,
    },
    /// Set a line's quantity (floored at 1)
    Qty { line_id: LineId, qty: i64 },
    /// Remove a line
    Rm { line_id: LineId },
    /// Empty the cart
    Clear,
}

impl CartCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let engine = engine(environment);

        let cart = match self.command {
            CartSubCommand::Show => engine.display_cart().await?,
            CartSubCommand::Add {
                item_id,
                size,
                addons,
            } => {
                let item = find_item(environment, item_id).await?;
                let choice = build_choice(&item, size.as_deref(), &addons)?;
                engine.add_item(&item, choice.as_ref()).await?
            }
            CartSubCommand::Qty { line_id, qty } => engine.change_quantity(line_id, qty).await?,
            CartSubCommand::Rm { line_id } => engine.remove_line(line_id).await?,
            CartSubCommand::Clear => engine.clear_cart().await?,
        };

        environment.output.write(&CartPage(&cart));

        Ok(())
    }
}

fn engine(environment: &Environment) -> CartManager<HttpCartGateway, FileCustomizationStore> {
    let gateway = HttpCartGateway::new(environment.connection().clone());
    let store = FileCustomizationStore::open(defaults::customization_store_path());

    CartManager::new(gateway, store, CartEvents::new())
}

async fn find_item(environment: &Environment, item_id: ItemId) -> Result<MenuItem> {
    let service = MenuService::new(environment.connection().clone());
    let categories = service.categories().await?;

    categories
        .into_iter()
        .flat_map(|category| category.items)
        .find(|item| item.id == item_id)
        .ok_or_eyre(format!("no menu item with id {item_id}"))
}

/// Turn `--size`/`--addon` flags into a customization, validated against
/// the item's own options. No flags means no customization.
fn build_choice(
    item: &MenuItem,
    size: Option<&str>,
    addons: &[AddonId],
) -> Result<Option<CustomizationChoice>> {
    if size.is_none() && addons.is_empty() {
        return Ok(None);
    }

    let size = match size {
        Some(name) => item
            .size(name)
            .ok_or_eyre(format!("{} has no size option {name:?}", item.name))?
            .clone(),
        None => SizeOption::regular(),
    };

    for addon_id in addons {
        if item.addon(*addon_id).is_none() {
            bail!("{} has no add-on with id {addon_id}", item.name);
        }
    }

    Ok(Some(CustomizationChoice {
        size,
        addon_ids: addons.to_vec(),
    }))
}

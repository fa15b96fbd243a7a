use clap::ValueEnum;
use comfy_table::{Cell, Color, Table};
use mensa_client::UserProfile;
use mensa_primitives::money::format_minor;
use mensa_primitives::{Category, CheckoutOutcome, DisplayCart, Order, Wallet};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Format {
    Json,
    #[default]
    PlainText,
}

#[derive(Debug, Default)]
pub struct Output {
    format: Format,
}

/// Anything a command can print in plain-text mode.
pub trait Report {
    fn report(&self);
}

impl Output {
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn write<T: Serialize + Report>(&self, value: &T) {
        match self.format {
            Format::Json => match serde_json::to_string(&value) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("Failed to serialize to JSON: {err}"),
            },
            Format::PlainText => value.report(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct InfoLine<'a>(pub &'a str);

impl Report for InfoLine<'_> {
    fn report(&self) {
        println!("{}", self.0);
    }
}

/// The full cart page: one row per line, totals underneath. When any line
/// is customized the server's base total is annotated separately so the
/// two figures are never conflated.
#[derive(Debug, Serialize)]
pub struct CartPage<'a>(pub &'a DisplayCart);

impl Report for CartPage<'_> {
    fn report(&self) {
        let cart = self.0;

        if cart.is_empty() {
            println!("Your cart is empty.");
            return;
        }

        let mut table = Table::new();
        let _ = table.set_header(vec!["Line", "Item", "Qty", "Unit", "Total", ""]);
        for line in &cart.lines {
            let _ = table.add_row(vec![
                Cell::new(line.line_id),
                Cell::new(&line.item_name),
                Cell::new(line.quantity),
                Cell::new(format_minor(line.unit_price_minor)),
                Cell::new(format_minor(line.line_total_minor)),
                if line.customized {
                    Cell::new("customized").fg(Color::Yellow)
                } else {
                    Cell::new("")
                },
            ]);
        }
        println!("{table}");

        println!("Total: {}", format_minor(cart.display_total_minor));
        if cart.customized {
            println!("Base total: {}", format_minor(cart.server_total_minor));
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuReport<'a>(pub &'a [Category]);

impl Report for MenuReport<'_> {
    fn report(&self) {
        let mut table = Table::new();
        let _ = table.set_header(vec!["Id", "Item", "Category", "Price", "Sizes", "Add-ons"]);
        for category in self.0 {
            for item in &category.items {
                let sizes = item
                    .sizes
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let addons = item
                    .addons
                    .iter()
                    .map(|a| format!("{} ({})", a.name, format_minor(a.price_minor)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = table.add_row(vec![
                    Cell::new(item.id),
                    Cell::new(&item.name),
                    Cell::new(&category.name),
                    Cell::new(format_minor(item.price_minor)),
                    Cell::new(sizes),
                    Cell::new(addons),
                ]);
            }
        }
        println!("{table}");
    }
}

#[derive(Debug, Serialize)]
pub struct OrdersReport<'a>(pub &'a [Order]);

impl Report for OrdersReport<'_> {
    fn report(&self) {
        if self.0.is_empty() {
            println!("No orders yet.");
            return;
        }

        let mut table = Table::new();
        let _ = table.set_header(vec!["Order", "Status", "Pickup", "Items", "Total"]);
        for order in self.0 {
            let items = order
                .items
                .iter()
                .map(|i| format!("{} × {}", i.item_name, i.qty))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = table.add_row(vec![
                Cell::new(order.id),
                Cell::new(format!("{:?}", order.status).to_uppercase()),
                Cell::new(order.pickup_time.to_rfc3339()),
                Cell::new(items),
                Cell::new(format_minor(order.total_minor)),
            ]);
        }
        println!("{table}");
    }
}

#[derive(Debug, Serialize)]
pub struct WalletReport<'a>(pub &'a Wallet);

impl Report for WalletReport<'_> {
    fn report(&self) {
        println!("Balance: {}", format_minor(self.0.balance_minor));
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutReport<'a>(pub &'a CheckoutOutcome);

impl Report for CheckoutReport<'_> {
    fn report(&self) {
        println!("{}", self.0.message);
        if let Some(order) = &self.0.data {
            println!(
                "Order #{} — {} — pickup {}",
                order.id,
                format_minor(order.total_minor),
                order.pickup_time.to_rfc3339()
            );
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileReport<'a>(pub &'a UserProfile);

impl Report for ProfileReport<'_> {
    fn report(&self) {
        match &self.0.email {
            Some(email) => println!("{} <{}>", self.0.username, email),
            None => println!("{}", self.0.username),
        }
    }
}

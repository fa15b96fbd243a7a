use chrono::{DateTime, Utc};
use clap::Parser;
use eyre::{Result, WrapErr};
use mensa_client::OrdersService;

use crate::cli::Environment;
use crate::output::CheckoutReport;

/// Snapshot the cart into a paid order
#[derive(Debug, Parser)]
pub struct CheckoutCommand {
    /// Pickup time, RFC 3339, e.g. 2026-08-26T12:30:00+02:00
    pickup_time: String,
}

impl CheckoutCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let pickup_time = DateTime::parse_from_rfc3339(&self.pickup_time)
            .wrap_err("pickup time must be RFC 3339")?
            .with_timezone(&Utc);

        let service = OrdersService::new(environment.connection().clone());
        let outcome = service.checkout(pickup_time).await?;

        environment.output.write(&CheckoutReport(&outcome));

        Ok(())
    }
}

use clap::Parser;
use eyre::Result;
use mensa_client::OrdersService;

use crate::cli::Environment;
use crate::output::OrdersReport;

/// List placed orders, newest first
#[derive(Debug, Parser)]
pub struct OrdersCommand;

impl OrdersCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let service = OrdersService::new(environment.connection().clone());
        let orders = service.list().await?;

        environment.output.write(&OrdersReport(&orders));

        Ok(())
    }
}

use clap::Parser;
use eyre::Result;
use mensa_client::MenuService;

use crate::cli::Environment;
use crate::output::MenuReport;

/// List the published menu
#[derive(Debug, Parser)]
pub struct MenuCommand;

impl MenuCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let service = MenuService::new(environment.connection().clone());
        let categories = service.categories().await?;

        environment.output.write(&MenuReport(&categories));

        Ok(())
    }
}

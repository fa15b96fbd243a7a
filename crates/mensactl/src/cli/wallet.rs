use clap::{Parser, Subcommand};
use eyre::Result;
use mensa_client::WalletService;
use mensa_primitives::MinorUnits;

use crate::cli::Environment;
use crate::output::WalletReport;

/// Prepaid wallet balance and top-ups
#[derive(Debug, Parser)]
pub struct WalletCommand {
    #[command(subcommand)]
    command: WalletSubCommand,
}

#[derive(Debug, Subcommand)]
enum WalletSubCommand {
    /// Show the balance
    Show,
    /// Credit the wallet
    Topup {
        /// Amount in minor currency units
        amount_minor: MinorUnits,
    },
}

impl WalletCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let service = WalletService::new(environment.connection().clone());

        let wallet = match self.command {
            WalletSubCommand::Show => service.wallet().await?,
            WalletSubCommand::Topup { amount_minor } => service.topup(amount_minor).await?,
        };

        environment.output.write(&WalletReport(&wallet));

        Ok(())
    }
}

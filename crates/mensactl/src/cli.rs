use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Color, Table};
use const_format::concatcp;
use eyre::{Report as EyreReport, Result};
use mensa_client::{ApiError, ConnectionInfo, MemorySession};
use serde::{Serialize, Serializer};
use thiserror::Error as ThisError;
use url::Url;

use crate::config::Config;
use crate::defaults;
use crate::output::{Format, Output, Report};

mod auth;
mod cart;
mod checkout;
mod menu;
mod orders;
mod wallet;

use auth::AuthCommand;
use cart::CartCommand;
use checkout::CheckoutCommand;
use menu::MenuCommand;
use orders::OrdersCommand;
use wallet::WalletCommand;

pub const EXAMPLES: &str = r"
  # Browse the menu
  $ mensactl menu

  # Add item 3 as a Large with add-on 9, then inspect the cart
  $ mensactl cart add 3 --size Large --addon 9
  $ mensactl cart show
";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = concatcp!(
    "Environment variables:\n",
    "  MENSA_API    Backend base URL\n\n",
    "Examples:",
    EXAMPLES
))]
pub struct RootCommand {
    #[command(flatten)]
    pub args: RootArgs,

    #[command(subcommand)]
    pub action: SubCommands,
}

#[derive(Debug, Subcommand)]
pub enum SubCommands {
    Auth(AuthCommand),
    Menu(MenuCommand),
    Cart(CartCommand),
    Orders(OrdersCommand),
    Checkout(CheckoutCommand),
    Wallet(WalletCommand),
}

#[derive(Debug, Parser)]
pub struct RootArgs {
    /// Backend base URL
    #[arg(long, value_name = "URL")]
    #[arg(env = "MENSA_API", hide_env_values = true)]
    pub api: Option<Url>,

    #[arg(long, value_name = "FORMAT", default_value_t, value_enum)]
    pub output_format: Format,
}

#[derive(Debug)]
pub struct Environment {
    pub output: Output,
    connection: ConnectionInfo,
}

impl Environment {
    pub const fn new(output: Output, connection: ConnectionInfo) -> Self {
        Self { output, connection }
    }

    pub fn connection(&self) -> &ConnectionInfo {
        &self.connection
    }
}

impl RootCommand {
    pub async fn run(self) -> Result<(), CliError> {
        let output = Output::new(self.args.output_format);

        let connection = match self.prepare_connection().await {
            Ok(connection) => connection,
            Err(err) => {
                let err = CliError::Other(err);
                output.write(&err);
                return Err(err);
            }
        };

        let environment = Environment::new(output, connection);

        let result = match self.action {
            SubCommands::Auth(auth) => auth.run(&environment).await,
            SubCommands::Menu(menu) => menu.run(&environment).await,
            SubCommands::Cart(cart) => cart.run(&environment).await,
            SubCommands::Orders(orders) => orders.run(&environment).await,
            SubCommands::Checkout(checkout) => checkout.run(&environment).await,
            SubCommands::Wallet(wallet) => wallet.run(&environment).await,
        };

        if let Err(err) = result {
            let err = match err.downcast::<ApiError>() {
                Ok(err) => CliError::Api(err),
                Err(err) => CliError::Other(err),
            };

            environment.output.write(&err);
            return Err(err);
        }

        Ok(())
    }

    async fn prepare_connection(&self) -> Result<ConnectionInfo> {
        let config = Config::load().await?;

        let api_url = self
            .args
            .api
            .clone()
            .or(config.api_url)
            .unwrap_or_else(defaults::default_api_url);

        let session = match config.token {
            Some(token) => MemorySession::with_token(token),
            None => MemorySession::new(),
        };

        Ok(ConnectionInfo::new(api_url, Arc::new(session)))
    }
}

#[derive(Debug, Serialize, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Other(
        #[from]
        #[serde(serialize_with = "serialize_eyre_report")]
        EyreReport,
    ),
}

impl From<CliError> for ExitCode {
    fn from(error: CliError) -> Self {
        match error {
            CliError::Api(_) => Self::from(101),
            CliError::Other(_) => Self::FAILURE,
        }
    }
}

impl Report for CliError {
    fn report(&self) {
        let mut table = Table::new();
        let _ = table.set_header(vec![Cell::new("ERROR").fg(Color::Red)]);
        let _ = table.add_row(vec![match self {
            CliError::Api(e) => format!("API Error ({}): {}", e.status_code, e.message),
            CliError::Other(e) => format!("Error: {e:?}"),
        }]);
        println!("{table}");
    }
}

fn serialize_eyre_report<S>(report: &EyreReport, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(report.chain().map(|e| e.to_string()))
}

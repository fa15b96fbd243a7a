use clap::{Parser, Subcommand};
use eyre::Result;
use mensa_client::AuthService;

use crate::cli::Environment;
use crate::config::Config;
use crate::output::{InfoLine, ProfileReport};

/// Sign in, sign up, inspect or end the session
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubCommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubCommand {
    /// Exchange credentials for a session token and persist it
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Drop the persisted token and invalidate it server-side
    Logout,
}

impl AuthCommand {
    pub async fn run(self, environment: &Environment) -> Result<()> {
        let service = AuthService::new(environment.connection().clone());

        match self.command {
            AuthSubCommand::Login { username, password } => {
                let token = service.login(&username, &password).await?;

                let mut config = Config::load().await?;
                config.token = Some(token);
                config.save().await?;

                environment
                    .output
                    .write(&InfoLine(&format!("Logged in as {username}.")));
            }
            AuthSubCommand::Register {
                username,
                email,
                password,
            } => {
                let profile = service.register(&username, &email, &password).await?;
                environment.output.write(&ProfileReport(&profile));
            }
            AuthSubCommand::Whoami => {
                let profile = service.me().await?;
                environment.output.write(&ProfileReport(&profile));
            }
            AuthSubCommand::Logout => {
                // Drop the local token first so a failed server call cannot
                // leave the CLI acting on a session the user asked to end.
                let mut config = Config::load().await?;
                config.token = None;
                config.save().await?;

                service.logout().await?;

                environment.output.write(&InfoLine("Logged out."));
            }
        }

        Ok(())
    }
}

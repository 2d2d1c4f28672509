//! Tasks CLI
//!
//! Talks to the task server over gRPC.
//!
//! ```text
//! tasks-cli list
//! tasks-cli add --title "Buy milk" [--description ...] [--status ...]
//! tasks-cli complete --id 1
//! ```
//!
//! The server address comes from `--target`, then `GRPC_CLIENT_TARGET`,
//! then `http://localhost:50051`.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use eyre::{Result, WrapErr};
use grpc_client::ClientConfig;
use tracing::error;

mod commands;
mod render;

use commands::{Command, CommandError, execute};

#[derive(Parser, Debug)]
#[command(name = "tasks-cli")]
#[command(about = "Manage tasks on a running task server")]
struct Cli {
    /// Server URI, e.g. http://localhost:50051
    #[arg(long, global = true)]
    target: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List every task, newest first
    List,

    /// Add a new task
    Add {
        /// Title of the task (required)
        #[arg(short, long)]
        title: String,

        /// Description of the task
        #[arg(short, long, default_value = "")]
        description: String,

        /// Status of the task. The server uses "pending" when empty.
        #[arg(short, long, default_value = "")]
        status: String,
    },

    /// Mark a task as completed
    Complete {
        /// ID of the task to complete (required)
        #[arg(long)]
        id: String,
    },
}

impl TryFrom<Commands> for Command {
    type Error = CommandError;

    fn try_from(value: Commands) -> Result<Self, Self::Error> {
        match value {
            Commands::List => Ok(Command::List),
            Commands::Add {
                title,
                description,
                status,
            } => Command::add(title, description, status),
            Commands::Complete { id } => Command::complete(id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().wrap_err("Failed to load client configuration")?;
    if let Some(target) = cli.target {
        config = config.with_target(target);
    }

    let command = Command::try_from(cli.command)?;
    let prefix = command.failure_prefix();

    match execute(command, &config).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            error!(error = %e, "Command failed");
            println!("{prefix}: {e}");
        }
    }

    Ok(())
}

pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

use client::UserApiClient;

#[derive(Parser)]
#[command(name = "userctl")]
#[command(about = "Command-line client for the user registry API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "USER_API_URL",
        default_value = "http://localhost:8080",
        help = "Base URL of the user API"
    )]
    pub url: String,

    #[arg(long, global = true, help = "Print raw JSON envelopes")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Service banner and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Register, inspect and remove users")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = UserApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Server { cmd } => commands::server::handle(&client, cmd, output_format).await,
        Commands::User { cmd } => commands::user::handle(&client, cmd, output_format).await,
    }
}

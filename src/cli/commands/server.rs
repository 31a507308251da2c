use clap::Subcommand;

use crate::cli::client::UserApiClient;
use crate::cli::utils::output_envelope;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show the service banner")]
    Home,

    #[command(about = "Check service and database health")]
    Health,
}

pub async fn handle(client: &UserApiClient, cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Home => {
            let reply = client.home().await?;
            if !reply.is_success() {
                anyhow::bail!("{} returned {}", client.base_url(), reply.status);
            }
            println!("{}", reply.body);
            Ok(())
        }
        ServerCommands::Health => {
            let reply = client.health().await?;
            output_envelope(output_format, &reply.body, || {
                let field = |name: &str| reply.body.get(name).and_then(|v| v.as_str()).unwrap_or("?").to_string();
                println!("Server:   {}", client.base_url());
                println!("Status:   {}", field("status"));
                println!("Database: {}", field("database"));
            })?;
            if !reply.is_success() {
                anyhow::bail!("service unhealthy ({})", reply.status);
            }
            Ok(())
        }
    }
}

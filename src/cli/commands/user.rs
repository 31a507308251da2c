use clap::Subcommand;

use crate::cli::client::UserApiClient;
use crate::cli::utils::{ensure_success, format_user, output_envelope};
use crate::cli::OutputFormat;
use crate::database::User;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Register a new user")]
    Register {
        #[arg(help = "User name (unique)")]
        user_name: String,
        #[arg(help = "Email address")]
        email: String,
        #[arg(help = "Password")]
        password: String,
    },

    #[command(about = "Show one user")]
    Get {
        #[arg(help = "User name")]
        user_name: String,
    },

    #[command(about = "List all users")]
    List,

    #[command(about = "Change email and password of an existing user")]
    Update {
        #[arg(help = "User name")]
        user_name: String,
        #[arg(help = "New email address")]
        email: String,
        #[arg(help = "New password")]
        password: String,
    },

    #[command(about = "Delete one user")]
    Delete {
        #[arg(help = "User name")]
        user_name: String,
    },

    #[command(about = "Delete every user")]
    DeleteAll,

    #[command(about = "Register the sample users Alfie, Joan and Tony")]
    Seed,
}

/// Users registered by `userctl user seed`.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("Alfie", "alfie@some_office.org", "passwrd1"),
        User::new("Joan", "joan@some_other_org.com", "passwrd2"),
        User::new("Tony", "tones@somewhere_completly_different.net", "passwrd3"),
    ]
}

pub async fn handle(client: &UserApiClient, cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Register { user_name, email, password } => {
            let reply = client.register(&User::new(user_name, email, password)).await?;
            output_envelope(output_format, &reply.body, || {
                if reply.is_success() {
                    println!("✓ Registered {}", format_user(&reply.body.user));
                }
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::Get { user_name } => {
            let reply = client.get(&user_name).await?;
            output_envelope(output_format, &reply.body, || {
                if reply.is_success() {
                    println!("{}", format_user(&reply.body.user));
                }
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::List => {
            let reply = client.get_all().await?;
            output_envelope(output_format, &reply.body, || {
                if reply.body.users.is_empty() {
                    println!("No users found");
                }
                for user in &reply.body.users {
                    println!("{}", format_user(user));
                }
                println!("{} user(s)", reply.body.count);
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::Update { user_name, email, password } => {
            let reply = client.update(&User::new(user_name, email, password)).await?;
            output_envelope(output_format, &reply.body, || {
                if reply.is_success() {
                    println!("✓ Updated {}", format_user(&reply.body.user));
                }
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::Delete { user_name } => {
            let reply = client.delete(&user_name).await?;
            output_envelope(output_format, &reply.body, || {
                if reply.is_success() {
                    println!("✓ Deleted {}", format_user(&reply.body.user));
                }
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::DeleteAll => {
            let reply = client.delete_all().await?;
            output_envelope(output_format, &reply.body, || {
                if reply.is_success() {
                    println!("✓ Deleted all users");
                }
            })?;
            ensure_success(reply.status, &reply.body.status, &reply.body.reason)
        }

        UserCommands::Seed => {
            let mut failures = 0;
            for user in sample_users() {
                let reply = client.register(&user).await?;
                output_envelope(output_format, &reply.body, || {
                    if reply.is_success() {
                        println!("✓ Registered {}", format_user(&reply.body.user));
                    } else {
                        eprintln!("✗ {}: {}", user.user_name, reply.body.reason);
                    }
                })?;
                if !reply.is_success() {
                    failures += 1;
                }
            }
            if failures > 0 {
                anyhow::bail!("{} of {} sample users could not be registered", failures, sample_users().len());
            }
            Ok(())
        }
    }
}

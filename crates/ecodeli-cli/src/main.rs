//! EcoDeli CLI - a command line client for the EcoDeli marketplace.
//!
//! Each invocation runs one command against the GraphQL backend: log in,
//! browse deliveries and services, inspect a task, validate a completed
//! delivery with its code.

mod render;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ecodeli_core::models::{TaskFilters, TaskStatus, TaskType};
use ecodeli_core::{ApiClient, Config, StorageBackend};

#[derive(Debug, Parser)]
#[command(name = "ecodeli", version, about = "EcoDeli delivery and service marketplace client")]
struct Cli {
    /// Backend base URL (overrides config and ECODELI_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where the session token is stored: file, keyring or memory
    #[arg(long, global = true)]
    storage: Option<StorageBackend>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a valid session exists
    Status,
    /// Show the logged-in user
    Me,
    /// List published tasks
    Tasks {
        /// service or shipping
        #[arg(long = "type")]
        task_type: Option<TaskType>,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// List the tasks you created
    MyTasks,
    /// List your applications
    Applications,
    /// Show one task with its applications and messages
    Task { id: String },
    /// Validate a completed task with its validation code
    Validate { task_id: String, code: String },
    /// Mark a task's messages as read
    MarkRead { task_id: String },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }
    let session = Arc::new(config.open_session()?);
    let client = ApiClient::new(config.graphql_endpoint(), session)?;
    info!(endpoint = client.endpoint(), storage = %config.storage, "EcoDeli CLI starting");

    run(cli.command, cli.json, &client, &mut config).await
}

async fn run(command: Command, as_json: bool, client: &ApiClient, config: &mut Config) -> Result<()> {
    match command {
        Command::Login { email } => {
            let email = match email.or_else(|| config.last_email.clone()) {
                Some(email) => email,
                None => prompt("Email: ")?,
            };
            let password = rpassword::prompt_password(format!("Password for {}: ", email))
                .context("Failed to read password")?;

            client.login(&email, &password).await?;

            config.last_email = Some(email.clone());
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to save config");
            }
            if config.storage == StorageBackend::Memory {
                eprintln!("Note: memory storage keeps the session only for this process.");
            }
            println!("Logged in as {}", email);
        }
        Command::Logout => {
            client.logout();
            println!("Logged out");
        }
        Command::Status => match client.session().current() {
            Ok((_, claims)) => {
                if as_json {
                    print_json(&json!({ "authenticated": true, "claims": claims }))?;
                } else {
                    println!("{}", render::session_status(&claims, client.session().now()));
                }
            }
            Err(reason) => {
                if as_json {
                    print_json(&json!({ "authenticated": false, "reason": reason.to_string() }))?;
                } else {
                    println!("{}", reason);
                }
            }
        },
        Command::Me => {
            let user = client.me().await?;
            if as_json {
                print_json(&user)?;
            } else {
                println!("{}", render::user(&user));
            }
        }
        Command::Tasks { task_type, status } => {
            let filters = TaskFilters { task_type, status };
            let tasks = client.list_tasks(Some(filters)).await?;
            if as_json {
                print_json(&tasks)?;
            } else {
                println!("{}", render::task_list(&tasks));
            }
        }
        Command::MyTasks => {
            let tasks = client.my_tasks().await?;
            if as_json {
                print_json(&tasks)?;
            } else {
                println!("{}", render::task_list(&tasks));
            }
        }
        Command::Applications => {
            let applications = client.my_applications().await?;
            if as_json {
                print_json(&applications)?;
            } else {
                println!("{}", render::application_list(&applications));
            }
        }
        Command::Task { id } => {
            let task = client.task(&id).await?;
            if as_json {
                print_json(&task)?;
            } else {
                println!("{}", render::task_detail(&task));
            }
        }
        Command::Validate { task_id, code } => {
            let completion = client.validate_task_completion(&task_id, &code).await?;
            // Validation already succeeded; a failure here is only logged
            if let Err(e) = client.mark_messages_as_read(&task_id).await {
                warn!(error = %e, "Failed to mark messages as read");
            }
            if as_json {
                print_json(&completion)?;
            } else {
                println!("Task {} validated: {}", completion.id, completion.status);
            }
        }
        Command::MarkRead { task_id } => {
            let marked = client.mark_messages_as_read(&task_id).await?;
            if as_json {
                print_json(&json!({ "markMessagesAsRead": marked }))?;
            } else {
                println!("Messages marked as read");
            }
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        anyhow::bail!("No value entered");
    }
    Ok(value)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

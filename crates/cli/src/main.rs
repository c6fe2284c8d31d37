//! Order Desk CLI - Credentials and order maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Generate ADMIN_PASSWORD_HASH for the operator account
//! od-cli hash-password
//!
//! # List orders, optionally by status
//! od-cli orders list --status dispatch
//!
//! # Change an order's status
//! od-cli orders set-status <ID> success
//!
//! # Delete an order (asks first unless --yes)
//! od-cli orders delete <ID>
//! ```
//!
//! # Commands
//!
//! - `hash-password` - Hash a password for the admin login
//! - `orders` - List, update and delete orders in the dataset

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "Order Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for `ADMIN_PASSWORD_HASH`
    HashPassword {
        /// Password to hash (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Manage orders in the document store
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        /// Only orders with this status (`pending`, `dispatch`, `success`)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Change an order's status
    SetStatus {
        /// Order document ID
        id: String,

        /// New status (`pending`, `dispatch`, `success`)
        status: String,
    },
    /// Delete an order
    Delete {
        /// Order document ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "od_cli=info,order_desk_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::HashPassword { password } => commands::password::hash(password)?,
        Commands::Orders { action } => match action {
            OrdersAction::List { status } => commands::orders::list(status.as_deref()).await?,
            OrdersAction::SetStatus { id, status } => {
                commands::orders::set_status(&id, &status).await?;
            }
            OrdersAction::Delete { id, yes } => commands::orders::delete(&id, yes).await?,
        },
    }
    Ok(())
}

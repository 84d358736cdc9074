//! Catalog CLI - Manage the local catalog store from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create the database and seed the owner account
//! catalog init
//!
//! # Add and list products
//! catalog product add --name "Fountain Pen" --price 24.90 --stock 5 --category Writing
//! catalog product list --category Writing
//!
//! # Upload a logo
//! catalog logo set ./logo.png
//!
//! # Owner session
//! catalog login --username owner --password owner123
//! catalog whoami
//! catalog logout
//! ```
//!
//! Command results are written to stdout as JSON; logs go to stderr.
//!
//! # Environment Variables
//!
//! See `StoreConfig::from_env` (`CATALOG_DATABASE_PATH`, `CATALOG_SESSION_PATH`,
//! `CATALOG_OWNER_USERNAME`, `CATALOG_OWNER_PASSWORD`, `CATALOG_BUSY_TIMEOUT_SECS`).
//! `RUST_LOG` overrides the default log filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::business::BusinessArgs;
use commands::products::{ProductAddArgs, ProductArgs, ProductListArgs};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Local catalog store tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database (if needed) and seed defaults
    Init,
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Upload media and mint media URLs
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
    /// Manage the shop logo
    Logo {
        #[command(subcommand)]
        action: LogoAction,
    },
    /// Show or change the business profile
    Business {
        #[command(subcommand)]
        action: BusinessAction,
    },
    /// Log in as the shop owner
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Clear the owner session
    Logout,
    /// Report whether the owner is logged in
    Whoami,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product
    Add(ProductAddArgs),
    /// List products, newest first
    List(ProductListArgs),
    /// Show one product
    Get {
        /// Product ID
        id: String,
    },
    /// Change fields of a product
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductArgs,

        /// Remove the product image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },
    /// Delete a product (succeeds if it does not exist)
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum MediaAction {
    /// Store a file and print its media ID
    Add {
        /// File to upload
        path: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Mint a URL for a stored file
    Url {
        /// Media ID
        id: String,
    },
}

#[derive(Subcommand)]
enum LogoAction {
    /// Upload a new logo
    Set {
        /// Image file
        path: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },
    /// Show the current logo
    Show,
}

#[derive(Subcommand)]
enum BusinessAction {
    /// Print the business profile
    Show,
    /// Replace the business profile; omitted fields keep their current value
    Set(BusinessArgs),
}

#[tokio::main]
async fn main() {
    // Defaults to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "catalog_store=info,catalog_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::open_store().await?;

    match cli.command {
        Commands::Init => commands::init(&store).await?,
        Commands::Product { action } => match action {
            ProductAction::Add(args) => commands::products::add(&store, args).await?,
            ProductAction::List(args) => commands::products::list(&store, args).await?,
            ProductAction::Get { id } => commands::products::get(&store, &id).await?,
            ProductAction::Update {
                id,
                fields,
                clear_image,
            } => commands::products::update(&store, &id, fields, clear_image).await?,
            ProductAction::Delete { id } => commands::products::delete(&store, &id).await?,
        },
        Commands::Media { action } => match action {
            MediaAction::Add { path, mime } => {
                commands::media::add(&store, &path, mime.as_deref()).await?;
            }
            MediaAction::Url { id } => commands::media::url(&store, &id).await?,
        },
        Commands::Logo { action } => match action {
            LogoAction::Set { path, mime } => {
                commands::media::set_logo(&store, &path, mime.as_deref()).await?;
            }
            LogoAction::Show => commands::media::show_logo(&store).await?,
        },
        Commands::Business { action } => match action {
            BusinessAction::Show => commands::business::show(&store).await?,
            BusinessAction::Set(args) => commands::business::set(&store, args).await?,
        },
        Commands::Login { username, password } => {
            commands::session::login(&store, &username, &password).await?;
        }
        Commands::Logout => commands::session::logout(&store)?,
        Commands::Whoami => commands::session::whoami(&store)?,
    }

    store.close().await;
    Ok(())
}

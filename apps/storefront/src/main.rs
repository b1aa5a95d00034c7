use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    CartAction, CartManager, CatalogClient, CatalogLoader, CatalogSurface, Storefront,
};
use storage::SqliteStore;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, normalize_database_url};
use terminal::{TerminalCart, TerminalCatalog};

#[derive(Parser, Debug)]
#[command(about = "Terminal storefront: browse the catalog and manage the cart")]
struct Cli {
    /// Catalog API base, e.g. http://127.0.0.1:8000
    #[arg(long)]
    api_base: Option<String>,
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

/// Positions are 1-based, as printed.
#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog.
    Catalog,
    /// Show the catalog backend status.
    Status,
    /// Order the product on catalog card POSITION.
    Add {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,
    },
    /// Show the cart.
    Cart,
    Increase {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        row: u32,
    },
    Decrease {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        row: u32,
    },
    /// Set the count of cart row ROW; invalid values become 1.
    Set {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        row: u32,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Remove {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        row: u32,
    },
    /// Open the order confirmation dialog.
    Order,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_base) = cli.api_base {
        settings.api_base = api_base;
    }
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }

    let client = CatalogClient::new(settings.api_base.clone())?;

    if let Command::Status = cli.command {
        let status = client.fetch_status().await?;
        println!(
            "{} ({}), {} product(s)",
            status.status, status.status_code, status.products_count
        );
        return Ok(());
    }

    let database_url = normalize_database_url(&settings.database_url);
    let store = SqliteStore::new(&database_url)
        .await
        .with_context(|| format!("failed to open cart storage at '{database_url}'"))?;
    store
        .health_check()
        .await
        .with_context(|| format!("cart storage at '{database_url}' is not usable"))?;

    let surface: Arc<dyn CatalogSurface> = Arc::new(TerminalCatalog);
    let catalog = CatalogLoader::new(client, surface);
    let cart = CartManager::load(store, TerminalCart::default()).await;
    let mut storefront = Storefront::new(catalog, cart);

    let outcome = run(&mut storefront, cli.command).await;
    storefront.teardown();
    if outcome.is_ok() {
        storefront.cart().renderer().print();
    }
    outcome
}

async fn run(
    storefront: &mut Storefront<SqliteStore, TerminalCart>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Catalog => {
            storefront.start().await;
        }
        Command::Add { position } => {
            if storefront.start().await {
                storefront.order(index(position)).await?;
            }
        }
        Command::Cart | Command::Status => {}
        Command::Increase { row } => {
            storefront.dispatch(CartAction::Increase(index(row))).await?;
        }
        Command::Decrease { row } => {
            storefront.dispatch(CartAction::Decrease(index(row))).await?;
        }
        Command::Set { row, value } => {
            storefront
                .dispatch(CartAction::SetCount(index(row), value))
                .await?;
        }
        Command::Remove { row } => {
            storefront.dispatch(CartAction::Remove(index(row))).await?;
        }
        Command::Order => {
            if storefront.cart_mut().open_order_dialog() {
                storefront.dispatch(CartAction::CloseOrderDialog).await?;
            } else {
                println!("cart is empty; nothing to order");
            }
        }
    }
    Ok(())
}

fn index(position: u32) -> usize {
    position.saturating_sub(1) as usize
}

//! Bazaar CLI - browse the catalog, manage the cart, check out.
//!
//! # Usage
//!
//! ```bash
//! # List products, filtered and sorted
//! bazaar shop --category fashion --sort price-desc
//!
//! # Product detail
//! bazaar product nike-sneakers
//!
//! # Cart
//! bazaar cart add nike-sneakers -q 2
//! bazaar cart show
//! bazaar cart update 1 3
//! bazaar cart remove 1
//! bazaar cart count
//!
//! # Checkout
//! bazaar checkout --summary
//! bazaar checkout
//! ```
//!
//! # Commands
//!
//! - `shop` - List products
//! - `product` - Show one product
//! - `cart` - Show and change the cart
//! - `checkout` - Summarize or place the order
//!
//! Configuration comes from `BAZAAR_*` environment variables (see
//! [`bazaar_cli::config`]); `--store` and `--catalog` override them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bazaar_cli::commands;
use bazaar_cli::{BazaarConfig, FileStore};
use bazaar_core::{BadgeCell, CartStore, ListingQuery, SortOrder};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar shop CLI")]
struct Cli {
    /// JSON file backing the store (overrides `BAZAAR_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Catalog file, YAML or JSON (overrides `BAZAAR_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Shop {
        /// Case-insensitive text to find in product names
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`price-asc`, `price-desc`, anything else keeps catalog order)
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Show product details
    Product {
        /// Catalog id, e.g. `apple-watch`
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Summarize or place the order
    Checkout {
        /// Only print the order total
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        /// Catalog id
        id: String,

        /// Quantity to add (at least 1)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line
    Update {
        /// Line position as shown by `cart show`
        position: usize,

        /// New quantity (at least 1)
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Line position as shown by `cart show`
        position: usize,
    },
    /// Empty the cart
    Clear,
    /// Print the total item count
    Count,
}

fn main() {
    // Logs go to stderr so command output on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bazaar_cli=info,bazaar_core=info".into());

    // BAZAAR_LOG_FORMAT=json for structured logs, text otherwise
    let is_json = std::env::var("BAZAAR_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = BazaarConfig::from_env()?;
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    tracing::debug!(?config, "Loaded configuration");

    let catalog = config.load_catalog()?;

    let output = match cli.command {
        Commands::Shop {
            search,
            category,
            sort,
        } => {
            let mut query = ListingQuery::new().with_search(search).with_sort(sort);
            if let Some(category) = category {
                query = query.with_category(category);
            }
            commands::shop::list(&catalog, &query, config.currency)
        }
        Commands::Product { id } => commands::shop::product(&catalog, &id, config.currency)?,
        Commands::Cart { action } => {
            let storage = FileStore::open(&config.store_path);
            let badge = BadgeCell::new();
            let cart = CartStore::new(&storage, &catalog)
                .with_key(config.cart_key.as_str())
                .with_currency(config.currency)
                .with_badge(&badge);

            match action {
                CartAction::Show => commands::cart::show(&cart)?,
                CartAction::Add { id, quantity } => {
                    commands::cart::add(&cart, &badge, &id, quantity)?
                }
                CartAction::Update { position, quantity } => {
                    commands::cart::update(&cart, &badge, position, quantity)?
                }
                CartAction::Remove { position } => {
                    commands::cart::remove(&cart, &badge, position)?
                }
                CartAction::Clear => commands::cart::clear(&cart)?,
                CartAction::Count => commands::cart::count(&cart)?,
            }
        }
        Commands::Checkout { summary } => {
            let storage = FileStore::open(&config.store_path);
            let cart = CartStore::new(&storage, &catalog)
                .with_key(config.cart_key.as_str())
                .with_currency(config.currency);

            if summary {
                commands::checkout::summary(&cart)?
            } else {
                commands::checkout::place(&cart)?
            }
        }
    };
    Ok(output)
}

//! Joyco CLI - Catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # List every product against the bundled fixture
//! joyco --mock products
//!
//! # Fetch one product from Shopify
//! joyco product field-jacket
//!
//! # List collections
//! joyco collections
//!
//! # Products in a collection, best selling first
//! joyco collection-products jackets --sort best-selling
//!
//! # The shop page for a collection and filter string
//! joyco shop jackets --filter "sort=price-asc&fcolor=Olive,Black"
//! ```
//!
//! # Commands
//!
//! - `products` - List products
//! - `product` - Show one product
//! - `collections` - List collections
//! - `collection-products` - List one collection's products
//! - `shop` - Assemble the shop page for a URL state

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::catalog::{self, BackendArgs};

#[derive(Parser)]
#[command(name = "joyco")]
#[command(author, version, about = "Joyco catalog tools")]
struct Cli {
    /// Read catalog data from the local fixture instead of Shopify
    #[arg(long, global = true)]
    mock: bool,

    /// Fixture file to read (implies --mock)
    #[arg(long, global = true, value_name = "PATH")]
    mock_data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products across the catalog
    Products {
        /// Sort slug (e.g. `price-asc`, `newest`)
        #[arg(short, long)]
        sort: Option<String>,

        /// Search text
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of products
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
    },
    /// Show one product by handle
    Product {
        /// Product handle
        handle: String,
    },
    /// List collections
    Collections,
    /// List the products of one collection
    CollectionProducts {
        /// Collection handle
        collection: String,

        /// Sort slug (e.g. `best-selling`, `price-desc`)
        #[arg(short, long)]
        sort: Option<String>,

        /// Search text
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of products
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
    },
    /// Assemble the shop page for a collection and query string
    Shop {
        /// Collection handle (omit for the whole shop)
        collection: Option<String>,

        /// Query string as it would appear in the URL
        #[arg(short, long, default_value = "")]
        filter: String,
    },
}

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so stdout stays valid JSON
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "joyco=info,joyco_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
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
    let mut args = BackendArgs {
        mock: cli.mock,
        mock_data: cli.mock_data,
        limit: None,
    };

    match cli.command {
        Commands::Products {
            sort,
            query,
            limit,
        } => {
            args.limit = limit;
            catalog::products(&args, sort.as_deref(), query.as_deref()).await?;
        }
        Commands::Product { handle } => catalog::product(&args, &handle).await?,
        Commands::Collections => catalog::collections(&args).await?,
        Commands::CollectionProducts {
            collection,
            sort,
            query,
            limit,
        } => {
            args.limit = limit;
            catalog::collection_products(&args, &collection, sort.as_deref(), query.as_deref())
                .await?;
        }
        Commands::Shop { collection, filter } => {
            catalog::shop(&args, collection.as_deref(), &filter).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_mock_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["joyco", "collections", "--mock"]);
        assert!(cli.is_ok_and(|cli| cli.mock));
    }

    #[test]
    fn test_limit_must_be_positive() {
        for limit in ["0", "-3"] {
            assert!(Cli::try_parse_from(["joyco", "products", "--limit", limit]).is_err());
            assert!(
                Cli::try_parse_from(["joyco", "collection-products", "bags", "--limit", limit])
                    .is_err()
            );
        }
        let cli = Cli::try_parse_from(["joyco", "products", "--limit", "12"]);
        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Commands::Products { limit: Some(12), .. })
        ));
    }

    #[test]
    fn test_shop_filter_defaults_to_empty() {
        let cli = Cli::try_parse_from(["joyco", "shop", "jackets"]);
        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Commands::Shop { collection: Some(c), filter }) if c == "jackets" && filter.is_empty()
        ));
    }
}

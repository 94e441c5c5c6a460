//! Brick CLI - terminal storefront for the Brickshop catalog.
//!
//! Commands:
//! - `brick products` - Browse, filter, search and inspect products
//! - `brick cart` - Manage the shopping cart
//! - `brick wishlist` - Save products for later
//! - `brick compare` - Compare up to four products
//! - `brick recent` - Recently viewed products
//! - `brick reviews` - Read and write product reviews
//! - `brick checkout` - Place an order for the cart
//! - `brick theme` - Light/dark preference

mod commands;
mod config;
mod context;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CheckoutArgs, CompareArgs, ProductsArgs, RecentArgs, ReviewsArgs, ThemeArgs,
    WishlistArgs,
};

/// Brick CLI - Shop the Brickshop catalog from the terminal
#[derive(Parser)]
#[command(name = "brick")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory for stored cart, wishlist and preferences
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products(ProductsArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage the wishlist
    Wishlist(WishlistArgs),

    /// Compare products side by side
    Compare(CompareArgs),

    /// Show recently viewed products
    Recent(RecentArgs),

    /// Read and write product reviews
    Reviews(ReviewsArgs),

    /// Check out the current cart
    Checkout(CheckoutArgs),

    /// Show or change the theme preference
    Theme(ThemeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, cli.data_dir, output)?;

    logging::init(ctx.config.logging.format, cli.verbose);
    tracing::debug!(
        dir = %ctx.config.storage.data_dir.display(),
        products = ctx.catalog.len(),
        "context loaded"
    );
    ctx.output.debug(&format!("data dir: {}", ctx.config.storage.data_dir.display()));

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Compare(args) => commands::compare::run(args, &ctx).await,
        Commands::Recent(args) => commands::recent::run(args, &ctx).await,
        Commands::Reviews(args) => commands::reviews::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Theme(args) => commands::theme::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

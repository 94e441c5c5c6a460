//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod compare;
pub mod products;
pub mod recent;
pub mod reviews;
pub mod theme;
pub mod wishlist;

use brick_commerce::catalog::FacetKey;
use brick_commerce::checkout::DEFAULT_COUNTRY;
use brick_commerce::search::{SortOption, DEFAULT_PAGE_SIZE};
use brick_commerce::theme::{Appearance, Theme};
use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products with filters, sorting and pagination.
    List(ListArgs),
    /// Show one product. Also records it as recently viewed.
    Show {
        /// Product ID.
        id: String,
    },
    /// Full-text search over name, theme, category and description.
    Search {
        /// Search terms.
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Products sharing a theme or category with the given one.
    Related {
        /// Product ID.
        id: String,
        /// Maximum number of products.
        #[arg(short, long, default_value_t = 4)]
        limit: usize,
    },
    /// Featured products.
    Featured {
        /// Maximum number of products.
        #[arg(short, long, default_value_t = brick_commerce::catalog::DEFAULT_FEATURED_LIMIT)]
        limit: usize,
    },
    /// Products on sale.
    Sale {
        /// Maximum number of products.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the available filter values.
    Facets,
}

/// Arguments for `products list`.
#[derive(Args)]
pub struct ListArgs {
    /// Only this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only this theme.
    #[arg(long)]
    pub theme: Option<String>,

    /// Search terms.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Facet filter as `key=value` (repeatable; e.g. `age=18+`).
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(FacetKey, String)>,

    /// Sort order.
    #[arg(long, default_value = "recommended", value_parser = parse_sort)]
    pub sort: SortOption,

    /// Page number (1-based).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Products per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub per_page: usize,
}

fn parse_filter(s: &str) -> Result<(FacetKey, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = FacetKey::from_str(key.trim()).ok_or_else(|| {
        let keys: Vec<&str> = FacetKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown filter '{}' (expected one of: {})", key, keys.join(", "))
    })?;
    Ok((key, value.trim().to_string()))
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    SortOption::from_str(s).ok_or_else(|| {
        let options: Vec<&str> = SortOption::ALL.iter().map(|o| o.as_str()).collect();
        format!("unknown sort '{}' (expected one of: {})", s, options.join(", "))
    })
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart with totals.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: String,
        /// Units to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Add one unit to a line.
    Inc {
        /// Product ID.
        id: String,
    },
    /// Take one unit off a line.
    Dec {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// Show saved products.
    Show,
    /// Save a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a saved product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Move a saved product into the cart.
    MoveToCart {
        /// Product ID.
        id: String,
    },
    /// Remove every saved product.
    Clear,
}

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    #[command(subcommand)]
    pub command: Option<CompareCommand>,
}

#[derive(Subcommand)]
pub enum CompareCommand {
    /// Show the products side by side.
    Show,
    /// Add a product to the comparison.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a product from the comparison.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the comparison.
    Clear,
}

/// Arguments for the recent command.
#[derive(Args)]
pub struct RecentArgs {
    #[command(subcommand)]
    pub command: Option<RecentCommand>,
}

#[derive(Subcommand)]
pub enum RecentCommand {
    /// Show recently viewed products, newest first.
    Show,
    /// Forget recently viewed products.
    Clear,
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    /// List a product's reviews with the rating summary.
    List {
        /// Product ID.
        id: String,
    },
    /// Write a review.
    Add {
        /// Product ID.
        id: String,
        /// Rating from 1 to 5.
        #[arg(short, long)]
        rating: u8,
        /// Review title.
        #[arg(short, long)]
        title: String,
        /// Review body.
        #[arg(long)]
        comment: String,
        /// Name shown with the review.
        #[arg(long, default_value = "Cliente")]
        user_name: String,
        /// Reviewer ID.
        #[arg(long, default_value = "guest")]
        user_id: String,
        /// Mark as a verified purchase.
        #[arg(long)]
        verified: bool,
    },
    /// Mark a review as helpful.
    Helpful {
        /// Review ID.
        review_id: String,
    },
}

/// Failure the simulated payment gateway should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimulatedFailure {
    Network,
    Declined,
    Timeout,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip_code: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Card number (16 to 19 characters, digits and spaces).
    #[arg(long)]
    pub card_number: String,
    /// Name on the card.
    #[arg(long)]
    pub card_name: String,
    /// Expiry as MM/YY.
    #[arg(long)]
    pub expiry: String,
    #[arg(long)]
    pub cvv: String,

    /// Make the simulated gateway fail.
    #[arg(long, value_enum)]
    pub simulate_failure: Option<SimulatedFailure>,

    /// Keep the cart after a successful order.
    #[arg(long)]
    pub keep_cart: bool,
}

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub command: Option<ThemeCommand>,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Show the stored preference and what it renders as.
    Show {
        /// Operating system appearance used to resolve `system`.
        #[arg(long, default_value = "light", value_parser = parse_appearance)]
        system: Appearance,
    },
    /// Set the preference.
    Set {
        /// light, dark or system.
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
    /// Switch between light and dark.
    Toggle,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{}' (expected light, dark or system)", s))
}

fn parse_appearance(s: &str) -> Result<Appearance, String> {
    match s.to_ascii_lowercase().as_str() {
        "light" => Ok(Appearance::Light),
        "dark" => Ok(Appearance::Dark),
        _ => Err(format!("unknown appearance '{}' (expected light or dark)", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("age=18+").unwrap(),
            (FacetKey::Age, "18+".to_string())
        );
        assert_eq!(
            parse_filter("theme = Star Wars").unwrap(),
            (FacetKey::Theme, "Star Wars".to_string())
        );
        assert!(parse_filter("color=red").is_err());
        assert!(parse_filter("age").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("price_low_high").unwrap(), SortOption::PriceLowHigh);
        assert!(parse_sort("cheapest").is_err());
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("Dark").unwrap(), Theme::Dark);
        assert_eq!(parse_appearance("dark").unwrap(), Appearance::Dark);
        assert!(parse_appearance("system").is_err());
    }
}

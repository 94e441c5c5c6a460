//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use brick_cache::{Cache, FileStore};
use brick_commerce::prelude::*;

use crate::config::BrickConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: BrickConfig,
    /// Output handler.
    pub output: Output,
    /// Product catalog.
    pub catalog: Catalog,
    /// Storage shared by every store.
    pub cache: Cache,
}

impl Context {
    /// Load context from config file.
    ///
    /// `data_dir` overrides the configured storage directory.
    pub fn load(
        config_path: Option<&str>,
        data_dir: Option<PathBuf>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            BrickConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };
        if let Some(dir) = data_dir {
            config.storage.data_dir = dir;
        }

        let catalog = Catalog::reference().context("Failed to load product catalog")?;
        let store_dir = resolve(&cwd, &config.storage.data_dir);
        let cache = Cache::new(FileStore::open(store_dir));

        Ok(Self {
            config,
            output,
            catalog,
            cache,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<BrickConfig> {
        let config_names = ["brick.toml", ".brick.toml", "brick.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = BrickConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Look up a product or fail with a readable error.
    pub fn product(&self, id: &str) -> Result<&Product> {
        Ok(self.catalog.require(id)?)
    }

    /// Format an amount with the configured currency symbol.
    pub fn price(&self, amount: Money) -> String {
        amount.display_with(&self.config.store.currency_symbol)
    }

    pub fn cart(&self) -> CartStore {
        CartStore::new(self.cache.clone())
    }

    pub fn wishlist(&self) -> WishlistStore {
        WishlistStore::new(self.cache.clone())
    }

    pub fn compare(&self) -> CompareStore {
        CompareStore::new(self.cache.clone())
    }

    pub fn recently_viewed(&self) -> RecentlyViewedStore {
        RecentlyViewedStore::new(self.cache.clone())
    }

    pub fn reviews(&self) -> ReviewStore {
        ReviewStore::new(self.cache.clone())
    }

    pub fn theme(&self) -> ThemeStore {
        ThemeStore::new(self.cache.clone())
    }

    /// Checkout store backed by the simulated gateway, optionally
    /// scripted to fail.
    pub fn checkout(&self, failure: Option<OrderFailure>) -> CheckoutStore {
        let checkout = &self.config.checkout;
        let mut gateway = SimulatedGateway::new(checkout.simulated_latency());
        if let Some(failure) = failure {
            gateway = gateway.with_failure(failure);
        }
        CheckoutStore::new(Arc::new(gateway)).with_order_timeout(checkout.order_timeout())
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

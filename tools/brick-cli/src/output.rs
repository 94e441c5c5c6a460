//! Terminal rendering for storefront commands.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Writes command results to the terminal.
///
/// With `--json` every human-oriented line is suppressed and commands emit
/// one JSON document through [`Output::json`]; errors still reach stderr.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn human(&self) -> bool {
        !self.json
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("ℹ").blue(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// Non-fatal notice, e.g. a quantity capped at the stock limit.
    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Checkout progress marker, e.g. `[2/4] Pago`.
    pub fn step(&self, current: u8, of: u8, label: &str) {
        if self.human() {
            println!("{} {}", style(format!("[{}/{}]", current, of)).dim(), label);
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{}", doc),
            Err(e) => self.error(&format!("failed to encode output: {}", e)),
        }
    }

    pub fn kv(&self, label: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(label).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// One row of a fixed-width table; cells longer than their column are
    /// cut with an ellipsis.
    pub fn table_row(&self, cells: &[&str], widths: &[usize]) {
        if !self.human() {
            return;
        }
        let row: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{:width$}", fit(cell, width)))
            .collect();
        println!("  {}", row.join("  "));
    }

    /// Spinner shown while the payment gateway works. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner().with_style(style);
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

fn fit(cell: &str, width: usize) -> String {
    if width == 0 || cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Rating as five stars, rounded to the nearest whole star.
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Colored stock label; five or fewer units reads as low stock.
pub fn stock_badge(stock: u32) -> String {
    match stock {
        0 => style("out of stock").red().to_string(),
        1..=5 => style(format!("only {} left", stock)).yellow().to_string(),
        _ => style(format!("{} in stock", stock)).green().to_string(),
    }
}

//! Product comparison commands.

use anyhow::{bail, Result};
use brick_commerce::catalog::Product;
use brick_commerce::compare::MAX_COMPARE_ITEMS;

use super::{CompareArgs, CompareCommand};
use crate::context::Context;
use crate::output::stars;

/// Run the compare command.
pub async fn run(args: CompareArgs, ctx: &Context) -> Result<()> {
    let mut compare = ctx.compare();

    match args.command {
        Some(CompareCommand::Show) | None => {}
        Some(CompareCommand::Add { id }) => {
            let product = ctx.product(&id)?;
            if compare.is_in_compare(&id) {
                ctx.output.info(&format!("{} is already being compared", product.name));
            } else if !compare.add_to_compare(product) {
                ctx.output.warn(&format!(
                    "You can compare at most {} products; remove one first",
                    MAX_COMPARE_ITEMS
                ));
            } else {
                ctx.output.success(&format!("Comparing {}", product.name));
            }
        }
        Some(CompareCommand::Remove { id }) => {
            if !compare.remove_from_compare(&id) {
                bail!("Product {} is not being compared", id);
            }
            ctx.output.success(&format!("Removed {} from comparison", id));
        }
        Some(CompareCommand::Clear) => {
            compare.clear_compare();
            ctx.output.success("Comparison cleared");
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&compare.items());
        return Ok(());
    }

    ctx.output.header(&format!(
        "Compare ({}/{})",
        compare.items().len(),
        MAX_COMPARE_ITEMS
    ));
    if compare.items().is_empty() {
        ctx.output.info("No products selected.");
        return Ok(());
    }

    // One column per product, one row per attribute.
    let items = compare.items();
    let mut widths = vec![10];
    widths.extend(std::iter::repeat(24).take(items.len()));

    for label in ["", "Price", "Theme", "Age", "Pieces", "Rating", "Stock"] {
        let values: Vec<String> = items.iter().map(|p| attribute(label, p, ctx)).collect();
        let mut cols = vec![label];
        cols.extend(values.iter().map(String::as_str));
        ctx.output.table_row(&cols, &widths);
    }
    Ok(())
}

fn attribute(label: &str, product: &Product, ctx: &Context) -> String {
    match label {
        "Price" => ctx.price(product.price),
        "Theme" => product.theme.clone(),
        "Age" => product.age.clone(),
        "Pieces" => product.pieces.clone(),
        "Rating" => stars(product.rating),
        "Stock" => product.stock.to_string(),
        _ => product.name.clone(),
    }
}

//! Shopping cart commands.

use anyhow::{bail, Result};
use brick_commerce::cart::CartStore;
use brick_commerce::catalog::Product;
use brick_commerce::checkout::OrderSummary;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart();

    match args.command {
        Some(CartCommand::Show) | None => {}
        Some(CartCommand::Add { id, quantity }) => {
            let product = ctx.product(&id)?;
            if !product.is_in_stock() {
                bail!("{} is out of stock", product.name);
            }
            let added = add_units(&mut cart, product, quantity);
            if let Some(ceiling) = added.capped_at {
                ctx.output.warn(&format!(
                    "Only {} of {} in stock; quantity capped at {}",
                    ceiling, product.name, added.held
                ));
            }
            ctx.output
                .success(&format!("{} x {} in cart", added.held, product.name));
        }
        Some(CartCommand::Remove { id }) => {
            if !cart.remove_item(&id) {
                bail!("Product {} is not in the cart", id);
            }
            ctx.output.success(&format!("Removed {} from cart", id));
        }
        Some(CartCommand::Inc { id }) => {
            if !cart.is_in_cart(&id) {
                bail!("Product {} is not in the cart", id);
            }
            if !cart.increase_quantity(&id) {
                ctx.output.warn("Already at the stock limit");
            }
        }
        Some(CartCommand::Dec { id }) => {
            if !cart.is_in_cart(&id) {
                bail!("Product {} is not in the cart", id);
            }
            if !cart.decrease_quantity(&id) {
                ctx.output
                    .warn("Quantity is already 1; use `brick cart remove` to drop the line");
            }
        }
        Some(CartCommand::Clear) => {
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    show_cart(&cart, ctx);
    Ok(())
}

/// Result of adding units to the cart.
#[derive(Debug, PartialEq, Eq)]
struct Added {
    /// Quantity now held.
    held: u32,
    /// The line's stock ceiling, when the request was cut down to it.
    capped_at: Option<u32>,
}

fn add_units(cart: &mut CartStore, product: &Product, quantity: u32) -> Added {
    let id = product.id.as_str();
    let before = cart.cart().line(id).map_or(0, |l| l.quantity);
    let held = cart.add_item(product, quantity);
    let capped_at = if held < before.saturating_add(quantity) {
        cart.cart().line(id).map(|l| l.stock_ceiling)
    } else {
        None
    };
    Added { held, capped_at }
}

fn show_cart(cart: &CartStore, ctx: &Context) {
    let policy = ctx.config.checkout.shipping_policy();
    let summary = OrderSummary::from_cart(cart.cart(), &policy);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": cart.lines(),
            "summary": summary,
        }));
        return;
    }

    ctx.output.header("Cart");
    if cart.lines().is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [4, 36, 6, 12, 12];
    ctx.output.table_row(&["ID", "NAME", "QTY", "PRICE", "TOTAL"], &widths);
    for line in cart.lines() {
        let qty = if line.is_at_ceiling() {
            format!("{}*", line.quantity)
        } else {
            line.quantity.to_string()
        };
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &qty,
                &ctx.price(line.price),
                &ctx.price(line.total()),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Items", &cart.get_total_quantity().to_string());
    ctx.output.kv("Subtotal", &ctx.price(summary.subtotal));
    if summary.has_free_shipping() {
        ctx.output.kv("Shipping", "free");
    } else {
        ctx.output.kv("Shipping", &ctx.price(summary.shipping));
        ctx.output.kv(
            "Free shipping in",
            &ctx.price(policy.remaining_for_free_shipping(summary.subtotal)),
        );
    }
    ctx.output.kv("Total", &ctx.price(summary.total));
    if cart.lines().iter().any(|l| l.is_at_ceiling()) {
        ctx.output.debug("* at stock limit");
    }
}

//! Checkout command: runs the four-step flow for the current cart.

use std::time::Duration;

use anyhow::{bail, Result};
use brick_commerce::checkout::{
    CheckoutError, CheckoutStep, FieldError, OrderFailure, OrderSummary, PaymentInfo,
    ShippingInfo,
};

use super::{CheckoutArgs, SimulatedFailure};
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart();
    if cart.lines().is_empty() {
        bail!("Your cart is empty. Add products with `brick cart add <id>`.");
    }

    let policy = ctx.config.checkout.shipping_policy();
    let summary = OrderSummary::from_cart(cart.cart(), &policy);
    let (shipping, payment) = forms(&args);

    let total = 4;
    ctx.output
        .step(CheckoutStep::Shipping.number(), total, CheckoutStep::Shipping.display_name());
    report(ctx, shipping.validate())?;

    ctx.output
        .step(CheckoutStep::Payment.number(), total, CheckoutStep::Payment.display_name());
    report(ctx, payment.validate())?;

    let checkout = match args.simulate_failure {
        None => ctx.checkout(None),
        Some(SimulatedFailure::Network) => ctx.checkout(Some(OrderFailure::Network(
            "connection reset by gateway".to_string(),
        ))),
        Some(SimulatedFailure::Declined) => ctx.checkout(Some(OrderFailure::Declined(
            "insufficient funds".to_string(),
        ))),
        Some(SimulatedFailure::Timeout) => {
            // Give up halfway through the simulated latency.
            let latency = ctx.config.checkout.simulated_latency().max(Duration::from_secs(1));
            ctx.checkout(None).with_order_timeout(latency / 2)
        }
    };

    checkout.set_shipping_info(shipping.clone())?;
    checkout.set_payment_info(payment.clone())?;

    ctx.output
        .step(CheckoutStep::Review.number(), total, CheckoutStep::Review.display_name());
    ctx.output.kv("Ship to", &shipping.one_line());
    ctx.output.kv("Card", &payment.masked_number());
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Subtotal", &ctx.price(summary.subtotal));
    if summary.has_free_shipping() {
        ctx.output.kv("Shipping", "free");
    } else {
        ctx.output.kv("Shipping", &ctx.price(summary.shipping));
    }
    ctx.output.kv("Total", &ctx.price(summary.total));

    let spinner = ctx.output.spinner("Processing payment...");
    let result = checkout.process_order(summary).await;
    spinner.finish_and_clear();

    match result {
        Ok(order_id) => {
            if !args.keep_cart {
                cart.clear_cart();
            }
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "orderId": order_id,
                    "summary": summary,
                    "step": checkout.current_step(),
                }));
            } else {
                ctx.output.step(
                    CheckoutStep::Confirmation.number(),
                    total,
                    CheckoutStep::Confirmation.display_name(),
                );
                ctx.output.success(&format!("Order {} placed", order_id));
                ctx.output.info(&format!("Confirmation sent to {}", shipping.email));
            }
            Ok(())
        }
        Err(CheckoutError::Order(failure)) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "error": failure.to_string(),
                    "reason": failure.reason(),
                    "retryable": failure.is_retryable(),
                }));
            }
            if failure.is_retryable() {
                ctx.output.warn("Your cart was kept; run the checkout again to retry");
            }
            bail!("{}", failure)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build both forms from the flags, trimmed the way a form is on submit.
fn forms(args: &CheckoutArgs) -> (ShippingInfo, PaymentInfo) {
    let field = |s: &String| s.trim().to_string();
    (
        ShippingInfo {
            first_name: field(&args.first_name),
            last_name: field(&args.last_name),
            email: field(&args.email),
            phone: field(&args.phone),
            address: field(&args.address),
            city: field(&args.city),
            state: field(&args.state),
            zip_code: field(&args.zip_code),
            country: field(&args.country),
        },
        PaymentInfo {
            card_number: field(&args.card_number),
            card_name: field(&args.card_name),
            expiry_date: field(&args.expiry),
            cvv: field(&args.cvv),
        },
    )
}

fn report(ctx: &Context, result: Result<(), Vec<FieldError>>) -> Result<()> {
    let Err(errors) = result else {
        return Ok(());
    };
    if ctx.output.is_json() {
        let fields: Vec<_> = errors
            .iter()
            .map(|e| serde_json::json!({ "field": e.field, "message": e.message }))
            .collect();
        ctx.output.json(&serde_json::json!({ "invalid": fields }));
    } else {
        for error in &errors {
            ctx.output.list_item(&error.to_string());
        }
    }
    bail!("{} invalid field(s)", errors.len())
}

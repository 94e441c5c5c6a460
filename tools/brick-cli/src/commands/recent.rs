//! Recently viewed products.

use anyhow::Result;

use super::{RecentArgs, RecentCommand};
use crate::context::Context;

/// Run the recent command.
pub async fn run(args: RecentArgs, ctx: &Context) -> Result<()> {
    let mut recent = ctx.recently_viewed();

    if let Some(RecentCommand::Clear) = args.command {
        recent.clear_all();
        ctx.output.success("History cleared");
        return Ok(());
    }

    let items = recent.get_items();
    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Recently viewed");
    if items.is_empty() {
        ctx.output.info("Nothing viewed yet. Try `brick products show <id>`.");
        return Ok(());
    }
    for product in items {
        ctx.output.list_item(&format!(
            "{} {} ({})",
            product.id,
            product.name,
            ctx.price(product.price)
        ));
    }
    Ok(())
}

//! Wishlist commands.

use anyhow::{bail, Result};
use brick_commerce::cart::CartStore;
use brick_commerce::catalog::Product;
use brick_commerce::wishlist::WishlistStore;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let mut wishlist = ctx.wishlist();

    match args.command {
        Some(WishlistCommand::Show) | None => {}
        Some(WishlistCommand::Add { id }) => {
            let product = ctx.product(&id)?;
            if wishlist.add_to_wishlist(product) {
                ctx.output.success(&format!("Saved {}", product.name));
            } else {
                ctx.output.info(&format!("{} is already in your wishlist", product.name));
            }
        }
        Some(WishlistCommand::Remove { id }) => {
            if !wishlist.remove_from_wishlist(&id) {
                bail!("Product {} is not in the wishlist", id);
            }
            ctx.output.success(&format!("Removed {} from wishlist", id));
        }
        Some(WishlistCommand::MoveToCart { id }) => {
            if !wishlist.is_in_wishlist(&id) {
                bail!("Product {} is not in the wishlist", id);
            }
            let product = ctx.product(&id)?;
            match move_to_cart(&mut wishlist, &mut ctx.cart(), product) {
                Moved::Yes => ctx.output.success(&format!("Moved {} to cart", product.name)),
                Moved::AtLimit => ctx.output.warn(&format!(
                    "{} is already in your cart at the stock limit; kept in wishlist",
                    product.name
                )),
                Moved::OutOfStock => bail!("{} is out of stock", product.name),
            }
        }
        Some(WishlistCommand::Clear) => {
            wishlist.clear_wishlist();
            ctx.output.success("Wishlist cleared");
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&wishlist.entries());
        return Ok(());
    }

    ctx.output.header(&format!(
        "Wishlist ({})",
        wishlist.get_total_wishlist_quantity()
    ));
    if wishlist.entries().is_empty() {
        ctx.output.info("Nothing saved yet.");
        return Ok(());
    }

    let widths = [4, 36, 18, 12, 8];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for entry in wishlist.entries() {
        ctx.output.table_row(
            &[
                entry.product_id.as_str(),
                &entry.name,
                &entry.category,
                &ctx.price(entry.price),
                &entry.stock.to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Moved {
    Yes,
    /// The cart already holds all the stock; nothing was added.
    AtLimit,
    OutOfStock,
}

/// Add one unit to the cart and drop the wishlist entry, but only if the
/// cart actually took it.
fn move_to_cart(wishlist: &mut WishlistStore, cart: &mut CartStore, product: &Product) -> Moved {
    let id = product.id.as_str();
    let before = cart.cart().line(id).map_or(0, |l| l.quantity);
    let held = cart.add_item(product, 1);
    if held == before {
        return if held == 0 {
            Moved::OutOfStock
        } else {
            Moved::AtLimit
        };
    }
    wishlist.remove_from_wishlist(id);
    Moved::Yes
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_cache::{Cache, MemoryStore};
    use brick_commerce::catalog::Catalog;

    fn stores() -> (WishlistStore, CartStore) {
        let cache = Cache::new(MemoryStore::new());
        (WishlistStore::new(cache.clone()), CartStore::new(cache))
    }

    fn falcon() -> Product {
        Catalog::reference().unwrap().get("15").cloned().unwrap()
    }

    #[test]
    fn test_move_to_cart() {
        let (mut wishlist, mut cart) = stores();
        let falcon = falcon();
        wishlist.add_to_wishlist(&falcon);

        assert_eq!(move_to_cart(&mut wishlist, &mut cart, &falcon), Moved::Yes);
        assert!(!wishlist.is_in_wishlist("15"));
        assert_eq!(cart.get_total_quantity(), 1);
    }

    #[test]
    fn test_move_to_cart_at_stock_limit_keeps_entry() {
        let (mut wishlist, mut cart) = stores();
        let falcon = falcon();
        cart.add_item(&falcon, falcon.stock);
        wishlist.add_to_wishlist(&falcon);

        assert_eq!(move_to_cart(&mut wishlist, &mut cart, &falcon), Moved::AtLimit);
        assert!(wishlist.is_in_wishlist("15"));
        assert_eq!(cart.get_total_quantity(), falcon.stock);
    }

    #[test]
    fn test_move_to_cart_out_of_stock() {
        let (mut wishlist, mut cart) = stores();
        let mut sold_out = falcon();
        sold_out.stock = 0;
        wishlist.add_to_wishlist(&sold_out);

        assert_eq!(move_to_cart(&mut wishlist, &mut cart, &sold_out), Moved::OutOfStock);
        assert!(wishlist.is_in_wishlist("15"));
        assert!(cart.lines().is_empty());
    }
}

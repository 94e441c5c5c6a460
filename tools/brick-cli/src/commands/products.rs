//! Catalog browsing commands.

use anyhow::Result;
use brick_commerce::catalog::{facet_configs, Product};
use brick_commerce::search::{related_to, search, ProductFilters, ProductQuery};

use super::{ListArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{stars, stock_badge};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List(list) => list_products(list, ctx),
        ProductsCommand::Show { id } => show_product(&id, ctx),
        ProductsCommand::Search { query } => search_products(&query.join(" "), ctx),
        ProductsCommand::Related { id, limit } => {
            ctx.product(&id)?;
            let related = related_to(ctx.catalog.products(), &id, limit);
            print_products(&format!("Related to {}", id), &related, ctx);
            Ok(())
        }
        ProductsCommand::Featured { limit } => {
            print_products("Featured", &ctx.catalog.featured(limit), ctx);
            Ok(())
        }
        ProductsCommand::Sale { limit } => {
            print_products("On sale", &ctx.catalog.on_sale(limit), ctx);
            Ok(())
        }
        ProductsCommand::Facets => show_facets(ctx),
    }
}

fn list_products(args: ListArgs, ctx: &Context) -> Result<()> {
    let mut filters = ProductFilters::new();
    for (key, value) in &args.filters {
        if !filters.values(*key).contains(value) {
            filters.toggle(*key, value);
        }
    }

    let mut query = ProductQuery::new()
        .with_filters(filters)
        .with_sort(args.sort)
        .with_pagination(args.page, args.per_page);
    if let Some(category) = &args.category {
        query = query.with_category(category);
    }
    if let Some(theme) = &args.theme {
        query = query.with_theme(theme);
    }
    if let Some(terms) = &args.search {
        query = query.with_search(terms);
    }

    let page = query.execute(ctx.catalog.products());

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    let p = page.pagination;
    ctx.output.header(&format!(
        "{} ({} products, sorted by {})",
        ctx.config.store.name,
        p.total,
        args.sort.display_name()
    ));

    if page.is_empty() {
        if p.total == 0 {
            ctx.output.info("No products match these filters.");
        } else {
            ctx.output
                .info(&format!("Page {} is past the last page ({}).", p.page, p.total_pages));
        }
        return Ok(());
    }

    print_table(&page.products, ctx);
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));
    if p.has_next {
        ctx.output.info(&format!("Next page: --page {}", p.page + 1));
    }
    Ok(())
}

fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let product = ctx.product(id)?;
    ctx.recently_viewed().add_item(product);

    let summary = ctx.reviews().summary(id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "reviews": summary,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &price_label(product, ctx));
    ctx.output.kv("Theme", &product.theme);
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Type", &product.product_type);
    ctx.output.kv("Age", &product.age);
    ctx.output.kv("Pieces", &product.pieces);
    if !product.interests.is_empty() {
        ctx.output.kv("Interests", &product.interests.join(", "));
    }
    ctx.output.kv("Stock", &stock_badge(product.stock));
    ctx.output.kv(
        "Rating",
        &format!("{} {:.1}", stars(product.rating), product.rating),
    );

    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }

    ctx.output.header("Reviews");
    if summary.total_reviews == 0 {
        ctx.output.info("No reviews yet.");
    } else {
        ctx.output.kv(
            "Average",
            &format!(
                "{} {:.1} ({} reviews)",
                stars(summary.average_rating),
                summary.average_rating,
                summary.total_reviews
            ),
        );
    }
    Ok(())
}

fn search_products(query: &str, ctx: &Context) -> Result<()> {
    let hits = search(ctx.catalog.products(), query);
    if hits.is_empty() && !ctx.output.is_json() {
        ctx.output.info(&format!(
            "No results for '{}'. Queries need at least {} characters.",
            query.trim(),
            brick_commerce::search::MIN_QUERY_LEN
        ));
        return Ok(());
    }
    print_products(&format!("Results for '{}'", query.trim()), &hits, ctx);
    Ok(())
}

fn show_facets(ctx: &Context) -> Result<()> {
    let configs = facet_configs();
    let options = ctx.catalog.filter_options();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "facets": configs,
            "catalog": options,
        }));
        return Ok(());
    }

    for config in &configs {
        ctx.output
            .header(&format!("{} (--filter {}=...)", config.label, config.key));
        for option in config.options {
            ctx.output.list_item(option);
        }
    }
    ctx.output.header("Categories");
    for category in &options.categories {
        ctx.output.list_item(category);
    }
    Ok(())
}

fn print_products(title: &str, products: &[&Product], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }
    ctx.output.header(title);
    if products.is_empty() {
        ctx.output.info("Nothing to show.");
        return;
    }
    print_table(products, ctx);
}

fn print_table(products: &[&Product], ctx: &Context) {
    ctx.output
        .table_row(&["ID", "NAME", "THEME", "PRICE", "STOCK"], &[4, 36, 14, 18, 8]);
    for product in products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.theme,
                &price_label(product, ctx),
                &product.stock.to_string(),
            ],
            &[4, 36, 14, 18, 8],
        );
    }
}

fn price_label(product: &Product, ctx: &Context) -> String {
    match product.discount_percent() {
        Some(percent) => format!("{} (-{}%)", ctx.price(product.price), percent),
        None => ctx.price(product.price),
    }
}

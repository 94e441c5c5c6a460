//! Product review commands.

use anyhow::{bail, Result};
use brick_commerce::ids::UserId;
use brick_commerce::reviews::{NewReview, MAX_RATING, MIN_RATING};

use super::{ReviewsArgs, ReviewsCommand};
use crate::context::Context;
use crate::output::stars;

/// Run the reviews command.
pub async fn run(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ReviewsCommand::List { id } => list_reviews(&id, ctx),
        ReviewsCommand::Add {
            id,
            rating,
            title,
            comment,
            user_name,
            user_id,
            verified,
        } => {
            let product = ctx.product(&id)?;
            if !(MIN_RATING..=MAX_RATING).contains(&rating) {
                bail!("Rating must be between {} and {}", MIN_RATING, MAX_RATING);
            }
            if title.trim().is_empty() || comment.trim().is_empty() {
                bail!("A review needs a title and a comment");
            }

            let review_id = ctx.reviews().add_review(NewReview {
                product_id: product.id.clone(),
                user_id: UserId::new(user_id),
                user_name,
                rating,
                title,
                comment,
                verified,
            });

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "id": review_id }));
            } else {
                ctx.output
                    .success(&format!("Review {} added to {}", review_id, product.name));
            }
            Ok(())
        }
        ReviewsCommand::Helpful { review_id } => {
            if !ctx.reviews().mark_helpful(&review_id) {
                bail!("Review {} not found", review_id);
            }
            ctx.output.success("Thanks for your feedback");
            Ok(())
        }
    }
}

fn list_reviews(id: &str, ctx: &Context) -> Result<()> {
    let product = ctx.product(id)?;
    let store = ctx.reviews();
    let summary = store.summary(id);
    let reviews = store.get_product_reviews(id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": summary,
            "reviews": reviews,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Reviews for {}", product.name));
    if reviews.is_empty() {
        ctx.output.info("No reviews yet. Be the first with `brick reviews add`.");
        return Ok(());
    }

    ctx.output.kv(
        "Average",
        &format!(
            "{} {:.1} ({} reviews)",
            stars(summary.average_rating),
            summary.average_rating,
            summary.total_reviews
        ),
    );
    for star in (MIN_RATING..=MAX_RATING).rev() {
        ctx.output.kv(
            &format!("{} stars", star),
            &format!(
                "{:>3} ({:.0}%)",
                summary.distribution.count(star),
                summary.distribution.percentage(star)
            ),
        );
    }

    for review in reviews {
        let badge = if review.verified { " [verified]" } else { "" };
        ctx.output.header(&format!("{} {}", review.stars(), review.title));
        ctx.output
            .kv("By", &format!("{} on {}{}", review.user_name, review.date, badge));
        println!("  {}", review.comment);
        ctx.output
            .kv("Helpful", &format!("{} (id {})", review.helpful, review.id));
    }
    Ok(())
}


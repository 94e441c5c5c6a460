//! Product reviews.
//!
//! One list holds the reviews of every product, newest first. Reviews are
//! append-only apart from the helpful counter.

use brick_cache::{Cache, Persisted, StorageKey};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ids::{ProductId, ReviewId, UserId};

/// Lowest and highest star rating.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A stored review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    /// Creation date.
    pub date: NaiveDate,
    pub helpful: u32,
    /// Taken from the caller as is.
    pub verified: bool,
}

impl Review {
    /// Star rating as text, e.g. `★★★★☆`.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(MAX_RATING));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// Caller-supplied review data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub verified: bool,
}

/// Count of reviews per star level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingDistribution {
    pub five_star: u32,
    pub four_star: u32,
    pub three_star: u32,
    pub two_star: u32,
    pub one_star: u32,
}

impl RatingDistribution {
    fn record(&mut self, stars: u8) {
        match stars {
            5 => self.five_star += 1,
            4 => self.four_star += 1,
            3 => self.three_star += 1,
            2 => self.two_star += 1,
            1 => self.one_star += 1,
            _ => {}
        }
    }

    /// Reviews with the given number of stars.
    pub fn count(&self, stars: u8) -> u32 {
        match stars {
            5 => self.five_star,
            4 => self.four_star,
            3 => self.three_star,
            2 => self.two_star,
            1 => self.one_star,
            _ => 0,
        }
    }

    pub fn total(&self) -> u32 {
        (MIN_RATING..=MAX_RATING).map(|s| self.count(s)).sum()
    }

    /// Share of reviews with the given number of stars, 0 to 100.
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(stars)) / f64::from(total) * 100.0
    }
}

/// Aggregate view of one product's reviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewSummary {
    pub product_id: ProductId,
    pub average_rating: f64,
    pub total_reviews: u32,
    pub distribution: RatingDistribution,
}

/// All reviews, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewBook {
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl ReviewBook {
    /// Insert a review at the front, dated `date`. The rating is clamped
    /// into `1..=5`.
    pub fn add(&mut self, new: NewReview, date: NaiveDate) -> ReviewId {
        let id = ReviewId::generate();
        self.reviews.insert(
            0,
            Review {
                id: id.clone(),
                product_id: new.product_id,
                user_id: new.user_id,
                user_name: new.user_name,
                rating: new.rating.clamp(MIN_RATING, MAX_RATING),
                title: new.title,
                comment: new.comment,
                date,
                helpful: 0,
                verified: new.verified,
            },
        );
        id
    }

    /// A product's reviews, newest first.
    pub fn for_product(&self, product_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .collect()
    }

    /// Mean rating rounded to one decimal; 0 with no reviews.
    pub fn average_rating(&self, product_id: &str) -> f64 {
        let ratings: Vec<f64> = self
            .for_product(product_id)
            .iter()
            .map(|r| f64::from(r.rating))
            .collect();
        if ratings.is_empty() {
            return 0.0;
        }
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Bump a review's helpful counter. Unknown ids are ignored.
    pub fn mark_helpful(&mut self, review_id: &str) -> bool {
        match self.reviews.iter_mut().find(|r| r.id == review_id) {
            Some(review) => {
                review.helpful = review.helpful.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn summary(&self, product_id: &str) -> ReviewSummary {
        let mut distribution = RatingDistribution::default();
        for review in self.for_product(product_id) {
            distribution.record(review.rating);
        }
        ReviewSummary {
            product_id: ProductId::new(product_id),
            average_rating: self.average_rating(product_id),
            total_reviews: distribution.total(),
            distribution,
        }
    }
}

/// Persisted review store.
#[derive(Debug)]
pub struct ReviewStore {
    state: Persisted<ReviewBook>,
}

impl ReviewStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            state: Persisted::load(cache, StorageKey::Reviews),
        }
    }

    /// Add a review dated today.
    pub fn add_review(&mut self, new: NewReview) -> ReviewId {
        let today = Local::now().date_naive();
        let product_id = new.product_id.clone();
        let id = self.state.update(|book| book.add(new, today));
        debug!(review_id = %id, product_id = %product_id, "review added");
        id
    }

    pub fn get_product_reviews(&self, product_id: &str) -> Vec<&Review> {
        self.state.state().for_product(product_id)
    }

    pub fn get_average_rating(&self, product_id: &str) -> f64 {
        self.state.state().average_rating(product_id)
    }

    /// Repeat calls keep counting; callers decide whether a user may vote
    /// twice.
    pub fn mark_helpful(&mut self, review_id: &str) -> bool {
        self.state.update(|book| book.mark_helpful(review_id))
    }

    pub fn summary(&self, product_id: &str) -> ReviewSummary {
        self.state.state().summary(product_id)
    }

    pub fn reviews(&self) -> &[Review] {
        &self.state.state().reviews
    }
}

//! Product review types.

use crate::error::MarketError;
use crate::ids::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// One user's rating and optional comment for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Reviewing user.
    pub user_id: UserId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Star rating, 1-5.
    pub rating: i64,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Review {
    /// Create a new review, validating the rating range.
    pub fn new(
        user_id: UserId,
        product_id: ProductId,
        rating: i64,
        comment: Option<String>,
    ) -> Result<Self, MarketError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(MarketError::InvalidRating(rating));
        }
        Ok(Self {
            id: ReviewId::generate(),
            user_id,
            product_id,
            rating,
            comment,
            created_at: current_timestamp(),
        })
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let user = UserId::new("usr_1");
        let product = ProductId::new("prod_1");

        for rating in MIN_RATING..=MAX_RATING {
            assert!(Review::new(user.clone(), product.clone(), rating, None).is_ok());
        }
        assert!(matches!(
            Review::new(user.clone(), product.clone(), 0, None),
            Err(MarketError::InvalidRating(0))
        ));
        assert!(Review::new(user, product, 6, None).is_err());
    }
}

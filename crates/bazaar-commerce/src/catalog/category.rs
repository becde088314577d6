//! Category types for product organization.
//!
//! Categories form at most two levels: root categories and their direct
//! subcategories. A category can never be its own ancestor.

use crate::error::MarketError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Parent category (None for root categories).
    pub parent_id: Option<CategoryId>,
    /// Category name.
    pub name: String,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Category {
    /// Create a new root category.
    pub fn new_root(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            parent_id: None,
            name: name.into(),
            slug: slug.into(),
            created_at: current_timestamp(),
        }
    }

    /// Create a subcategory of a root category.
    ///
    /// Only one level of nesting is allowed: a subcategory cannot itself
    /// have children.
    pub fn new_child(
        parent: &Category,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Result<Self, MarketError> {
        if parent.is_subcategory() {
            return Err(MarketError::InvalidCategoryParent(
                parent.id.as_str().to_string(),
            ));
        }
        Ok(Self {
            id: CategoryId::generate(),
            parent_id: Some(parent.id.clone()),
            name: name.into(),
            slug: slug.into(),
            created_at: current_timestamp(),
        })
    }

    /// Check if this category has a parent.
    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
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
    fn test_root_category() {
        let cat = Category::new_root("Electronics", "electronics");
        assert!(!cat.is_subcategory());
    }

    #[test]
    fn test_child_category() {
        let parent = Category::new_root("Electronics", "electronics");
        let child = Category::new_child(&parent, "Phones", "phones").unwrap();
        assert!(child.is_subcategory());
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_grandchild_rejected() {
        let parent = Category::new_root("Electronics", "electronics");
        let child = Category::new_child(&parent, "Phones", "phones").unwrap();
        let result = Category::new_child(&child, "Android", "android");
        assert!(matches!(
            result,
            Err(MarketError::InvalidCategoryParent(_))
        ));
    }
}

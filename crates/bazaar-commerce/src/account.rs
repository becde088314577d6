//! User accounts and roles.

use crate::error::MarketError;
use crate::ids::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular shopper.
    #[default]
    Customer,
    /// Sells products through the marketplace.
    Vendor,
    /// Moderates users, products, and orders.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Vendor => "vendor",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may move orders through fulfilment.
    pub fn can_manage_orders(&self) -> bool {
        matches!(self, Role::Vendor | Role::Admin)
    }
}

impl FromStr for Role {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "vendor" => Ok(Role::Vendor),
            "admin" => Ok(Role::Admin),
            other => Err(MarketError::Validation(format!("unknown role: {other}"))),
        }
    }
}

/// A registered user.
///
/// The role is assigned at registration and immutable afterwards; role
/// changes are an external admin concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Unix timestamp of registration.
    pub created_at: i64,
}

impl User {
    /// Create a new user.
    ///
    /// Rejects empty usernames and emails without an `@`; uniqueness is
    /// enforced by the user store.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Result<Self, MarketError> {
        let username = username.into();
        let email = email.into();
        if username.trim().is_empty() {
            return Err(MarketError::Validation("username must not be empty".into()));
        }
        if !email.contains('@') {
            return Err(MarketError::Validation(format!("invalid email: {email}")));
        }
        Ok(Self {
            id: UserId::generate(),
            username,
            email,
            role,
            created_at: current_timestamp(),
        })
    }

    /// Check whether this user is a vendor.
    pub fn is_vendor(&self) -> bool {
        self.role == Role::Vendor
    }

    /// Check whether this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
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
    fn test_role_round_trip() {
        assert_eq!("vendor".parse::<Role>().unwrap(), Role::Vendor);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_order_management_roles() {
        assert!(!Role::Customer.can_manage_orders());
        assert!(Role::Vendor.can_manage_orders());
        assert!(Role::Admin.can_manage_orders());
    }

    #[test]
    fn test_user_validation() {
        assert!(User::new("alice", "alice@example.com", Role::Customer).is_ok());
        assert!(User::new("", "alice@example.com", Role::Customer).is_err());
        assert!(User::new("alice", "not-an-email", Role::Customer).is_err());
    }
}

//! User domain type.

use chrono::{DateTime, Utc};

use haven_core::{Email, UserId};

/// A registered account (domain type).
///
/// The password hash deliberately lives outside this struct; it is written
/// at registration and never read back, so it can never reach a serializer
/// by accident.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address (unique).
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

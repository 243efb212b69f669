//! User views.
//!
//! The password hash never reaches these types: repositories keep it out of
//! the domain `User` entirely.

use serde::Serialize;

use haven_core::{Email, UserId};

use crate::models::{Orphanage, User};
use crate::views::orphanages::{self, OrphanageView};

/// Wire representation of a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Wire representation of a user plus the computed orphanage listing.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithOrphanagesView {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub orphanages: Vec<OrphanageView>,
}

/// Project a single user.
#[must_use]
pub fn render(user: &User) -> UserView {
    UserView {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Project a collection of users.
#[must_use]
pub fn render_many(users: &[User]) -> Vec<UserView> {
    users.iter().map(render).collect()
}

/// Project a user with the orphanage listing attached.
#[must_use]
pub fn render_with_orphanages(user: &User, orphanages: &[Orphanage]) -> UserWithOrphanagesView {
    UserWithOrphanagesView {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        orphanages: orphanages::render_many(orphanages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: UserId::new(1),
            name: "Ana".to_owned(),
            email: Email::parse("ana@example.com").expect("valid email"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_exposes_only_whitelisted_keys() {
        let value = serde_json::to_value(render(&user())).expect("serialize");
        let obj = value.as_object().expect("object");

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["email", "id", "name"]);
    }

    #[test]
    fn test_render_never_leaks_a_hash() {
        let json = serde_json::to_string(&render(&user())).expect("serialize");
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }

    #[test]
    fn test_render_many() {
        let views = render_many(&[user(), user()]);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].email.as_str(), "ana@example.com");
    }

    #[test]
    fn test_render_with_orphanages_empty_listing() {
        let view = render_with_orphanages(&user(), &[]);
        let value = serde_json::to_value(view).expect("serialize");
        assert!(value["orphanages"].as_array().expect("array").is_empty());
    }
}

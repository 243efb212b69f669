//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories hand-map rows into them.

pub mod orphanage;
pub mod user;

pub use orphanage::{Image, NewOrphanage, Orphanage};
pub use user::User;

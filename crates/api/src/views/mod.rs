//! View serializers.
//!
//! Pure projections from domain types to the field subsets exposed over the
//! wire. Each module offers a `render` for one entity and a `render_many`
//! for a collection; anything not whitelisted here (password hashes,
//! timestamps, internal columns) never leaves the process.

pub mod images;
pub mod orphanages;
pub mod users;

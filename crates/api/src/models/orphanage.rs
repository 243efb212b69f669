//! Orphanage and image domain types.

use chrono::{DateTime, Utc};

use haven_core::{Coordinates, ImageId, OrphanageId};

/// A listed care facility (domain type).
#[derive(Debug, Clone)]
pub struct Orphanage {
    /// Unique orphanage ID.
    pub id: OrphanageId,
    /// Facility name.
    pub name: String,
    /// Map position, validated on the way in.
    pub coordinates: Coordinates,
    /// Free-text description.
    pub about: String,
    /// Visiting instructions.
    pub instructions: String,
    /// Opening hours, free text (e.g. "9am to 6pm").
    pub opening_hours: String,
    /// Whether the facility receives visitors on weekends.
    pub open_on_weekends: bool,
    /// Whether the listing has been approved for public display.
    pub approved: bool,
    /// Uploaded photos, unordered. Every image belongs to exactly one
    /// orphanage.
    pub images: Vec<Image>,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An uploaded photo owned by exactly one orphanage.
#[derive(Debug, Clone)]
pub struct Image {
    /// Unique image ID.
    pub id: ImageId,
    /// Stored filename, relative to the uploads directory.
    pub path: String,
    /// Owning orphanage.
    pub orphanage_id: OrphanageId,
}

/// Column values for creating or updating an orphanage.
///
/// Images travel separately: the repository receives the already-stored
/// filenames alongside this struct on create.
#[derive(Debug, Clone)]
pub struct NewOrphanage {
    pub name: String,
    pub coordinates: Coordinates,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub approved: bool,
}

//! Orphanage views.

use rust_decimal::Decimal;
use serde::Serialize;

use haven_core::OrphanageId;

use crate::models::Orphanage;
use crate::views::images::{self, ImageView};

/// Wire representation of an orphanage.
///
/// Coordinates serialize as decimal strings, matching the database's
/// `NUMERIC` columns; map clients parse them as lat/lng.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanageView {
    pub id: OrphanageId,
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub approved: bool,
    pub images: Vec<ImageView>,
}

/// Project a single orphanage with its images.
#[must_use]
pub fn render(orphanage: &Orphanage) -> OrphanageView {
    OrphanageView {
        id: orphanage.id,
        name: orphanage.name.clone(),
        latitude: orphanage.coordinates.latitude(),
        longitude: orphanage.coordinates.longitude(),
        about: orphanage.about.clone(),
        instructions: orphanage.instructions.clone(),
        opening_hours: orphanage.opening_hours.clone(),
        open_on_weekends: orphanage.open_on_weekends,
        approved: orphanage.approved,
        images: images::render_many(&orphanage.images),
    }
}

/// Project a collection of orphanages.
#[must_use]
pub fn render_many(orphanages: &[Orphanage]) -> Vec<OrphanageView> {
    orphanages.iter().map(render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use haven_core::{Coordinates, ImageId};

    use crate::models::Image;

    fn orphanage() -> Orphanage {
        Orphanage {
            id: OrphanageId::new(1),
            name: "Lar das Meninas".to_owned(),
            coordinates: Coordinates::new(Decimal::new(-235505199, 7), Decimal::new(-465395699, 7))
                .expect("valid coordinates"),
            about: "A caring home".to_owned(),
            instructions: "Ring the bell".to_owned(),
            opening_hours: "9am to 6pm".to_owned(),
            open_on_weekends: true,
            approved: false,
            images: vec![Image {
                id: ImageId::new(3),
                path: "abc.png".to_owned(),
                orphanage_id: OrphanageId::new(1),
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_whitelists_fields() {
        let value = serde_json::to_value(render(&orphanage())).expect("serialize");
        let obj = value.as_object().expect("object");

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "about",
                "approved",
                "id",
                "images",
                "instructions",
                "latitude",
                "longitude",
                "name",
                "open_on_weekends",
                "opening_hours",
            ]
        );

        // Timestamps are internal-only columns.
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("updated_at"));

        assert_eq!(obj["images"][0]["path"], "/uploads/abc.png");
    }

    #[test]
    fn test_render_many() {
        let views = render_many(&[orphanage(), orphanage()]);
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].name, "Lar das Meninas");
    }
}

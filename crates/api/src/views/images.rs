//! Image views: `{id, path}` only.

use serde::Serialize;

use haven_core::ImageId;

use crate::models::Image;

/// Wire representation of an image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub id: ImageId,
    /// Public URL path under the static uploads mount.
    pub path: String,
}

/// Project a single image.
#[must_use]
pub fn render(image: &Image) -> ImageView {
    ImageView {
        id: image.id,
        path: format!("/uploads/{}", image.path),
    }
}

/// Project a collection of images.
#[must_use]
pub fn render_many(images: &[Image]) -> Vec<ImageView> {
    images.iter().map(render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::OrphanageId;

    fn image() -> Image {
        Image {
            id: ImageId::new(10),
            path: "141411.png".to_owned(),
            orphanage_id: OrphanageId::new(1),
        }
    }

    #[test]
    fn test_render_exposes_only_id_and_path() {
        let value = serde_json::to_value(render(&image())).expect("serialize");
        let obj = value.as_object().expect("object");

        assert_eq!(obj.len(), 2);
        assert_eq!(obj["id"], 10);
        assert_eq!(obj["path"], "/uploads/141411.png");
        // The owning orphanage reference stays internal.
        assert!(!obj.contains_key("orphanage_id"));
    }

    #[test]
    fn test_render_many() {
        let views = render_many(&[image(), image()]);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].path, "/uploads/141411.png");
    }

    #[test]
    fn test_render_many_empty() {
        assert!(render_many(&[]).is_empty());
    }
}

//! Orphanage routes: listing, detail, create with image uploads, update,
//! delete, and single-image deletion.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use haven_core::{Coordinates, ImageId, OrphanageId};

use crate::db::{OrphanageRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::middleware::RequireAuth;
use crate::models::NewOrphanage;
use crate::state::AppState;
use crate::views::orphanages::{self, OrphanageView};

/// Text fields for creating or updating an orphanage.
///
/// Arrives as JSON on update and as multipart text parts on create; both
/// funnel through [`OrphanageFields::validate`] so a missing or malformed
/// field answers 400 either way.
#[derive(Debug, Default, Deserialize)]
pub struct OrphanageFields {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub about: Option<String>,
    pub instructions: Option<String>,
    pub opening_hours: Option<String>,
    pub open_on_weekends: Option<String>,
    pub approved: Option<String>,
}

impl OrphanageFields {
    /// Validate presence and shape, producing the repository DTO.
    fn validate(self) -> Result<NewOrphanage> {
        let name = required(self.name, "name")?;
        let latitude = parse_decimal(&required(self.latitude, "latitude")?, "latitude")?;
        let longitude = parse_decimal(&required(self.longitude, "longitude")?, "longitude")?;
        let about = required(self.about, "about")?;
        let instructions = required(self.instructions, "instructions")?;
        let opening_hours = required(self.opening_hours, "opening_hours")?;
        let open_on_weekends = parse_flag(self.open_on_weekends.as_deref(), "open_on_weekends")?;
        let approved = parse_flag(self.approved.as_deref(), "approved")?;

        let coordinates = Coordinates::new(latitude, longitude)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewOrphanage {
            name,
            coordinates,
            about,
            instructions,
            opening_hours,
            open_on_weekends,
            approved,
        })
    }
}

/// List all orphanages.
///
/// GET /api/v1/orphanages
///
/// # Errors
///
/// 500 on database failure.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<OrphanageView>>> {
    let all = OrphanageRepository::new(state.pool()).find_all().await?;
    Ok(Json(orphanages::render_many(&all)))
}

/// Fetch one orphanage.
///
/// GET /api/v1/orphanages/{id}
///
/// # Errors
///
/// 400 for an unknown ID.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrphanageView>> {
    let orphanage = OrphanageRepository::new(state.pool())
        .find_by_id(OrphanageId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("orphanage {id} does not exist")))?;

    Ok(Json(orphanages::render(&orphanage)))
}

/// Create an orphanage from a multipart form with 0..N `images` file parts.
///
/// POST /api/v1/orphanages
///
/// Files are written to the image store first, then the orphanage and image
/// rows are inserted in one transaction. A failure between the two leaves
/// orphaned files behind (accepted gap, no compensating cleanup).
///
/// # Errors
///
/// 400 for missing/malformed fields, 401 without a token.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    multipart: Multipart,
) -> Result<(StatusCode, Json<OrphanageView>)> {
    let (fields, uploads) = read_multipart(multipart).await?;
    let data = fields.validate()?;

    let mut paths = Vec::with_capacity(uploads.len());
    for (original_name, bytes) in &uploads {
        paths.push(state.images().save(original_name, bytes).await?);
    }

    let orphanage = OrphanageRepository::new(state.pool())
        .create(&data, &paths)
        .await?;

    tracing::info!(orphanage_id = %orphanage.id, images = paths.len(), "orphanage created");

    Ok((StatusCode::CREATED, Json(orphanages::render(&orphanage))))
}

/// Update an orphanage's columns in place.
///
/// PUT /api/v1/orphanages/{id}
///
/// # Errors
///
/// 400 for an unknown ID or malformed fields, 401 without a token.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i32>,
    JsonBody(fields): JsonBody<OrphanageFields>,
) -> Result<Json<OrphanageView>> {
    let data = fields.validate()?;

    let orphanage = OrphanageRepository::new(state.pool())
        .update(OrphanageId::new(id), &data)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("orphanage {id} does not exist")))?;

    Ok(Json(orphanages::render(&orphanage)))
}

/// Delete an orphanage together with all its images.
///
/// DELETE /api/v1/orphanages/{id}
///
/// Image rows go with the orphanage in one transaction; the stored files are
/// unlinked afterwards, best effort.
///
/// # Errors
///
/// 400 for an unknown ID, 401 without a token.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let paths = OrphanageRepository::new(state.pool())
        .delete(OrphanageId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("orphanage {id} does not exist"))
            }
            other => AppError::Database(other),
        })?;

    for path in &paths {
        if let Err(e) = state.images().remove(path).await {
            tracing::warn!(path, error = %e, "failed to unlink image file");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a single image row and its stored file.
///
/// DELETE /api/v1/orphanages/image/{id}
///
/// # Errors
///
/// 400 for an unknown ID, 401 without a token.
pub async fn delete_image(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let repo = OrphanageRepository::new(state.pool());

    let image = repo
        .find_image(ImageId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {id} does not exist")))?;

    repo.delete_image(image.id).await?;
    state.images().remove(&image.path).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Drain a multipart form into text fields and `images` file parts.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(OrphanageFields, Vec<(String, Vec<u8>)>)> {
    let mut fields = OrphanageFields::default();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "images" {
            let original_name = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("unreadable image part: {e}")))?;
            uploads.push((original_name, bytes.to_vec()));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("unreadable field '{name}': {e}")))?;

        match name.as_str() {
            "name" => fields.name = Some(value),
            "latitude" => fields.latitude = Some(value),
            "longitude" => fields.longitude = Some(value),
            "about" => fields.about = Some(value),
            "instructions" => fields.instructions = Some(value),
            "opening_hours" => fields.opening_hours = Some(value),
            "open_on_weekends" => fields.open_on_weekends = Some(value),
            "approved" => fields.approved = Some(value),
            other => {
                return Err(AppError::Validation(format!("unexpected field '{other}'")));
            }
        }
    }

    Ok((fields, uploads))
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{name} is required"))),
    }
}

fn parse_decimal(value: &str, name: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| AppError::Validation(format!("{name} must be a decimal number")))
}

/// Boolean form fields arrive as text; absent means false.
fn parse_flag(value: Option<&str>, name: &str) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(_) => Err(AppError::Validation(format!("{name} must be a boolean"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> OrphanageFields {
        OrphanageFields {
            name: Some("Lar das Meninas".to_owned()),
            latitude: Some("-23.5505199".to_owned()),
            longitude: Some("-46.5395699".to_owned()),
            about: Some("A caring home".to_owned()),
            instructions: Some("Ring the bell".to_owned()),
            opening_hours: Some("9am to 6pm".to_owned()),
            open_on_weekends: Some("true".to_owned()),
            approved: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_fields() {
        let data = valid_fields().validate().expect("valid payload");
        assert_eq!(data.name, "Lar das Meninas");
        assert!(data.open_on_weekends);
        assert!(!data.approved);
    }

    #[test]
    fn test_validate_rejects_missing_name() {
        let fields = OrphanageFields {
            name: None,
            ..valid_fields()
        };
        assert!(matches!(
            fields.validate(),
            Err(AppError::Validation(msg)) if msg.contains("name")
        ));
    }

    #[test]
    fn test_validate_rejects_non_numeric_latitude() {
        let fields = OrphanageFields {
            latitude: Some("north-ish".to_owned()),
            ..valid_fields()
        };
        assert!(matches!(
            fields.validate(),
            Err(AppError::Validation(msg)) if msg.contains("latitude")
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_longitude() {
        let fields = OrphanageFields {
            longitude: Some("501.5".to_owned()),
            ..valid_fields()
        };
        assert!(matches!(fields.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag(Some("true"), "f").expect("parse"));
        assert!(parse_flag(Some("1"), "f").expect("parse"));
        assert!(!parse_flag(Some("false"), "f").expect("parse"));
        assert!(!parse_flag(Some("0"), "f").expect("parse"));
        assert!(!parse_flag(None, "f").expect("parse"));
        assert!(parse_flag(Some("yes"), "f").is_err());
    }
}

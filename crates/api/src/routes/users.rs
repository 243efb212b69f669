//! User routes: registration and the authenticated profile.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::db::OrphanageRepository;
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::middleware::RequireAuth;
use crate::services::AuthService;
use crate::state::AppState;
use crate::views::users::{self, UserView, UserWithOrphanagesView};

/// Registration payload. Fields are optional and validated by hand, and the
/// body arrives via [`JsonBody`], so both a missing field and an
/// undeserializable one answer 400.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration response: the created user and their first bearer token.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserView,
    pub token: String,
}

/// Register a new user.
///
/// POST /api/v1/users
///
/// Returns 200 with `{user, token}`; the password hash never appears in the
/// response.
///
/// # Errors
///
/// 400 for missing/malformed fields or an already-registered email.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let name = required_field(req.name.as_deref(), "name")?;
    let email = required_field(req.email.as_deref(), "email")?;
    let password = required_field(req.password.as_deref(), "password")?;

    let auth = AuthService::new(state.pool(), state.tokens());
    let (user, token) = auth.register(name, email, password).await?;

    Ok(Json(RegisterResponse {
        user: users::render(&user),
        token,
    }))
}

/// Fetch the authenticated user together with the orphanage listing.
///
/// GET /api/v1/users
///
/// # Errors
///
/// 401 without a valid bearer token.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserWithOrphanagesView>> {
    // Users hold no back-reference to orphanages; the listing is computed.
    let orphanages = OrphanageRepository::new(state.pool()).find_all().await?;

    Ok(Json(users::render_with_orphanages(&user, &orphanages)))
}

fn required_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{name} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_field_present() {
        assert_eq!(required_field(Some("Ana"), "name").expect("present"), "Ana");
    }

    #[test]
    fn test_required_field_missing() {
        assert!(required_field(None, "email").is_err());
    }

    #[test]
    fn test_required_field_blank() {
        assert!(required_field(Some("   "), "password").is_err());
    }
}

//! Admin routes — role management and photo moderation.
//!
//! GET  /api/v1/admin/users-with-roles          — List accounts with their roles
//! POST /api/v1/admin/users/{username}/roles    — Replace an account's role set
//! GET  /api/v1/admin/photos-for-moderation     — List photos awaiting review
//! POST /api/v1/admin/photos/{photo_id}/approve — Approve a photo
//! POST /api/v1/admin/photos/{photo_id}/reject  — Reject a photo (deletes it)

use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use ember_common::{
    capability::Capability,
    error::AdminResult,
    models::{AccountWithRoles, PhotoRecord},
    validation::{validate_request, validate_username},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{auth_middleware, capability_middleware};
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    let role_routes = Router::new()
        .route("/admin/users-with-roles", get(users_with_roles))
        .route("/admin/users/{username}/roles", post(edit_roles))
        .route_layer(middleware::from_fn(|req, next| {
            capability_middleware(Capability::ManageRoles, req, next)
        }));

    let photo_routes = Router::new()
        .route("/admin/photos-for-moderation", get(photos_for_moderation))
        .route("/admin/photos/{photo_id}/approve", post(approve_photo))
        .route("/admin/photos/{photo_id}/reject", post(reject_photo))
        .route_layer(middleware::from_fn(|req, next| {
            capability_middleware(Capability::ModeratePhotos, req, next)
        }));

    role_routes
        .merge(photo_routes)
        .route_layer(middleware::from_fn(auth_middleware))
}

// ============================================================
// Request/response types
// ============================================================

#[derive(Debug, Deserialize, Validate)]
pub struct EditRolesRequest {
    /// Desired role set. `null` or absent revokes every role.
    #[validate(custom(function = "validate_role_names"))]
    pub role_names: Option<Vec<String>>,
}

fn validate_role_names(names: &Vec<String>) -> Result<(), validator::ValidationError> {
    if names.iter().all(|n| !n.trim().is_empty() && n.len() <= 64) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_role_name")
            .with_message("Role names must be 1-64 characters".into()))
    }
}

#[derive(Serialize)]
struct RolesResponse {
    roles: Vec<String>,
}

// ============================================================
// Role management
// ============================================================

/// GET /admin/users-with-roles — accounts joined with their role names,
/// ordered by username.
async fn users_with_roles(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<AccountWithRoles>>> {
    let listing = state.queries.list_accounts_with_roles().await?;
    Ok(Json(listing))
}

/// POST /admin/users/:username/roles — replace the account's role set.
///
/// Responds with the role set re-read after the edit (ground truth, not the
/// request echoed back).
async fn edit_roles(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(body): Json<EditRolesRequest>,
) -> AdminResult<Json<RolesResponse>> {
    validate_username(&username)?;
    validate_request(&body)?;

    let desired = body.role_names.map(|names| names.into_iter().collect());
    let roles = state.roles.edit_roles(&username, desired).await?;

    Ok(Json(RolesResponse {
        roles: roles.into_iter().collect(),
    }))
}

// ============================================================
// Photo moderation
// ============================================================

/// GET /admin/photos-for-moderation — photos awaiting review.
async fn photos_for_moderation(
    State(state): State<Arc<AppState>>,
) -> AdminResult<Json<Vec<PhotoRecord>>> {
    let pending = state.moderation.list_pending().await?;
    Ok(Json(pending))
}

/// POST /admin/photos/:photo_id/approve
async fn approve_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<Uuid>,
) -> AdminResult<()> {
    state.moderation.approve(photo_id).await
}

/// POST /admin/photos/:photo_id/reject — deletes the photo from object
/// storage and the record store; fails without touching the record if the
/// asset delete does not succeed.
async fn reject_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<Uuid>,
) -> AdminResult<()> {
    state.moderation.reject(photo_id).await
}

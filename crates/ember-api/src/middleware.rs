//! Middleware — authentication extraction and the capability gate.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use ember_common::capability::Capability;
use ember_common::error::AdminError;

use crate::auth;

/// Authentication context extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

/// Extract and validate the JWT from the Authorization: Bearer <token> header.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, AdminError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AdminError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AdminError::Unauthorized)?;

    let config = ember_common::config::get();
    let claims = auth::validate_token(token, &config.auth.jwt_secret)
        .map_err(|_| AdminError::InvalidToken)?;

    // Ensure it's an access token, not a refresh token
    if claims.token_type != "access" {
        return Err(AdminError::InvalidToken);
    }

    let user_id = claims
        .sub
        .parse::<uuid::Uuid>()
        .map_err(|_| AdminError::InvalidToken)?;

    let auth_ctx = AuthContext {
        user_id,
        username: claims.username,
        roles: claims.roles,
    };

    // Insert auth context into request extensions for handlers to use
    request.extensions_mut().insert(auth_ctx);

    Ok(next.run(request).await)
}

/// Capability gate — runs after [`auth_middleware`] and checks that the
/// caller's roles grant the capability the route requires. The services
/// behind the gate perform no authorization logic of their own.
pub async fn capability_middleware(
    capability: Capability,
    request: Request,
    next: Next,
) -> Result<Response, AdminError> {
    let auth = request
        .extensions()
        .get::<AuthContext>()
        .ok_or(AdminError::Unauthorized)?;

    if !capability.granted_by(&auth.roles) {
        tracing::warn!(
            username = %auth.username,
            %capability,
            "capability check failed"
        );
        return Err(AdminError::MissingCapability {
            capability: capability.to_string(),
        });
    }

    Ok(next.run(request).await)
}

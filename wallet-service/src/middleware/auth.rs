//! Authenticated caller context.
//!
//! The wallet service never authenticates anyone itself. The BFF
//! verifies the session and forwards the caller's identity as
//! `X-User-ID` and `X-User-Role` headers; this module only parses
//! them.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use service_core::error::AppError;
use uuid::Uuid;

use crate::models::UserRole;

/// Identity of the authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::AuthError(anyhow::anyhow!("Missing X-User-ID header (required from BFF)"))
            })?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| AppError::AuthError(anyhow::anyhow!("Invalid X-User-ID header")))?;

        let role = parts
            .headers
            .get("X-User-Role")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::AuthError(anyhow::anyhow!(
                    "Missing X-User-Role header (required from BFF)"
                ))
            })?;
        let role = UserRole::parse(role)
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Unknown X-User-Role header")))?;

        // Add to tracing span for observability
        let span = tracing::Span::current();
        span.record("user_id", user_id.to_string().as_str());
        span.record("role", role.as_str());

        Ok(AuthContext { user_id, role })
    }
}

/// Coarse role filter applied in front of all wallet routes.
///
/// Admits the superset of roles with any route-level wallet access;
/// handlers still consult the service-level [`crate::models::AccessPolicy`],
/// which is stricter and final.
pub async fn require_wallet_role(req: Request, next: Next) -> Result<Response, AppError> {
    let role = req
        .headers()
        .get("X-User-Role")
        .and_then(|v| v.to_str().ok())
        .and_then(UserRole::parse)
        .ok_or_else(|| {
            AppError::AuthError(anyhow::anyhow!(
                "Missing or invalid X-User-Role header (required from BFF)"
            ))
        })?;

    if !matches!(
        role,
        UserRole::Researcher | UserRole::Innovator | UserRole::Entrepreneur
    ) {
        return Err(AppError::Forbidden(anyhow::anyhow!(
            "Wallet features not available for this user type"
        )));
    }

    Ok(next.run(req).await)
}

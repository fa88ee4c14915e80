use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tessera_core::constants::SESSION_COOKIE;
use tessera_core::AppError;

use super::jwt::JwtKeys;
use super::models::AuthContext;
use crate::error::HttpAppError;

/// Read the session token from the bearer header, falling back to the session cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Attach an [`AuthContext`] to the request when it carries a valid session token.
///
/// Invalid tokens are ignored so that public pages keep working with a stale
/// cookie; protected routes reject the request later in [`require_admin`].
pub async fn session_middleware(
    State(keys): State<Arc<JwtKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(request.headers()) {
        match keys.verify(&token) {
            Ok(claims) => {
                let ctx = AuthContext::from(claims);
                tracing::debug!(user_id = ctx.user.id, role = %ctx.user.role, "Session authenticated");
                request.extensions_mut().insert(ctx);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}

/// Reject anonymous callers with 401 and non-administrators with 403
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthContext>() {
        None => HttpAppError(AppError::Unauthorized(
            "Authentication required".to_string(),
        ))
        .into_response(),
        Some(ctx) if !ctx.is_admin() => {
            tracing::warn!(user_id = ctx.user.id, "Non-administrator denied admin route");
            HttpAppError(AppError::Forbidden(
                "Administrator access required".to_string(),
            ))
            .into_response()
        }
        Some(_) => next.run(request).await,
    }
}

use axum::{extract::Path, http::StatusCode, response::Response};
use chrono::{Duration, Utc};
use tessera_core::constants::THEME_COOKIE;
use tessera_core::models::Cookie;
use tessera_core::AppError;

use crate::context::RequestContext;
use crate::error::HttpAppError;

const THEMES: [&str; 2] = ["light", "dark"];
const THEME_COOKIE_DAYS: i64 = 365;

/// Remember the selected theme for a year
pub async fn set_theme(
    Path(theme): Path<String>,
    mut ctx: RequestContext,
) -> Result<Response, HttpAppError> {
    if !THEMES.contains(&theme.as_str()) {
        return Err(AppError::BadRequest(format!("Unknown theme: {}", theme)).into());
    }

    ctx.write_cookie(
        Cookie::new(THEME_COOKIE, theme.as_str())
            .with_expiry(Utc::now() + Duration::days(THEME_COOKIE_DAYS)),
    );

    Ok(ctx.json(StatusCode::OK, serde_json::json!({ "theme": theme })))
}

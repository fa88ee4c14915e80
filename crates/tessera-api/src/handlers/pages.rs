use axum::{http::StatusCode, response::Response};

use crate::context::RequestContext;
use crate::error::HttpAppError;
use crate::views::{ErrorPage, HomePage};

pub async fn home(ctx: RequestContext) -> Result<Response, HttpAppError> {
    let username = ctx.current_user().ok().map(|u| u.username.as_str());
    ctx.render_component(
        &HomePage {
            site_name: &ctx.site().site_name,
            username,
        },
        StatusCode::OK,
    )
}

/// Fallback for unknown routes. The error page is a complete document.
pub async fn not_found(ctx: RequestContext) -> Result<Response, HttpAppError> {
    ctx.render_raw(
        &ErrorPage {
            site_name: &ctx.site().site_name,
            status: StatusCode::NOT_FOUND.as_u16(),
            title: "Not Found",
            message: "The page you are looking for does not exist.",
        },
        StatusCode::NOT_FOUND,
    )
}

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tessera_core::models::PageInfo;

use crate::context::RequestContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::views::FilesPage;

/// Paginated list of uploaded files, newest first.
///
/// Pagination links are htmx requests, which get only the table back.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Response, HttpAppError> {
    let user = ctx.current_user()?;
    let query = ctx.page_query();

    let files = state.files.list(query).await?;
    let total = state.files.count().await?;
    tracing::debug!(
        user_id = user.id,
        page = query.page,
        page_size = query.page_size,
        total,
        "Listing uploaded files"
    );

    ctx.render_component(
        &FilesPage {
            files: &files,
            pager: PageInfo::new(query, total),
        },
        StatusCode::OK,
    )
}

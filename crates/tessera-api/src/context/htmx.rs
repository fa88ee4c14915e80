use axum::http::HeaderMap;
use tessera_core::constants::{HX_FULL_PAGE_HEADER, HX_REQUEST_HEADER};

fn header_is_true(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "true")
        .unwrap_or(false)
}

/// Whether the request only wants an HTML fragment.
///
/// htmx marks its requests with `Hx-Request: true`; a `hx-fullPage: true`
/// header asks for the full document anyway.
pub fn is_fragment_request(headers: &HeaderMap) -> bool {
    header_is_true(headers, HX_REQUEST_HEADER) && !header_is_true(headers, HX_FULL_PAGE_HEADER)
}

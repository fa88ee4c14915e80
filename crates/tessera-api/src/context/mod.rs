//! Per-request rendering context.
//!
//! [`RequestContext`] is extracted from request parts, so it can be combined
//! with body extractors such as `Multipart`. It bundles what page handlers
//! need besides their own inputs: the authenticated user, htmx fragment
//! detection, layout selection, cookies, and pagination parameters.
//!
//! Responses built through the context carry every cookie written with
//! [`RequestContext::write_cookie`].

mod cookies;
mod htmx;

pub use htmx::is_fragment_request;

use std::convert::Infallible;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tessera_core::constants::THEME_COOKIE;
use tessera_core::models::{Cookie, PageQuery, SiteInterface, User};
use tessera_core::AppError;

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::views::{self, AdminLayout, PageLayout};

const DEFAULT_THEME: &str = "light";

/// Raw pagination parameters, parsed leniently by [`PageQuery::parse`]
#[derive(Debug, Default, Deserialize)]
struct PageParams {
    page: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
}

pub struct RequestContext {
    headers: HeaderMap,
    page_params: PageParams,
    jar: CookieJar,
    auth: Option<AuthContext>,
    site: SiteInterface,
    page_max_size: i64,
}

impl RequestContext {
    pub fn new(
        headers: HeaderMap,
        uri: &Uri,
        auth: Option<AuthContext>,
        site: SiteInterface,
        page_max_size: i64,
    ) -> Self {
        // A malformed query string is treated like an absent one.
        let page_params = Query::<PageParams>::try_from_uri(uri)
            .map(|Query(params)| params)
            .unwrap_or_default();
        let jar = CookieJar::from_headers(&headers);

        Self {
            headers,
            page_params,
            jar,
            auth,
            site,
            page_max_size,
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.auth.as_ref().map(AuthContext::is_admin).unwrap_or(false)
    }

    /// The authenticated user. Only routes behind the session middleware and
    /// an authorization check can rely on this succeeding.
    pub fn current_user(&self) -> Result<&User, AppError> {
        self.auth
            .as_ref()
            .map(|ctx| &ctx.user)
            .ok_or_else(|| AppError::Unauthorized("No authenticated user".to_string()))
    }

    pub fn is_fragment_request(&self) -> bool {
        is_fragment_request(&self.headers)
    }

    pub fn site(&self) -> &SiteInterface {
        &self.site
    }

    /// Render `component` as a fragment for htmx requests, otherwise inside
    /// the admin or the page layout.
    pub fn render_component<T: Template>(
        &self,
        component: &T,
        status: StatusCode,
    ) -> Result<Response, HttpAppError> {
        let body = views::render(component)?;
        if self.is_fragment_request() {
            return Ok(self.html(status, body));
        }

        let theme = self.theme();
        let page = match self.auth.as_ref().filter(|ctx| ctx.is_admin()) {
            Some(ctx) => views::render(&AdminLayout {
                site_name: &self.site.site_name,
                username: &ctx.user.username,
                theme: &theme,
                body: &body,
            })?,
            None => views::render(&PageLayout {
                site_name: &self.site.site_name,
                theme: &theme,
                body: &body,
            })?,
        };

        Ok(self.html(status, page))
    }

    /// Render `component` as is, without any layout.
    pub fn render_raw<T: Template>(
        &self,
        component: &T,
        status: StatusCode,
    ) -> Result<Response, HttpAppError> {
        let body = views::render(component)?;
        Ok(self.html(status, body))
    }

    /// JSON response carrying the cookies written so far
    pub fn json<T: Serialize>(&self, status: StatusCode, body: T) -> Response {
        (status, self.jar.clone(), Json(body)).into_response()
    }

    /// Read a request cookie. A missing cookie yields [`Cookie::empty`].
    pub fn read_cookie(&self, key: &str) -> Cookie {
        self.jar
            .get(key)
            .map(cookies::from_protocol)
            .unwrap_or_else(Cookie::empty)
    }

    /// Queue a cookie for the response. Later reads of the same key see the new value.
    pub fn write_cookie(&mut self, cookie: Cookie) {
        self.jar = self.jar.clone().add(cookies::to_protocol(cookie));
    }

    pub fn page(&self) -> i64 {
        self.page_query().page
    }

    pub fn page_size(&self) -> i64 {
        self.page_query().page_size
    }

    pub fn page_query(&self) -> PageQuery {
        PageQuery::parse(
            self.page_params.page.as_deref(),
            self.page_params.page_size.as_deref(),
            self.page_max_size,
        )
    }

    fn theme(&self) -> String {
        let cookie = self.read_cookie(THEME_COOKIE);
        if cookie.value.is_empty() {
            DEFAULT_THEME.to_string()
        } else {
            cookie.value
        }
    }

    fn html(&self, status: StatusCode, body: String) -> Response {
        (status, self.jar.clone(), Html(body)).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::new(
            parts.headers.clone(),
            &parts.uri,
            parts.extensions.get::<AuthContext>().cloned(),
            state.site.clone(),
            state.config.page_max_size,
        ))
    }
}

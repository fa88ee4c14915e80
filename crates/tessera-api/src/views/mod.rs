//! HTML components and layouts (askama templates under `templates/`)

use askama::Template;
use tessera_core::models::{PageInfo, UploadedFile};
use tessera_core::AppError;

/// Page chrome for administrators
#[derive(Template)]
#[template(path = "layouts/admin.html")]
pub struct AdminLayout<'a> {
    pub site_name: &'a str,
    pub username: &'a str,
    pub theme: &'a str,
    pub body: &'a str,
}

/// Page chrome for everyone else
#[derive(Template)]
#[template(path = "layouts/page.html")]
pub struct PageLayout<'a> {
    pub site_name: &'a str,
    pub theme: &'a str,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage<'a> {
    pub site_name: &'a str,
    pub username: Option<&'a str>,
}

/// Complete error document; never wrapped in a layout.
#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorPage<'a> {
    pub site_name: &'a str,
    pub status: u16,
    pub title: &'a str,
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "admin/files.html")]
pub struct FilesPage<'a> {
    pub files: &'a [UploadedFile],
    pub pager: PageInfo,
}

/// Render a component to a string
pub fn render<T: Template>(component: &T) -> Result<String, AppError> {
    component
        .render()
        .map_err(|e| AppError::Render(e.to_string()))
}

//! Application-wide constants.

/// Request header set by htmx on every request it issues.
pub const HX_REQUEST_HEADER: &str = "Hx-Request";

/// Request header that forces a full-page render even for htmx requests.
pub const HX_FULL_PAGE_HEADER: &str = "hx-fullPage";

/// Page size value that means "as many as allowed".
pub const PAGE_SIZE_ALL: i64 = -1;

/// Multipart field the upload endpoint reads the file from.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Cookie holding the selected theme.
pub const THEME_COOKIE: &str = "theme";

/// Sentinel id returned in upload responses that did not create a record.
pub const NO_RECORD_ID: i64 = -1;

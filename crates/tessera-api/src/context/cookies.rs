//! Conversion between [`Cookie`] and the protocol cookie used by the jar.

use axum_extra::extract::cookie::{Cookie as ProtocolCookie, SameSite};
use chrono::{DateTime, Utc};
use tessera_core::models::Cookie;
use time::OffsetDateTime;

pub fn from_protocol(cookie: &ProtocolCookie<'_>) -> Cookie {
    Cookie {
        key: cookie.name().to_string(),
        value: cookie.value().to_string(),
        expires: cookie
            .expires_datetime()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.unix_timestamp(), 0)),
    }
}

/// Cookies are written site-wide and kept away from scripts.
pub fn to_protocol(cookie: Cookie) -> ProtocolCookie<'static> {
    let mut builder = ProtocolCookie::build((cookie.key, cookie.value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    if let Some(expires) = cookie.expires {
        match OffsetDateTime::from_unix_timestamp(expires.timestamp()) {
            Ok(at) => builder = builder.expires(at),
            Err(e) => tracing::warn!(error = %e, "Cookie expiry out of range, writing session cookie"),
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_survives_conversion() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let protocol = to_protocol(Cookie::new("theme", "dark").with_expiry(expires));
        assert_eq!(protocol.path(), Some("/"));

        let back = from_protocol(&protocol);
        assert_eq!(back, Cookie::new("theme", "dark").with_expiry(expires));
    }

    #[test]
    fn test_session_cookie_has_no_expiry() {
        let protocol = to_protocol(Cookie::new("theme", "light"));
        assert!(protocol.expires().is_none());
        assert_eq!(from_protocol(&protocol).expires, None);
    }
}

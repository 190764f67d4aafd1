//! Refresh token cookie construction.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use library_core::config::AuthConfig;

/// Builds the refresh cookie carrying `value` for `max_age_seconds`.
pub fn refresh_cookie(config: &AuthConfig, value: String, max_age_seconds: i64) -> Cookie<'static> {
    let mut builder = Cookie::build((config.refresh_token_cookie.clone(), value))
        .http_only(true)
        .same_site(SameSite::None)
        .secure(config.secure_cookies)
        .path("/")
        .max_age(Duration::seconds(max_age_seconds));

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

/// Builds a cookie that makes the client drop its refresh token.
pub fn expired_refresh_cookie(config: &AuthConfig) -> Cookie<'static> {
    refresh_cookie(config, String::new(), 0)
}

/// Reads the refresh token value from the request cookies.
pub fn read_refresh_token(jar: &CookieJar, config: &AuthConfig) -> Option<String> {
    jar.get(&config.refresh_token_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

//! Backend URL composition.
//!
//! Every backend call addresses `{endpoint}/{path}`, with the auth token
//! (when configured) appended as a `token` query parameter. The backend
//! reads the token from the query string, not from a header.

/// Joins a base URL and a relative path, optionally appending a token.
///
/// One trailing slash on `base_url` and one leading slash on
/// `relative_path` are dropped so the two sides always meet at a single
/// `/`. A present, non-empty `token` is appended verbatim as
/// `?token=<token>`; callers own any URL-encoding needs of the token value.
#[must_use]
pub fn generate_url(base_url: &str, relative_path: &str, token: Option<&str>) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = relative_path.strip_prefix('/').unwrap_or(relative_path);

    let mut url = format!("{base}/{path}");
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        url.push_str("?token=");
        url.push_str(token);
    }
    url
}

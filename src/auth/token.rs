//! Token extraction from the `Authorization` header.

use super::AuthScheme;

/// Returns the token carried by an `Authorization` header value.
///
/// The value must read `<scheme> <token>`. The scheme is matched ASCII
/// case-insensitively and any number of spaces may follow it. A value in any
/// other shape, including a bare token with no scheme, yields `None`.
///
/// # Examples
///
/// ```rust
/// use static_auth::auth::{AuthScheme, token::extract_token};
///
/// assert_eq!(extract_token(Some("Bearer abc"), AuthScheme::Bearer), Some("abc"));
/// assert_eq!(extract_token(Some("abc"), AuthScheme::Bearer), None);
/// assert_eq!(extract_token(None, AuthScheme::Static), None);
/// ```
pub fn extract_token(header: Option<&str>, scheme: AuthScheme) -> Option<&str> {
    let (presented, token) = header?.split_once(' ')?;
    if !presented.eq_ignore_ascii_case(scheme.as_str()) {
        return None;
    }
    let token = token.trim_start_matches(' ');
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix() {
        assert_eq!(
            extract_token(Some("Bearer secret123"), AuthScheme::Bearer),
            Some("secret123")
        );
    }

    #[test]
    fn static_prefix() {
        assert_eq!(
            extract_token(Some("Static secret123"), AuthScheme::Static),
            Some("secret123")
        );
        assert_eq!(extract_token(Some("Bearer secret123"), AuthScheme::Static), None);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(extract_token(Some("bearer abc"), AuthScheme::Bearer), Some("abc"));
        assert_eq!(extract_token(Some("BEARER abc"), AuthScheme::Bearer), Some("abc"));
    }

    #[test]
    fn raw_token_without_prefix_is_rejected() {
        assert_eq!(extract_token(Some("secret123"), AuthScheme::Bearer), None);
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(extract_token(Some("Bearer "), AuthScheme::Bearer), None);
        assert_eq!(extract_token(Some("Bearer    "), AuthScheme::Bearer), None);
        assert_eq!(extract_token(Some(""), AuthScheme::Bearer), None);
    }

    #[test]
    fn extra_spaces_after_scheme() {
        assert_eq!(extract_token(Some("Bearer   abc"), AuthScheme::Bearer), Some("abc"));
    }

    #[test]
    fn token_is_kept_verbatim() {
        assert_eq!(
            extract_token(Some("Bearer a b=c "), AuthScheme::Bearer),
            Some("a b=c ")
        );
    }

    #[test]
    fn other_scheme_is_rejected() {
        assert_eq!(extract_token(Some("Basic dXNlcjpwYXNz"), AuthScheme::Bearer), None);
        assert_eq!(extract_token(Some("Bearersecret"), AuthScheme::Bearer), None);
    }
}

use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::config::{ResolvedConfig, StaticAuthConfig, source::PropertySource};
use crate::prelude::*;

use super::{AuthScheme, challenge::Challenge, token::extract_token};

/// Marker left on a request accepted by a static token provider.
///
/// Carries no identity beyond the name of the provider that matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticPrincipal {
    pub provider: String,
}

/// Why a request was not authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header in the provider's scheme.
    NoCredentials,
    /// A token was presented and did not match.
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(StaticPrincipal),
    Unauthenticated(AuthFailure),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }
}

/// Compares the token presented by a request against a single shared secret.
#[derive(Debug, Clone)]
pub struct StaticTokenAuthenticator {
    config: ResolvedConfig,
}

impl StaticTokenAuthenticator {
    /// Builds an authenticator from resolved settings.
    ///
    /// An empty token is rejected so a provider can never accept everything.
    pub fn new(config: ResolvedConfig) -> Result<Self> {
        if config.token.is_empty() {
            return Err(Error::TokenNotConfigured {
                provider: config.name,
            });
        }
        Ok(Self { config })
    }

    /// Resolves `config` against `source` and builds the authenticator.
    pub fn from_config(config: &StaticAuthConfig, source: &dyn PropertySource) -> Result<Self> {
        Self::new(config.resolve(source)?)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn realm(&self) -> &str {
        &self.config.realm
    }

    pub fn scheme(&self) -> AuthScheme {
        self.config.scheme
    }

    /// Decides whether the request carrying `headers` presents the token.
    ///
    /// A non UTF-8 `Authorization` header counts as absent.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthOutcome {
        let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        self.authenticate_value(header)
    }

    /// Same as [`Self::authenticate`], for a raw `Authorization` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use static_auth::{StaticAuthConfig, StaticTokenAuthenticator};
    /// use static_auth::auth::auth::{AuthFailure, AuthOutcome};
    /// use static_auth::config::source::MapSource;
    ///
    /// # fn example() -> static_auth::prelude::Result<()> {
    /// let config = StaticAuthConfig {
    ///     token: Some(String::from("secret123")),
    ///     ..StaticAuthConfig::default()
    /// };
    /// let authenticator = StaticTokenAuthenticator::from_config(&config, &MapSource::default())?;
    ///
    /// assert!(authenticator.authenticate_value(Some("Bearer secret123")).is_authenticated());
    /// assert_eq!(
    ///     authenticator.authenticate_value(Some("Bearer wrong")),
    ///     AuthOutcome::Unauthenticated(AuthFailure::InvalidCredentials)
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn authenticate_value(&self, header: Option<&str>) -> AuthOutcome {
        let Some(token) = extract_token(header, self.config.scheme) else {
            return AuthOutcome::Unauthenticated(AuthFailure::NoCredentials);
        };

        if tokens_match(token.as_bytes(), self.config.token.as_bytes()) {
            AuthOutcome::Authenticated(StaticPrincipal {
                provider: self.config.name.clone(),
            })
        } else {
            AuthOutcome::Unauthenticated(AuthFailure::InvalidCredentials)
        }
    }

    /// The `401` challenge this provider answers failed requests with.
    pub fn challenge(&self) -> Challenge {
        Challenge::new(self.config.scheme, self.config.realm.clone())
    }
}

fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.len() == expected.len() && presented.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::config::source::MapSource;

    fn authenticator(scheme: AuthScheme) -> StaticTokenAuthenticator {
        let config = StaticAuthConfig {
            token: Some(String::from("secret123")),
            realm: Some(String::from("API")),
            scheme,
            ..StaticAuthConfig::default()
        };
        StaticTokenAuthenticator::from_config(&config, &MapSource::default()).unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn matching_token_is_authenticated() {
        let auth = authenticator(AuthScheme::Bearer);
        assert_eq!(
            auth.authenticate(&headers("Bearer secret123")),
            AuthOutcome::Authenticated(StaticPrincipal {
                provider: String::from("static")
            })
        );
    }

    #[test]
    fn wrong_token_is_invalid() {
        let auth = authenticator(AuthScheme::Bearer);
        assert_eq!(
            auth.authenticate(&headers("Bearer wrong")),
            AuthOutcome::Unauthenticated(AuthFailure::InvalidCredentials)
        );
        assert_eq!(
            auth.authenticate(&headers("Bearer secret1234")),
            AuthOutcome::Unauthenticated(AuthFailure::InvalidCredentials)
        );
    }

    #[test]
    fn missing_header_has_no_credentials() {
        let auth = authenticator(AuthScheme::Bearer);
        assert_eq!(
            auth.authenticate(&HeaderMap::new()),
            AuthOutcome::Unauthenticated(AuthFailure::NoCredentials)
        );
    }

    #[test]
    fn raw_token_is_not_accepted() {
        let auth = authenticator(AuthScheme::Bearer);
        assert_eq!(
            auth.authenticate(&headers("secret123")),
            AuthOutcome::Unauthenticated(AuthFailure::NoCredentials)
        );
    }

    #[test]
    fn non_utf8_header_counts_as_absent() {
        let auth = authenticator(AuthScheme::Bearer);
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(
            auth.authenticate(&map),
            AuthOutcome::Unauthenticated(AuthFailure::NoCredentials)
        );
    }

    #[test]
    fn static_scheme() {
        let auth = authenticator(AuthScheme::Static);
        assert!(auth.authenticate(&headers("Static secret123")).is_authenticated());
        assert!(!auth.authenticate(&headers("Bearer secret123")).is_authenticated());
        assert_eq!(auth.challenge().www_authenticate(), r#"Static realm="API""#);
    }

    #[test]
    fn repeated_calls_agree() {
        let auth = authenticator(AuthScheme::Bearer);
        let request = headers("Bearer secret123");
        let first = auth.authenticate(&request);
        for _ in 0..10 {
            assert_eq!(auth.authenticate(&request), first);
        }
    }

    #[test]
    fn empty_resolved_token_is_rejected() {
        let config = ResolvedConfig {
            name: String::from("broken"),
            token: String::new(),
            realm: String::from("API"),
            scheme: AuthScheme::Bearer,
        };
        assert!(matches!(
            StaticTokenAuthenticator::new(config),
            Err(Error::TokenNotConfigured { .. })
        ));
    }

    #[test]
    fn constant_time_compare() {
        assert!(tokens_match(b"hello", b"hello"));
        assert!(!tokens_match(b"hello", b"world"));
        assert!(!tokens_match(b"short", b"longer"));
    }
}

//! Provider configuration and its one-shot resolution.
//!
//! Settings are taken from [`StaticAuthConfig`] when set explicitly and
//! otherwise looked up in a [`PropertySource`]. Resolution happens once, when
//! the provider is registered, and yields an immutable [`ResolvedConfig`].

use std::fmt;

use crate::{auth::AuthScheme, prelude::*};

use source::PropertySource;

pub mod source;

pub const STATIC_AUTH_TOKEN_PROPERTY: &str = "static-auth.token";
pub const STATIC_AUTH_REALM_PROPERTY: &str = "static-auth.realm";
pub const DEFAULT_STATIC_AUTH_REALM: &str = "Server";
pub const DEFAULT_PROVIDER_NAME: &str = "static";

/// Settable provider configuration, filled in by the registration closure.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StaticAuthConfig {
    /// Registry name; [`DEFAULT_PROVIDER_NAME`] when unset.
    pub name: Option<String>,
    /// Expected token. Falls back to `static-auth.token`.
    pub token: Option<String>,
    /// Challenge realm. Falls back to `static-auth.realm`, then to
    /// [`DEFAULT_STATIC_AUTH_REALM`].
    pub realm: Option<String>,
    pub scheme: AuthScheme,
}

/// Fully resolved, immutable provider settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub name: String,
    pub token: String,
    pub realm: String,
    pub scheme: AuthScheme,
}

impl StaticAuthConfig {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
            ..Self::default()
        }
    }

    pub fn provider_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PROVIDER_NAME)
    }

    /// Resolve every setting against `source`.
    ///
    /// Fails with [`Error::TokenNotConfigured`] when neither an explicit nor an
    /// external non-empty token exists.
    pub fn resolve(&self, source: &dyn PropertySource) -> Result<ResolvedConfig> {
        let name = self.provider_name().to_string();

        let token = non_empty(self.token.clone())
            .or_else(|| non_empty(source.property(STATIC_AUTH_TOKEN_PROPERTY)))
            .ok_or_else(|| Error::TokenNotConfigured {
                provider: name.clone(),
            })?;

        let realm = non_empty(self.realm.clone())
            .or_else(|| non_empty(source.property(STATIC_AUTH_REALM_PROPERTY)))
            .unwrap_or_else(|| String::from(DEFAULT_STATIC_AUTH_REALM));

        Ok(ResolvedConfig {
            name,
            token,
            realm,
            scheme: self.scheme,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl fmt::Debug for StaticAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticAuthConfig")
            .field("name", &self.name)
            .field("token", &self.token.as_ref().map(|_| "REDACTED"))
            .field("realm", &self.realm)
            .field("scheme", &self.scheme)
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("name", &self.name)
            .field("token", &"REDACTED")
            .field("realm", &self.realm)
            .field("scheme", &self.scheme)
            .finish()
    }
}

/// Direct access to the `static-auth.*` properties of any source.
pub trait StaticAuthProperties {
    /// The configured `static-auth.token`.
    fn static_auth_token(&self) -> Result<String>;
    /// The configured `static-auth.realm`, if any.
    fn static_auth_realm(&self) -> Option<String>;
}

impl<S: PropertySource + ?Sized> StaticAuthProperties for S {
    fn static_auth_token(&self) -> Result<String> {
        non_empty(self.property(STATIC_AUTH_TOKEN_PROPERTY)).ok_or_else(|| {
            Error::TokenNotConfigured {
                provider: String::from(DEFAULT_PROVIDER_NAME),
            }
        })
    }

    fn static_auth_realm(&self) -> Option<String> {
        non_empty(self.property(STATIC_AUTH_REALM_PROPERTY))
    }
}

//! Static token authentication: extraction, decision and challenge.

use std::fmt;

pub mod auth;
pub mod challenge;
pub mod token;

pub const BEARER_SCHEME: &str = "Bearer";
pub const STATIC_SCHEME: &str = "Static";

/// `Authorization` scheme a provider expects and advertises in its challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `Authorization: Static <token>`
    Static,
}

impl AuthScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScheme::Bearer => BEARER_SCHEME,
            AuthScheme::Static => STATIC_SCHEME,
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

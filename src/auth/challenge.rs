//! The `401 Unauthorized` answer of a provider.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use super::AuthScheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub scheme: AuthScheme,
    pub realm: String,
}

impl Challenge {
    pub fn new(scheme: AuthScheme, realm: impl Into<String>) -> Self {
        Self {
            scheme,
            realm: realm.into(),
        }
    }

    /// Value of the `WWW-Authenticate` header, e.g. `Bearer realm="API"`.
    pub fn www_authenticate(&self) -> String {
        format!("{} realm={}", self.scheme, quote(&self.realm))
    }
}

/// Renders `value` as a quoted-string, escaping `"` and `\` and dropping
/// control characters, which header values cannot carry.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars().filter(|c| !c.is_control()) {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl IntoResponse for Challenge {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = Json(json!({
            "error": {
                "message": "Authentication required",
                "status": status.as_u16()
            }
        }));

        let mut response = (status, body).into_response();
        match HeaderValue::from_str(&self.www_authenticate()) {
            Ok(value) => {
                response.headers_mut().insert(WWW_AUTHENTICATE, value);
            }
            Err(err) => error!("Invalid WWW-Authenticate value for realm {:?}: {err}", self.realm),
        }
        response
    }
}

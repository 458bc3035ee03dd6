use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

use crate::prelude::*;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        error!("Creating API error response for error: {:?}", self);
        let (status, message) = match self {
            Error::PrincipalMissing => (StatusCode::UNAUTHORIZED, "Authentication required"),

            // Setup errors - hide details
            Error::IO(_)
            | Error::Toml(_)
            | Error::TokenNotConfigured { .. }
            | Error::DuplicateProvider(_)
            | Error::UnknownProvider(_)
            | Error::EmptyProviderChain => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}

//! Principal extraction for handlers behind the static token middleware.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};

use crate::{auth::auth::StaticPrincipal, prelude::*};

impl<S: Send + Sync> FromRequestParts<S> for StaticPrincipal {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<StaticPrincipal>()
            .cloned()
            .ok_or(Error::PrincipalMissing)
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for StaticPrincipal {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<StaticPrincipal>().cloned())
    }
}

//! axum integration: provider registry, middleware and extractors.

pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod registry;

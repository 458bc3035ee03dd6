//! Static shared-secret token authentication for axum.
//!
//! A provider is registered once against an [`Authentication`] registry,
//! resolving its token and realm from explicit settings or a
//! [`PropertySource`]. Routes are then protected with the
//! [`mw_require_static_auth`] middleware, which rejects requests whose
//! `Authorization` header does not carry the configured token with a
//! `401` challenge.
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use static_auth::{Authentication, config::source::MapSource, require_static_auth};
//!
//! # fn example() -> static_auth::prelude::Result<()> {
//! let mut auth = Authentication::new(MapSource::default());
//! auth.register_static(None, |config| {
//!     config.token = Some(String::from("secret123"));
//!     config.realm = Some(String::from("API"));
//! })?;
//!
//! let app: Router<()> = Router::new()
//!     .route("/protected", get(|| async { "ok" }))
//!     .route_layer(require_static_auth!(auth, "static")?);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod web;

#[doc(hidden)]
pub use axum;

pub use auth::{AuthScheme, auth::StaticTokenAuthenticator};
pub use config::{StaticAuthConfig, source::PropertySource};
pub use web::{mw_auth::mw_require_static_auth, registry::Authentication};

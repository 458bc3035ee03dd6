//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::registry::{AuthChain, Rejection};

/// Middleware that requires one of the chain's providers to accept the request.
///
/// On success the [`StaticPrincipal`](crate::auth::auth::StaticPrincipal) is
/// stored in the request extensions; otherwise the first provider's challenge
/// is sent and the inner service is never called.
///
/// # Examples
///
/// ```rust
/// use axum::{Router, routing::get};
/// use static_auth::{Authentication, mw_require_static_auth};
/// use static_auth::config::source::MapSource;
///
/// # fn example() -> static_auth::prelude::Result<()> {
/// let mut auth = Authentication::new(MapSource::default());
/// auth.register_static(None, |config| config.token = Some(String::from("secret")))?;
///
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(axum::middleware::from_fn_with_state(
///         auth.chain(["static"])?,
///         mw_require_static_auth,
///     ));
/// # Ok(())
/// # }
///
/// async fn protected_handler() -> &'static str {
///     "This requires authentication"
/// }
/// ```
pub async fn mw_require_static_auth(
    State(chain): State<AuthChain>,
    mut req: Request,
    next: Next,
) -> Result<Response, Rejection> {
    match chain.authenticate(req.headers()) {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        Err(rejection) => {
            debug!(
                cause = ?rejection.cause,
                path = %req.uri().path(),
                "Static token authentication rejected request"
            );
            Err(rejection)
        }
    }
}

/// Builds the static token middleware for the named providers of a registry.
///
/// Evaluates to `Result<layer>`; unknown provider names are reported when the
/// router is built rather than per request.
///
/// ```rust
/// use axum::{Router, routing::get};
/// use static_auth::{Authentication, require_static_auth};
/// use static_auth::config::source::MapSource;
///
/// # fn example() -> static_auth::prelude::Result<()> {
/// let mut auth = Authentication::new(MapSource::default());
/// auth.register_static(Some("admin"), |config| config.token = Some(String::from("a")))?;
/// auth.register_static(Some("ops"), |config| config.token = Some(String::from("o")))?;
///
/// let app: Router<()> = Router::new()
///     .route("/admin", get(|| async { "admin" }))
///     .route_layer(require_static_auth!(auth, "admin", "ops")?);
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! require_static_auth {
    ($auth:expr, $($name:expr),+ $(,)?) => {{
        use $crate::web::mw_auth::mw_require_static_auth;
        $auth
            .chain([$($name),+])
            .map(|chain| $crate::axum::middleware::from_fn_with_state(chain, mw_require_static_auth))
    }};
}

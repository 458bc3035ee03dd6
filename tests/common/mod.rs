#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{Router, routing::get};
use static_auth::{
    AuthScheme, Authentication, auth::auth::StaticPrincipal, config::source::MapSource,
    require_static_auth,
};

pub const TOKEN: &str = "secret123";
pub const REALM: &str = "API";

/// Registry holding the `static` provider (`secret123`, realm `API`) and a
/// `legacy` provider using the `Static` scheme.
pub fn scenario_auth() -> Authentication {
    let mut auth = Authentication::new(MapSource::default());
    auth.register_static(None, |config| {
        config.token = Some(String::from(TOKEN));
        config.realm = Some(String::from(REALM));
    })
    .expect("Failed to register static provider");
    auth.register_static(Some("legacy"), |config| {
        config.token = Some(String::from("legacy-token"));
        config.realm = Some(String::from("Legacy"));
        config.scheme = AuthScheme::Static;
    })
    .expect("Failed to register legacy provider");
    auth
}

async fn whoami(principal: StaticPrincipal) -> String {
    principal.provider
}

async fn maybe_whoami(principal: Option<StaticPrincipal>) -> String {
    principal
        .map(|p| p.provider)
        .unwrap_or_else(|| String::from("anonymous"))
}

pub fn router(auth: &Authentication) -> Router {
    let protected = Router::new()
        .route("/v1/protected", get(whoami))
        .route_layer(require_static_auth!(auth, "static").expect("Failed to build layer"));
    let either = Router::new()
        .route("/v1/either", get(whoami))
        .route_layer(require_static_auth!(auth, "static", "legacy").expect("Failed to build layer"));

    Router::new()
        .merge(protected)
        .merge(either)
        .route("/v1/public", get(maybe_whoami))
        .route("/v1/unguarded", get(whoami))
}

/// Serves `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });
    addr
}

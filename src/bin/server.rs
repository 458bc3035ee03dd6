use std::{net::SocketAddr, path::Path};

use axum::{Json, Router, routing::get};
use serde::Serialize;
use static_auth::{
    Authentication,
    auth::auth::StaticPrincipal,
    config::source::{EnvSource, LayeredSource, TomlSource},
    prelude::*,
    require_static_auth,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_FILE_VAR: &str = "STATIC_AUTH_CONFIG";
const BIND_VAR: &str = "STATIC_AUTH_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Serialize)]
struct ProtectedResponse {
    message: &'static str,
    provider: String,
}

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

fn property_source() -> Result<LayeredSource> {
    let mut source = LayeredSource::new();
    if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
        tracing::info!("Loading properties from {path}");
        source = source.with(TomlSource::from_file(Path::new(&path))?);
    }
    Ok(source.with(EnvSource::new()))
}

fn app(auth: &Authentication) -> Result<Router> {
    Ok(Router::new()
        .route(&v1("protected"), get(protected))
        .route_layer(require_static_auth!(auth, "static")?)
        .route(&v1("health"), get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        ))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,static_auth=debug,tower_http=debug", env!("CARGO_CRATE_NAME"))
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut auth = Authentication::new(property_source()?);
    // A missing token stops the server here, before anything is served.
    auth.register_static(None, |_| {})?;

    let app = app(&auth)?;

    let addr: SocketAddr = std::env::var(BIND_VAR)
        .unwrap_or_else(|_| String::from(DEFAULT_BIND))
        .parse()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::debug!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

#[axum::debug_handler]
async fn protected(principal: StaticPrincipal) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Protected resource accessed",
        provider: principal.provider,
    })
}

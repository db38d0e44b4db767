pub mod app;
pub mod config;
pub mod routes;

mod form;

#[cfg(test)]
mod test_util;

use anyhow::Context;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::Router;
use entrait::Impl;
use std::net::SocketAddr;
use tower::ServiceBuilder;

pub async fn serve(app: app::App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));
    let max_upload_bytes = app.config.max_upload_bytes;

    let router = with_layers(
        routes::api_router(&app.config.upload_dir),
        Impl::new(app),
        max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind to {addr}"))?;

    tracing::info!("profile service running on port {}", addr.port());

    axum::serve(listener, router)
        .await
        .context("error running HTTP server")
}

/// Provides `deps` to the handlers and adds tracing, CORS and the body size limit.
fn with_layers<D>(router: Router, deps: D, max_upload_bytes: usize) -> Router
where
    D: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(Extension(deps))
            // Enables logging. Use `RUST_LOG=tower_http=debug`
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::cors::CorsLayer::permissive())
            .layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

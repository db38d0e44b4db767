mod profile_routes;

use crate::app::App;
use profile_domain::profile::{FetchProfile, UpsertProfile};
use profile_domain::upload::UPLOADS_PREFIX;

use axum::routing::{get, Router};
use axum::Json;
use entrait::Impl;
use std::path::Path;
use tower_http::services::ServeDir;

#[derive(serde::Serialize, serde::Deserialize)]
struct Liveness {
    message: String,
}

/// Axum router for the real app.
pub fn api_router(upload_dir: &Path) -> Router {
    router::<Impl<App>>(upload_dir)
}

fn router<D>(upload_dir: &Path) -> Router
where
    D: FetchProfile + UpsertProfile + Sized + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(liveness))
        .nest("/api", profile_routes::ProfileRoutes::<D>::router())
        .nest_service(UPLOADS_PREFIX, ServeDir::new(upload_dir))
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        message: "Profile service is up and running!".to_string(),
    })
}

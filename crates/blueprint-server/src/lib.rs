pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    router_with_state(state::AppState::new(root))
}

pub fn router_with_state(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Catalog
        .route("/api/catalog", get(routes::catalog::get_catalog))
        // Projects
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project)
                .patch(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/api/projects/{id}/duplicate",
            post(routes::projects::duplicate_project),
        )
        // Requirements wizard
        .route(
            "/api/projects/{id}/flow_state",
            get(routes::flow::get_flow_state),
        )
        .route(
            "/api/projects/{id}/questions",
            get(routes::flow::get_questions),
        )
        .route(
            "/api/projects/{id}/submit_answer",
            post(routes::flow::submit_answer),
        )
        .route("/api/projects/{id}/summary", get(routes::flow::get_summary))
        .route(
            "/api/projects/{id}/lock",
            post(routes::flow::lock_requirements),
        )
        // Downstream artifacts
        .route(
            "/api/projects/{id}/blueprint",
            put(routes::flow::put_blueprint),
        )
        .route(
            "/api/projects/{id}/documentation",
            put(routes::flow::put_documentation),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on a pre-bound listener, so the caller can report
/// the actual port (port 0 lets the OS pick one).
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    let url = format!("http://localhost:{actual_port}");
    tracing::info!("blueprint server listening on {url}");

    if open_browser {
        if let Err(e) = open::that(format!("{url}/api/catalog")) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}

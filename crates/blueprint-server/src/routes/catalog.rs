use axum::Json;
use blueprint_core::catalog::{self, StageDefinition};

/// GET /api/catalog: every stage definition in wizard order.
pub async fn get_catalog() -> Json<&'static [StageDefinition]> {
    Json(catalog::all())
}

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use blueprint_core::artifact;
use blueprint_core::catalog;
use blueprint_core::engine::{FlowEngine, FlowState, LockReceipt, StageSummary};
use blueprint_core::paths;
use blueprint_core::types::Stage;
use serde::Deserialize;

use super::blocking;
use super::projects::detail;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/projects/{id}/flow_state
pub async fn get_flow_state(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<FlowState>, AppError> {
    let owner = app.owner(&headers);
    let state = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let engine = FlowEngine::open(&app.store, &id, &owner)?;
        Ok(engine.current_state())
    })
    .await?;
    Ok(Json(state))
}

/// GET /api/projects/{id}/questions: the current stage's catalog entry,
/// or 204 once every stage is answered.
pub async fn get_questions(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let owner = app.owner(&headers);
    let def = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let engine = FlowEngine::open(&app.store, &id, &owner)?;
        Ok(engine.current_questions())
    })
    .await?;
    Ok(match def {
        Some(def) => Json(def).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[derive(Deserialize)]
pub struct SubmitAnswerBody {
    pub stage: String,
    pub answer_data: Option<serde_json::Value>,
}

/// POST /api/projects/{id}/submit_answer
pub async fn submit_answer(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SubmitAnswerBody>,
) -> Result<Json<FlowState>, AppError> {
    let Some(answer_data) = body.answer_data else {
        return Err(AppError::bad_request("answer_data is required"));
    };
    let owner = app.owner(&headers);
    let state = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let stage: Stage = body.stage.parse()?;
        let answers = catalog::answers_from_json(stage, &answer_data)?;

        let mut engine = FlowEngine::open(&app.store, &id, &owner)?;
        match engine.submit_answer(stage, answers) {
            Ok(state) => {
                tracing::info!(
                    project = %id,
                    stage = %stage,
                    progress = state.progress_percent,
                    "answer accepted"
                );
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(project = %id, stage = %stage, error = %e, "answer rejected");
                Err(e)
            }
        }
    })
    .await?;
    Ok(Json(state))
}

/// GET /api/projects/{id}/summary
pub async fn get_summary(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<StageSummary>>, AppError> {
    let owner = app.owner(&headers);
    let summary = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let engine = FlowEngine::open(&app.store, &id, &owner)?;
        Ok(engine.summary())
    })
    .await?;
    Ok(Json(summary))
}

/// POST /api/projects/{id}/lock
pub async fn lock_requirements(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<LockReceipt>, AppError> {
    let owner = app.owner(&headers);
    let receipt = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let mut engine = FlowEngine::open(&app.store, &id, &owner)?;
        let receipt = engine.lock_requirements()?;
        if !receipt.already_locked {
            tracing::info!(project = %id, phase = %receipt.next_phase, "requirements locked");
        }
        Ok(receipt)
    })
    .await?;
    Ok(Json(receipt))
}

/// Either a ready blueprint object or raw model output to repair.
#[derive(Deserialize)]
pub struct BlueprintBody {
    #[serde(default)]
    pub blueprint: Option<serde_json::Value>,
    #[serde(default)]
    pub raw: Option<String>,
}

/// PUT /api/projects/{id}/blueprint
pub async fn put_blueprint(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<BlueprintBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = match (body.blueprint, body.raw) {
        (Some(blueprint), None) => {
            blocking(move || {
                let id = paths::parse_project_id(&id)?;
                let project = artifact::record_blueprint(&app.store, &id, &owner, blueprint)?;
                tracing::info!(project = %id, "blueprint recorded");
                detail(&project)
            })
            .await?
        }
        (None, Some(raw)) => {
            blocking(move || {
                let id = paths::parse_project_id(&id)?;
                let project = artifact::record_raw_blueprint(&app.store, &id, &owner, &raw)?;
                tracing::info!(project = %id, "blueprint recorded from model output");
                detail(&project)
            })
            .await?
        }
        _ => {
            return Err(AppError::bad_request(
                "provide exactly one of 'blueprint' or 'raw'",
            ))
        }
    };
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct DocumentationBody {
    pub markdown: String,
}

/// PUT /api/projects/{id}/documentation
pub async fn put_documentation(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<DocumentationBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let project = artifact::record_documentation(&app.store, &id, &owner, &body.markdown)?;
        tracing::info!(project = %id, "documentation recorded");
        detail(&project)
    })
    .await?;
    Ok(Json(result))
}

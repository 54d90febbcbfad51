use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use blueprint_core::action::{ActionHint, NextAction};
use blueprint_core::paths;
use blueprint_core::project::Project;
use blueprint_core::sequencer;
use blueprint_core::store::{ListOrdering, ListQuery, ProjectStore};
use serde::Deserialize;

use super::blocking;
use crate::error::AppError;
use crate::state::AppState;

fn list_entry(p: &Project) -> serde_json::Value {
    serde_json::json!({
        "id": p.id,
        "name": p.name,
        "description": p.description,
        "status": p.status,
        "phase": p.phase,
        "phase_name": p.phase.display_name(),
        "progress_percent": sequencer::progress(&p.answers).percent,
        "next_action": ActionHint::from(NextAction::for_project(p)),
        "updated_at": p.updated_at,
    })
}

/// Full project record plus derived progress and next action.
pub(crate) fn detail(p: &Project) -> blueprint_core::Result<serde_json::Value> {
    let mut value = serde_json::to_value(p)?;
    value["phase_name"] = serde_json::json!(p.phase.display_name());
    value["progress"] = serde_json::to_value(sequencer::progress(&p.answers))?;
    value["next_action"] = serde_json::to_value(ActionHint::from(NextAction::for_project(p)))?;
    Ok(value)
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub ordering: Option<String>,
}

/// GET /api/projects?search=&ordering=: the caller's projects, most
/// recently updated first unless `ordering` says otherwise.
pub async fn list_projects(
    State(app): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let query = ListQuery {
            search: params.search,
            ordering: match params.ordering {
                Some(o) => o.parse()?,
                None => ListOrdering::default(),
            },
        };
        let projects = app.store.query(&owner, &query)?;
        let list: Vec<serde_json::Value> = projects.iter().map(list_entry).collect();
        Ok(serde_json::json!(list))
    })
    .await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/projects: create a draft project.
pub async fn create_project(
    State(app): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("name is required"));
    }
    let description = body.description.filter(|d| !d.trim().is_empty());
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let project = app.store.create(&owner, &name, description)?;
        tracing::info!(project = %project.id, owner = %owner, "project created");
        detail(&project)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/projects/{id}: project detail.
pub async fn get_project(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let project = app.store.load(&id, &owner)?;
        detail(&project)
    })
    .await?;
    Ok(Json(result))
}

#[derive(Deserialize)]
pub struct UpdateProjectBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// PATCH /api/projects/{id}: rename or re-describe. Absent fields are kept.
pub async fn update_project(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let project = app
            .store
            .update_details(&id, &owner, body.name, body.description)?;
        tracing::info!(project = %id, "project details updated");
        detail(&project)
    })
    .await?;
    Ok(Json(result))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        app.store.delete(&id, &owner)?;
        tracing::info!(project = %id, owner = %owner, "project deleted");
        Ok(serde_json::json!({ "deleted": id }))
    })
    .await?;
    Ok(Json(result))
}

/// POST /api/projects/{id}/duplicate: draft copy with the same answers.
pub async fn duplicate_project(
    State(app): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let owner = app.owner(&headers);
    let result = blocking(move || {
        let id = paths::parse_project_id(&id)?;
        let copy = app.store.duplicate(&id, &owner)?;
        tracing::info!(source = %id, project = %copy.id, "project duplicated");
        detail(&copy)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

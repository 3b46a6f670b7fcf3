//! `/tasks` endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use todo_core::requests::{TaskCreate, TaskIdQuery, TaskQuery, TaskUpdate};
use todo_core::responses::{TaskRead, TaskReadList};
use todo_schema::registry::{TASK_CREATE, TASK_UPDATE};

use crate::error::ApiError;
use crate::extract::{self, DbSession};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/tasks",
        get(get_tasks)
            .post(create_task)
            .put(update_task)
            .patch(patch_task)
            .delete(delete_task),
    )
}

async fn get_tasks(
    State(state): State<AppState>,
    DbSession(session): DbSession,
    params: Result<Query<TaskQuery>, QueryRejection>,
) -> Result<Json<TaskReadList>, ApiError> {
    let query = extract::query(params)?;
    Ok(Json(state.service.get_tasks(&session, &query).await?))
}

async fn create_task(
    State(state): State<AppState>,
    DbSession(session): DbSession,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskRead>), ApiError> {
    let input: TaskCreate = extract::body(&state.schemas, TASK_CREATE, body)?;
    let read = state.service.create_task(&session, &input).await?;
    Ok((StatusCode::CREATED, Json(read)))
}

async fn update_task(
    State(state): State<AppState>,
    DbSession(session): DbSession,
    params: Result<Query<TaskIdQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TaskRead>, ApiError> {
    let TaskIdQuery { task_id } = extract::query(params)?;
    let update: TaskUpdate = extract::body(&state.schemas, TASK_UPDATE, body)?;
    Ok(Json(state.service.update_task(&session, task_id, &update).await?))
}

async fn patch_task(
    State(state): State<AppState>,
    DbSession(session): DbSession,
    params: Result<Query<TaskIdQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TaskRead>, ApiError> {
    let TaskIdQuery { task_id } = extract::query(params)?;
    let update: TaskUpdate = extract::body(&state.schemas, TASK_UPDATE, body)?;
    Ok(Json(state.service.patch_task(&session, task_id, &update).await?))
}

async fn delete_task(
    State(state): State<AppState>,
    DbSession(session): DbSession,
    params: Result<Query<TaskIdQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let TaskIdQuery { task_id } = extract::query(params)?;
    state.service.delete_task(&session, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Routine handlers: list, get, create, update, delete

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use gymkit_types::{CreateRoutineRequest, Routine, UpdateRoutineRequest};

use super::{ApiFailure, CurrentSession};
use crate::state::AppState;

pub async fn list_routines(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<Vec<Routine>>, ApiFailure> {
    Ok(Json(state.repository().list_routines().await?))
}

pub async fn get_routine(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(slug): Path<String>,
) -> Result<Json<Routine>, ApiFailure> {
    Ok(Json(state.repository().get_routine(&slug).await?))
}

pub async fn create_routine(
    State(state): State<AppState>,
    _session: CurrentSession,
    payload: Result<Json<CreateRoutineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Routine>), ApiFailure> {
    let Json(input) = payload?;
    let routine = state.repository().create_routine(input).await?;
    Ok((StatusCode::CREATED, Json(routine)))
}

pub async fn update_routine(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(slug): Path<String>,
    payload: Result<Json<UpdateRoutineRequest>, JsonRejection>,
) -> Result<Json<Routine>, ApiFailure> {
    let Json(input) = payload?;
    Ok(Json(state.repository().update_routine(&slug, input).await?))
}

pub async fn delete_routine(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    state.repository().delete_routine(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}

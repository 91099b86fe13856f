//! CRUD handlers for the colleague collection.
//!
//! Updates and deletes are reachable both item-addressed
//! (`/colleagues/{id}`) and collection-addressed with the id in the body;
//! both forms hit the same store operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::core::{Colleague, ColleagueDraft, ColleagueId};
use crate::store::ColleagueStore;

use super::error::ApiError;

/// Body for the collection-level PUT: the id travels with the record.
#[derive(Deserialize)]
pub struct UpdateBody {
    pub id: ColleagueId,
    #[serde(flatten)]
    pub draft: ColleagueDraft,
}

/// Body for the collection-level DELETE.
#[derive(Deserialize)]
pub struct DeleteBody {
    pub id: ColleagueId,
}

pub async fn list_colleagues(
    State(store): State<ColleagueStore>,
) -> Result<Json<Vec<Colleague>>, ApiError> {
    Ok(Json(store.list().await?))
}

pub async fn create_colleague(
    State(store): State<ColleagueStore>,
    Json(draft): Json<ColleagueDraft>,
) -> Result<(StatusCode, Json<Colleague>), ApiError> {
    let created = store.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_colleague(
    State(store): State<ColleagueStore>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Colleague>, ApiError> {
    Ok(Json(store.update(body.id, &body.draft).await?))
}

pub async fn delete_colleague(
    State(store): State<ColleagueStore>,
    Json(body): Json<DeleteBody>,
) -> Result<StatusCode, ApiError> {
    store.delete(body.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_colleague_by_id(
    State(store): State<ColleagueStore>,
    Path(id): Path<i64>,
    Json(draft): Json<ColleagueDraft>,
) -> Result<Json<Colleague>, ApiError> {
    Ok(Json(store.update(ColleagueId::new(id), &draft).await?))
}

pub async fn delete_colleague_by_id(
    State(store): State<ColleagueStore>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    store.delete(ColleagueId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Venue Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::ListQuery;
use crate::core::ServerState;
use crate::db::models::{Table, TableCreate};
use crate::db::repository::table as table_repo;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub capacity: i64,
}

#[derive(Debug, Serialize)]
pub struct EmptySeatsResponse {
    pub seats_empty: i64,
}

/// GET /api/tables - list tables (paginated)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Table>>> {
    let (limit, offset) = query.clamped();
    let tables = table_repo::find_all(&state.pool, limit, offset).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id} - table detail
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Table>> {
    let table = table_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}

/// POST /api/tables - create a table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateTableRequest>,
) -> AppResult<(StatusCode, Json<Table>)> {
    if payload.capacity < 1 {
        return Err(AppError::validation("capacity cannot be less than 1"));
    }
    let table = table_repo::create(
        &state.pool,
        TableCreate {
            capacity: payload.capacity,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// POST /api/tables/reset - delete all guests and tables
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<bool>> {
    table_repo::reset(&state.pool).await?;
    tracing::info!("venue reset: all tables and guests removed");
    Ok(Json(true))
}

/// GET /api/seats/empty - total unoccupied seats across the venue
pub async fn empty_seats(State(state): State<ServerState>) -> AppResult<Json<EmptySeatsResponse>> {
    let seats_empty = table_repo::empty_seats_count(&state.pool).await?;
    Ok(Json(EmptySeatsResponse { seats_empty }))
}

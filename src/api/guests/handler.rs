//! Guest List API Handlers
//!
//! The request bodies count accompanying guests, matching how a host
//! thinks ("alice plus three"); the admission core works in party sizes
//! (accompanying + 1), so a party is never empty by construction.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::ListQuery;
use crate::core::ServerState;
use crate::db::models::Guest;
use crate::db::repository::guest as guest_repo;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    /// Table the RSVP is for
    pub table: i64,
    /// Guests beyond the named one (party size = this + 1)
    #[serde(default)]
    pub accompanying_guests: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub accompanying_guests: i64,
}

/// POST /api/guest-list/{name} - RSVP a party
pub async fn rsvp(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(payload): Json<RsvpRequest>,
) -> AppResult<(StatusCode, Json<Guest>)> {
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    if payload.table < 1 {
        return Err(AppError::validation("table id must be positive"));
    }
    if payload.accompanying_guests < 0 {
        return Err(AppError::validation(
            "accompanying guests cannot be less than 0",
        ));
    }

    let guest = guest_repo::rsvp(
        &state.pool,
        &name,
        payload.table,
        payload.accompanying_guests + 1,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// GET /api/guest-list - all RSVP'd guests (paginated)
pub async fn guest_list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Guest>>> {
    let (limit, offset) = query.clamped();
    let guests = guest_repo::find_all(&state.pool, limit, offset).await?;
    Ok(Json(guests))
}

/// GET /api/guests - currently arrived guests (paginated)
pub async fn arrived_guests(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Guest>>> {
    let (limit, offset) = query.clamped();
    let guests = guest_repo::find_arrived(&state.pool, limit, offset).await?;
    Ok(Json(guests))
}

/// PUT /api/guests/{name} - check a party in
pub async fn check_in(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<Guest>> {
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    if payload.accompanying_guests < 0 {
        return Err(AppError::validation(
            "accompanying guests cannot be less than 0",
        ));
    }

    let guest = guest_repo::check_in(&state.pool, &name, payload.accompanying_guests + 1).await?;
    Ok(Json(guest))
}

/// DELETE /api/guests/{name} - check a party out
pub async fn check_out(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<Guest>> {
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    let guest = guest_repo::check_out(&state.pool, &name).await?;
    Ok(Json(guest))
}

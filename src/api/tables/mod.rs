//! Venue Table API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/tables", get(handler::list).post(handler::create))
        .route("/api/tables/reset", post(handler::reset))
        .route("/api/tables/{id}", get(handler::get_by_id))
        .route("/api/seats/empty", get(handler::empty_seats))
}

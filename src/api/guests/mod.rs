//! Guest List API module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/guest-list", get(handler::guest_list))
        .route("/api/guest-list/{name}", post(handler::rsvp))
        .route("/api/guests", get(handler::arrived_guests))
        .route(
            "/api/guests/{name}",
            put(handler::check_in).delete(handler::check_out),
        )
}

//! Guestlist Server — venue admission over a fixed set of tables
//!
//! Guests RSVP a block of seats at a table, check in on arrival and check
//! out on departure. Two capacity envelopes are tracked per table —
//! reservations (`planned_capacity`) and physical presence
//! (`available_capacity`) — and kept consistent under concurrent access by
//! optimistic locking: every counter write is a version-guarded conditional
//! update inside a single transaction, and a guard miss aborts the whole
//! operation.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, state, server lifecycle
//! ├── api/           # HTTP routes and handlers (axum)
//! ├── db/            # SQLite pool, models, repositories, capacity rules
//! └── utils/         # Errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

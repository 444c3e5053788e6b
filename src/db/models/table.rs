//! Venue Table Model

use serde::{Deserialize, Serialize};

/// A fixed-capacity table in the venue.
///
/// Two independent capacity envelopes are tracked per table:
/// - `planned_capacity`: seats not yet promised to an RSVP
/// - `available_capacity`: seats not occupied by a checked-in guest
///
/// The envelopes are not required to equal each other; reservations and
/// physical presence are separate commitments.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Table {
    pub id: i64,
    /// Total seats, fixed at creation
    pub capacity: i64,
    pub planned_capacity: i64,
    pub available_capacity: i64,
    /// Optimistic-lock counter, bumped on every successful write
    pub version: i64,
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCreate {
    pub capacity: i64,
}

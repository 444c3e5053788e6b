//! Capacity admission rules
//!
//! Pure decisions over an observed [`Table`] snapshot — no I/O, no
//! mutation. The admission engine calls these before opening a
//! transaction, so an over-capacity request is rejected without a single
//! write being attempted. Staleness of the snapshot is the version guard's
//! problem, not ours.

use crate::db::models::Table;
use crate::db::repository::RepoError;

/// Can `party_size` seats still be promised to an RSVP at this table?
///
/// Checks the reservation envelope (`planned_capacity`).
pub fn check_rsvp(table: &Table, party_size: i64) -> Result<(), RepoError> {
    if table.planned_capacity < party_size {
        return Err(RepoError::TableFull {
            table_id: table.id,
            requested: party_size,
            remaining: table.planned_capacity,
        });
    }
    Ok(())
}

/// Can a party of `party_size` physically sit down at this table right now?
///
/// Checks the occupancy envelope (`available_capacity`). The arriving party
/// size is checked as given; it is allowed to differ from the RSVP party.
pub fn check_arrival(table: &Table, party_size: i64) -> Result<(), RepoError> {
    if table.available_capacity < party_size {
        return Err(RepoError::TableFull {
            table_id: table.id,
            requested: party_size,
            remaining: table.available_capacity,
        });
    }
    Ok(())
}

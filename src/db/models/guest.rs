//! Guest Model

use serde::{Deserialize, Serialize};

/// A guest on the guest list.
///
/// `name` is the business key; every admission operation looks guests up by
/// name. A guest cycles between RSVP'd (`total_arrived_guests == 0`) and
/// present (`total_arrived_guests > 0`, `arrival_time` set) indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    /// Table the RSVP is pinned to, fixed at RSVP time
    pub table_id: i64,
    /// RSVP party size, named guest included, fixed at RSVP time
    pub total_guests: i64,
    /// 0 while absent; the checked-in party size while present
    pub total_arrived_guests: i64,
    /// UTC milliseconds; NULL while the guest is absent
    pub arrival_time: Option<i64>,
    /// Optimistic-lock counter, bumped on every successful write
    pub version: i64,
}

impl Guest {
    /// Whether the guest is currently checked in.
    pub fn is_present(&self) -> bool {
        self.total_arrived_guests > 0
    }
}

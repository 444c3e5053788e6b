//! Guest Repository — query surface and admission engine
//!
//! The three admission transitions (RSVP, check-in, check-out) each run as
//! one transaction whose writes are guarded by the versions observed during
//! the pre-transaction reads. A guard that matches zero rows means another
//! writer got there first; the whole transaction rolls back and the caller
//! gets [`RepoError::OptimisticLock`]. The engine never retries on its own:
//! the admission decision may no longer hold, so a retry must start over
//! from a fresh read.

use sqlx::{Sqlite, SqlitePool, Transaction};

use super::{RepoError, RepoResult, table};
use crate::db::capacity;
use crate::db::models::Guest;
use crate::utils::time::now_millis;

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Guest>> {
    let guest = sqlx::query_as::<_, Guest>(
        "SELECT id, name, table_id, total_guests, total_arrived_guests, arrival_time, version FROM guest WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(guest)
}

/// All guests with an RSVP, present or not.
pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Guest>> {
    let guests = sqlx::query_as::<_, Guest>(
        "SELECT id, name, table_id, total_guests, total_arrived_guests, arrival_time, version FROM guest ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(guests)
}

/// Guests currently checked in.
pub async fn find_arrived(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Guest>> {
    let guests = sqlx::query_as::<_, Guest>(
        "SELECT id, name, table_id, total_guests, total_arrived_guests, arrival_time, version FROM guest WHERE total_arrived_guests > 0 ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(guests)
}

/// RSVP a party of `party_size` seats at `table_id` under `name`.
///
/// Consumes the reservation envelope. The table update is guarded on the
/// version read before the capacity decision; a concurrent RSVP for the
/// same table makes the guard miss and the insert rolls back with it.
pub async fn rsvp(
    pool: &SqlitePool,
    name: &str,
    table_id: i64,
    party_size: i64,
) -> RepoResult<Guest> {
    if party_size < 1 {
        return Err(RepoError::Validation(
            "party size cannot be less than 1".into(),
        ));
    }

    if find_by_name(pool, name).await?.is_some() {
        return Err(RepoError::AlreadyRsvpd(name.to_string()));
    }

    let venue_table = table::find_by_id(pool, table_id)
        .await?
        .ok_or(RepoError::TableNotFound(table_id))?;

    capacity::check_rsvp(&venue_table, party_size)?;

    let mut tx = pool.begin().await?;

    let guest_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO guest (name, table_id, total_guests, total_arrived_guests, version) VALUES (?, ?, ?, 0, 0) RETURNING id",
    )
    .bind(name)
    .bind(table_id)
    .bind(party_size)
    .fetch_one(&mut *tx)
    .await?;

    let applied = table::apply_capacity_update(
        &mut tx,
        venue_table.id,
        venue_table.planned_capacity - party_size,
        venue_table.available_capacity,
        venue_table.version,
    )
    .await?;
    if !applied {
        tx.rollback().await?;
        tracing::warn!(name, table_id, "RSVP lost the table version race");
        return Err(RepoError::OptimisticLock);
    }

    tx.commit().await?;
    tracing::info!(name, table_id, party_size, "guest added to guest list");

    Ok(Guest {
        id: guest_id,
        name: name.to_string(),
        table_id,
        total_guests: party_size,
        total_arrived_guests: 0,
        arrival_time: None,
        version: 0,
    })
}

/// Check a party of `party_size` in under `name`.
///
/// Consumes the occupancy envelope. The arriving party size is independent
/// of the RSVP party size. Both the guest row and the table row are
/// version-guarded; the transaction commits only if both guards hit.
pub async fn check_in(pool: &SqlitePool, name: &str, party_size: i64) -> RepoResult<Guest> {
    if party_size < 1 {
        return Err(RepoError::Validation(
            "party size cannot be less than 1".into(),
        ));
    }

    let guest = find_by_name(pool, name)
        .await?
        .ok_or_else(|| RepoError::NeverRsvpd(name.to_string()))?;

    if guest.total_arrived_guests != 0 {
        return Err(RepoError::AlreadyArrived(name.to_string()));
    }

    // A guest row always references an existing table; absence here is
    // corruption, not a caller mistake.
    let venue_table = table::find_by_id(pool, guest.table_id).await?.ok_or_else(|| {
        RepoError::Database(format!(
            "guest '{}' references missing table {}",
            name, guest.table_id
        ))
    })?;

    capacity::check_arrival(&venue_table, party_size)?;

    let arrival_time = now_millis();
    let mut tx = pool.begin().await?;

    let applied =
        apply_presence_update(&mut tx, guest.id, party_size, Some(arrival_time), guest.version)
            .await?;
    if !applied {
        tx.rollback().await?;
        tracing::warn!(name, "check-in lost the guest version race");
        return Err(RepoError::OptimisticLock);
    }

    let applied = table::apply_capacity_update(
        &mut tx,
        venue_table.id,
        venue_table.planned_capacity,
        venue_table.available_capacity - party_size,
        venue_table.version,
    )
    .await?;
    if !applied {
        tx.rollback().await?;
        tracing::warn!(name, table_id = venue_table.id, "check-in lost the table version race");
        return Err(RepoError::OptimisticLock);
    }

    tx.commit().await?;
    tracing::info!(name, party_size, table_id = venue_table.id, "guest checked in");

    Ok(Guest {
        total_arrived_guests: party_size,
        arrival_time: Some(arrival_time),
        version: guest.version + 1,
        ..guest
    })
}

/// Check the party registered under `name` out.
///
/// Returns the pre-update arrived count to the occupancy envelope and
/// resets the guest to the RSVP'd state, so a later check-in is possible.
pub async fn check_out(pool: &SqlitePool, name: &str) -> RepoResult<Guest> {
    let guest = find_by_name(pool, name)
        .await?
        .ok_or_else(|| RepoError::GuestNotFound(name.to_string()))?;

    if guest.total_arrived_guests == 0 {
        return Err(RepoError::NotArrived(name.to_string()));
    }

    let venue_table = table::find_by_id(pool, guest.table_id).await?.ok_or_else(|| {
        RepoError::Database(format!(
            "guest '{}' references missing table {}",
            name, guest.table_id
        ))
    })?;

    let mut tx = pool.begin().await?;

    let applied = apply_presence_update(&mut tx, guest.id, 0, None, guest.version).await?;
    if !applied {
        tx.rollback().await?;
        tracing::warn!(name, "check-out lost the guest version race");
        return Err(RepoError::OptimisticLock);
    }

    let applied = table::apply_capacity_update(
        &mut tx,
        venue_table.id,
        venue_table.planned_capacity,
        venue_table.available_capacity + guest.total_arrived_guests,
        venue_table.version,
    )
    .await?;
    if !applied {
        tx.rollback().await?;
        tracing::warn!(name, table_id = venue_table.id, "check-out lost the table version race");
        return Err(RepoError::OptimisticLock);
    }

    tx.commit().await?;
    tracing::info!(name, table_id = venue_table.id, "guest checked out");

    Ok(Guest {
        total_arrived_guests: 0,
        arrival_time: None,
        version: guest.version + 1,
        ..guest
    })
}

/// Version-guarded write of a guest's presence fields.
async fn apply_presence_update(
    tx: &mut Transaction<'_, Sqlite>,
    guest_id: i64,
    total_arrived_guests: i64,
    arrival_time: Option<i64>,
    expected_version: i64,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE guest SET total_arrived_guests = ?, arrival_time = ?, version = version + 1 WHERE id = ? AND version = ?",
    )
    .bind(total_arrived_guests)
    .bind(arrival_time)
    .bind(guest_id)
    .bind(expected_version)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() == 1)
}

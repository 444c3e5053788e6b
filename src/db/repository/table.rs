//! Venue Table Repository

use sqlx::{Sqlite, SqlitePool, Transaction};

use super::{RepoError, RepoResult};
use crate::db::models::{Table, TableCreate};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Table>> {
    let table = sqlx::query_as::<_, Table>(
        "SELECT id, capacity, planned_capacity, available_capacity, version FROM venue_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_all(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<Table>> {
    let tables = sqlx::query_as::<_, Table>(
        "SELECT id, capacity, planned_capacity, available_capacity, version FROM venue_table ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

/// Create a table with both capacity envelopes starting full.
pub async fn create(pool: &SqlitePool, data: TableCreate) -> RepoResult<Table> {
    if data.capacity < 1 {
        return Err(RepoError::Validation(
            "capacity cannot be less than 1".into(),
        ));
    }
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO venue_table (capacity, planned_capacity, available_capacity, version) VALUES (?, ?, ?, 0) RETURNING id",
    )
    .bind(data.capacity)
    .bind(data.capacity)
    .bind(data.capacity)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create table".into()))
}

/// Delete every guest and every table. Used by the venue reset endpoint.
pub async fn reset(pool: &SqlitePool) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM guest").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM venue_table")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// Total unoccupied seats across the venue. 0 for an empty venue.
pub async fn empty_seats_count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(available_capacity), 0) FROM venue_table",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Version-guarded write of a table's capacity counters.
///
/// This is the optimistic-lock primitive: the update applies only if the
/// row's version still equals `expected_version`, and the caller learns
/// whether it applied from the returned bool. Runs inside the caller's
/// transaction so it can be rolled back together with the rest of the
/// operation.
pub async fn apply_capacity_update(
    tx: &mut Transaction<'_, Sqlite>,
    table_id: i64,
    planned_capacity: i64,
    available_capacity: i64,
    expected_version: i64,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE venue_table SET planned_capacity = ?, available_capacity = ?, version = version + 1 WHERE id = ? AND version = ?",
    )
    .bind(planned_capacity)
    .bind(available_capacity)
    .bind(table_id)
    .bind(expected_version)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() == 1)
}

use model::{location::SavedLocation, Coordinate};
use sqlx::{Executor, Postgres};
use utility::{id::Id, let_also::LetAlso};

use crate::data_model::saved_location::SavedLocationRow;

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> discovery::Result<Vec<SavedLocation>>
where
    E: Executor<'c, Database = Postgres>,
{
    let rows: Vec<SavedLocationRow> = sqlx::query_as(
        "
        SELECT id, name, x, y, created_at
        FROM saved_locations
        ORDER BY created_at DESC, id DESC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?;

    rows.into_iter()
        .map(SavedLocationRow::to_model)
        .collect::<Vec<_>>()
        .let_owned(Ok)
}

pub async fn insert<'c, E>(
    executor: E,
    name: &str,
    coordinate: Coordinate,
) -> discovery::Result<SavedLocation>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        INSERT INTO saved_locations(
            name,
            x,
            y
        )
        VALUES ($1, $2, $3)
        RETURNING id, name, x, y, created_at;
        ",
    )
    .bind(name)
    .bind(coordinate.latitude())
    .bind(coordinate.longitude())
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: SavedLocationRow| row.to_model())
}

pub async fn delete<'c, E>(executor: E, id: Id<SavedLocation>) -> discovery::Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM saved_locations WHERE id = $1;")
        .bind(id.raw())
        .execute(executor)
        .await
        .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(discovery::DiscoveryError::NotFound);
    }
    Ok(())
}

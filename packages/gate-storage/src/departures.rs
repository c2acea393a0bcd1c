use sqlx::{PgExecutor, Postgres, Transaction};
use time::OffsetDateTime;

use crate::{
	BoxFuture, DepartureStore, Error, Result,
	db::Db,
	models::{ClearOutcome, Departure, UpsertOutcome},
};

#[derive(sqlx::FromRow)]
struct UpsertRow {
	#[sqlx(flatten)]
	departure: Departure,
	inserted: bool,
}

pub async fn list_departures<'e, E>(executor: E) -> Result<Vec<Departure>>
where
	E: PgExecutor<'e>,
{
	let departures = sqlx::query_as::<_, Departure>(
		"\
SELECT id, category, restricted_items, is_cleared, created_at, updated_at
FROM departures
ORDER BY id",
	)
	.fetch_all(executor)
	.await?;

	Ok(departures)
}

/// Inserts or updates the record for `category` in one statement.
///
/// The unique index on `category` serializes concurrent callers. Rows that are already cleared
/// are excluded by the `WHERE` on the conflict branch, so no row comes back for them.
pub async fn upsert_departure<'e, E>(
	executor: E,
	category: &str,
	restricted_items: &str,
	now: OffsetDateTime,
) -> Result<UpsertOutcome>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, UpsertRow>(
		"\
INSERT INTO departures (category, restricted_items, is_cleared, created_at, updated_at)
VALUES ($1, $2, FALSE, $3, $3)
ON CONFLICT (category) DO UPDATE
SET
	restricted_items = EXCLUDED.restricted_items,
	updated_at = EXCLUDED.updated_at
WHERE departures.is_cleared = FALSE
RETURNING
	id,
	category,
	restricted_items,
	is_cleared,
	created_at,
	updated_at,
	(xmax = 0) AS inserted",
	)
	.bind(category)
	.bind(restricted_items)
	.bind(now)
	.fetch_optional(executor)
	.await?;

	match row {
		Some(UpsertRow { departure, inserted: true }) => Ok(UpsertOutcome::Created(departure)),
		Some(UpsertRow { departure, inserted: false }) => Ok(UpsertOutcome::Updated(departure)),
		None => Err(Error::Conflict(format!("Departure for category {category:?} is cleared."))),
	}
}

pub async fn clear_departure_tx(
	tx: &mut Transaction<'_, Postgres>,
	id: i64,
	now: OffsetDateTime,
) -> Result<ClearOutcome> {
	let departure = sqlx::query_as::<_, Departure>(
		"\
SELECT id, category, restricted_items, is_cleared, created_at, updated_at
FROM departures
WHERE id = $1
FOR UPDATE",
	)
	.bind(id)
	.fetch_optional(&mut **tx)
	.await?
	.ok_or_else(|| Error::NotFound(format!("Departure {id} does not exist.")))?;

	if departure.is_cleared {
		return Ok(ClearOutcome::AlreadyCleared(departure));
	}

	let departure = sqlx::query_as::<_, Departure>(
		"\
UPDATE departures
SET is_cleared = TRUE, updated_at = $1
WHERE id = $2
RETURNING id, category, restricted_items, is_cleared, created_at, updated_at",
	)
	.bind(now)
	.bind(id)
	.fetch_one(&mut **tx)
	.await?;

	Ok(ClearOutcome::Cleared(departure))
}

impl DepartureStore for Db {
	fn list(&self) -> BoxFuture<'_, Result<Vec<Departure>>> {
		Box::pin(list_departures(&self.pool))
	}

	fn upsert<'a>(
		&'a self,
		category: &'a str,
		restricted_items: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<UpsertOutcome>> {
		Box::pin(upsert_departure(&self.pool, category, restricted_items, now))
	}

	fn clear(&self, id: i64, now: OffsetDateTime) -> BoxFuture<'_, Result<ClearOutcome>> {
		Box::pin(async move {
			let mut tx = self.pool.begin().await?;
			let outcome = clear_departure_tx(&mut tx, id, now).await?;

			tx.commit().await?;

			Ok(outcome)
		})
	}
}

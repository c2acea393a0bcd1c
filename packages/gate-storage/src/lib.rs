pub mod db;
pub mod departures;
pub mod memory;
pub mod models;
pub mod schema;

mod error;

pub use error::Error;

use std::{future::Future, pin::Pin};

use time::OffsetDateTime;

use crate::models::{ClearOutcome, Departure, UpsertOutcome};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Durable departure records keyed by category.
///
/// Implementations must make `upsert` atomic per category: two concurrent calls for the same
/// category never produce two records.
pub trait DepartureStore
where
	Self: Send + Sync,
{
	/// All records ordered by id.
	fn list(&self) -> BoxFuture<'_, Result<Vec<Departure>>>;

	/// Creates the record for `category` or replaces its restricted items.
	///
	/// Fails with [`Error::Conflict`] when the existing record is cleared.
	fn upsert<'a>(
		&'a self,
		category: &'a str,
		restricted_items: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<UpsertOutcome>>;

	/// Marks the record cleared. Fails with [`Error::NotFound`] for an unknown id.
	fn clear(&self, id: i64, now: OffsetDateTime) -> BoxFuture<'_, Result<ClearOutcome>>;
}

//! In-memory list cache in front of a [`DepartureApi`].
//!
//! The cached list is keyed by the list endpoint. Any successful sync or clear issued through
//! this layer drops that entry, so the next read goes back to the server. Changes made by
//! other clients are only seen after such an invalidation.

use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{DepartureApi, DepartureRecord, Result, SyncRequest};

/// Cache key of the list endpoint.
pub const LIST_QUERY_KEY: &str = "/api/departures";

/// Result from a cache read, with metadata about where the data came from.
#[derive(Clone, Debug)]
pub struct CacheResult<T> {
	pub data: T,
	pub source: CacheSource,
	/// When the data was stored, if it came from the cache.
	pub cached_at: Option<OffsetDateTime>,
}
impl<T> CacheResult<T> {
	pub fn from_network(data: T) -> Self {
		Self { data, source: CacheSource::Network, cached_at: None }
	}

	pub fn from_cache(data: T, cached_at: OffsetDateTime) -> Self {
		Self { data, source: CacheSource::Cache, cached_at: Some(cached_at) }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheSource {
	Network,
	Cache,
}

struct CachedList {
	records: Vec<DepartureRecord>,
	cached_at: OffsetDateTime,
}

pub struct CachedDepartures<A> {
	api: A,
	entries: Mutex<HashMap<&'static str, CachedList>>,
}
impl<A> CachedDepartures<A>
where
	A: DepartureApi,
{
	pub fn new(api: A) -> Self {
		Self { api, entries: Mutex::new(HashMap::new()) }
	}

	pub fn api(&self) -> &A {
		&self.api
	}

	/// Returns the cached list, fetching it first when absent.
	///
	/// The lock is held across the fetch, so an invalidation that races a fetch always lands
	/// after the fetched list is stored and discards it.
	pub async fn list(&self) -> Result<CacheResult<Vec<DepartureRecord>>> {
		let mut entries = self.entries.lock().await;

		if let Some(cached) = entries.get(LIST_QUERY_KEY) {
			return Ok(CacheResult::from_cache(cached.records.clone(), cached.cached_at));
		}

		let records = self.api.list().await?;

		tracing::debug!(count = records.len(), "Fetched departures.");

		entries.insert(
			LIST_QUERY_KEY,
			CachedList { records: records.clone(), cached_at: OffsetDateTime::now_utc() },
		);

		Ok(CacheResult::from_network(records))
	}

	pub async fn sync(&self, req: &SyncRequest) -> Result<DepartureRecord> {
		let record = self.api.sync(req).await?;

		self.invalidate().await;

		Ok(record)
	}

	pub async fn clear(&self, id: i64) -> Result<DepartureRecord> {
		let record = self.api.clear(id).await?;

		self.invalidate().await;

		Ok(record)
	}

	/// Drops the cached list so the next [`Self::list`] re-fetches.
	pub async fn invalidate(&self) {
		if self.entries.lock().await.remove(LIST_QUERY_KEY).is_some() {
			tracing::debug!(key = LIST_QUERY_KEY, "Invalidated cached departures.");
		}
	}

	pub async fn is_cached(&self) -> bool {
		self.entries.lock().await.contains_key(LIST_QUERY_KEY)
	}
}

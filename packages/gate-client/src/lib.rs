//! Client side of the departure API: an HTTP transport and a list cache that is invalidated by
//! every successful mutation.

pub mod cache;
pub mod http;

mod error;

pub use cache::{CacheResult, CacheSource, CachedDepartures};
pub use error::{Error, Result};
pub use gate_domain::{DepartureRecord, SyncRequest};
pub use http::HttpClient;

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The three departure operations as seen by a consumer.
pub trait DepartureApi
where
	Self: Send + Sync,
{
	fn list(&self) -> BoxFuture<'_, Result<Vec<DepartureRecord>>>;

	fn sync<'a>(&'a self, req: &'a SyncRequest) -> BoxFuture<'a, Result<DepartureRecord>>;

	fn clear(&self, id: i64) -> BoxFuture<'_, Result<DepartureRecord>>;
}

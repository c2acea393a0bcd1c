//! Wire types shared by the departure server and its clients.

pub mod time_serde;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A departure record as it crosses the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRecord {
	pub id: i64,
	pub category: String,
	pub restricted_items: String,
	pub is_cleared: bool,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
	pub category: String,
	pub restricted_items: String,
}

pub mod clear;
pub mod list;
pub mod sync;

mod error;

pub use error::{Error, Result};
pub use gate_domain::{DepartureRecord, SyncRequest};

use std::sync::Arc;

use gate_config::Config;
use gate_storage::{DepartureStore, models::Departure};

pub struct GateService {
	pub cfg: Config,
	pub store: Arc<dyn DepartureStore>,
}
impl GateService {
	pub fn new(cfg: Config, store: Arc<dyn DepartureStore>) -> Self {
		Self { cfg, store }
	}
}

pub(crate) fn to_record(departure: Departure) -> DepartureRecord {
	DepartureRecord {
		id: departure.id,
		category: departure.category,
		restricted_items: departure.restricted_items,
		is_cleared: departure.is_cleared,
		updated_at: departure.updated_at,
	}
}

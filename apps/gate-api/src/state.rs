use std::sync::Arc;

use gate_config::{Config, StorageBackend};
use gate_service::GateService;
use gate_storage::{DepartureStore, db::Db, memory::MemoryStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<GateService>,
}
impl AppState {
	pub async fn new(config: Config) -> color_eyre::Result<Self> {
		let store: Arc<dyn DepartureStore> = match config.storage.backend {
			StorageBackend::Postgres => {
				let postgres = config.storage.postgres.as_ref().ok_or_else(|| {
					color_eyre::eyre::eyre!("storage.postgres is required for the postgres backend.")
				})?;
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				Arc::new(db)
			},
			StorageBackend::Memory => {
				tracing::warn!("Using the in-memory store; departures will not survive a restart.");

				Arc::new(MemoryStore::new())
			},
		};
		let service = GateService::new(config, store);

		Ok(Self { service: Arc::new(service) })
	}
}

use time::OffsetDateTime;

use crate::{DepartureRecord, GateService, Result};
use gate_storage::models::ClearOutcome;

impl GateService {
	pub async fn clear(&self, id: i64) -> Result<DepartureRecord> {
		let now = OffsetDateTime::now_utc();
		let outcome = self.store.clear(id, now).await.inspect_err(|err| {
			tracing::warn!(id, error = %err, "Departure clear rejected.");
		})?;

		match &outcome {
			ClearOutcome::Cleared(departure) => {
				tracing::info!(id, category = %departure.category, "Departure cleared.");
			},
			ClearOutcome::AlreadyCleared(_) => {
				tracing::debug!(id, "Departure was already cleared.");
			},
		}

		Ok(crate::to_record(outcome.into_departure()))
	}
}

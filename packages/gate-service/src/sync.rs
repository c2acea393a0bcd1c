use time::OffsetDateTime;

use crate::{DepartureRecord, Error, GateService, Result, SyncRequest};
use gate_storage::models::UpsertOutcome;

impl GateService {
	/// Creates the record for the category or replaces its restricted items.
	///
	/// A cleared record is never reopened: syncing it fails with [`Error::Conflict`].
	pub async fn sync(&self, req: SyncRequest) -> Result<DepartureRecord> {
		let now = OffsetDateTime::now_utc();
		let category = req.category.trim();

		self.validate_sync(category, &req.restricted_items)?;

		let outcome = self.store.upsert(category, &req.restricted_items, now).await.inspect_err(
			|err| tracing::warn!(category, error = %err, "Departure sync rejected."),
		)?;

		match &outcome {
			UpsertOutcome::Created(departure) => {
				tracing::info!(id = departure.id, category, "Departure created.");
			},
			UpsertOutcome::Updated(departure) => {
				tracing::debug!(id = departure.id, category, "Departure updated.");
			},
		}

		Ok(crate::to_record(outcome.into_departure()))
	}

	fn validate_sync(&self, category: &str, restricted_items: &str) -> Result<()> {
		let limits = &self.cfg.limits;

		if category.is_empty() {
			return Err(Error::InvalidRequest {
				field: "$.category".to_string(),
				message: "category must be non-empty.".to_string(),
			});
		}
		if category.contains('\0') {
			return Err(Error::InvalidRequest {
				field: "$.category".to_string(),
				message: "category must not contain NUL characters.".to_string(),
			});
		}
		if category.chars().count() > limits.max_category_chars {
			return Err(Error::InvalidRequest {
				field: "$.category".to_string(),
				message: format!(
					"category must be at most {} characters.",
					limits.max_category_chars
				),
			});
		}
		if restricted_items.chars().count() > limits.max_restricted_items_chars {
			return Err(Error::InvalidRequest {
				field: "$.restrictedItems".to_string(),
				message: format!(
					"restrictedItems must be at most {} characters.",
					limits.max_restricted_items_chars
				),
			});
		}
		if restricted_items.contains('\0') {
			return Err(Error::InvalidRequest {
				field: "$.restrictedItems".to_string(),
				message: "restrictedItems must not contain NUL characters.".to_string(),
			});
		}

		Ok(())
	}
}

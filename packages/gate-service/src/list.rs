use crate::{DepartureRecord, GateService, Result};

impl GateService {
	/// Every record in creation order. No paging.
	pub async fn list(&self) -> Result<Vec<DepartureRecord>> {
		let departures = self.store.list().await?;

		Ok(departures.into_iter().map(crate::to_record).collect())
	}
}

use std::collections::{BTreeMap, HashMap};

use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
	BoxFuture, DepartureStore, Error, Result,
	models::{ClearOutcome, Departure, UpsertOutcome},
};

/// Process-local store. One lock covers both indexes, so every operation is atomic.
#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
	last_id: i64,
	by_id: BTreeMap<i64, Departure>,
	by_category: HashMap<String, i64>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl MemoryState {
	fn upsert(
		&mut self,
		category: &str,
		restricted_items: &str,
		now: OffsetDateTime,
	) -> Result<UpsertOutcome> {
		if let Some(id) = self.by_category.get(category).copied()
			&& let Some(departure) = self.by_id.get_mut(&id)
		{
			if departure.is_cleared {
				return Err(Error::Conflict(format!(
					"Departure for category {category:?} is cleared."
				)));
			}

			departure.restricted_items = restricted_items.to_string();
			departure.updated_at = now;

			return Ok(UpsertOutcome::Updated(departure.clone()));
		}

		self.last_id += 1;

		let departure = Departure {
			id: self.last_id,
			category: category.to_string(),
			restricted_items: restricted_items.to_string(),
			is_cleared: false,
			created_at: now,
			updated_at: now,
		};

		self.by_category.insert(departure.category.clone(), departure.id);
		self.by_id.insert(departure.id, departure.clone());

		Ok(UpsertOutcome::Created(departure))
	}

	fn clear(&mut self, id: i64, now: OffsetDateTime) -> Result<ClearOutcome> {
		let departure = self
			.by_id
			.get_mut(&id)
			.ok_or_else(|| Error::NotFound(format!("Departure {id} does not exist.")))?;

		if departure.is_cleared {
			return Ok(ClearOutcome::AlreadyCleared(departure.clone()));
		}

		departure.is_cleared = true;
		departure.updated_at = now;

		Ok(ClearOutcome::Cleared(departure.clone()))
	}
}

impl DepartureStore for MemoryStore {
	fn list(&self) -> BoxFuture<'_, Result<Vec<Departure>>> {
		Box::pin(async move {
			let state = self.inner.lock().await;

			Ok(state.by_id.values().cloned().collect())
		})
	}

	fn upsert<'a>(
		&'a self,
		category: &'a str,
		restricted_items: &'a str,
		now: OffsetDateTime,
	) -> BoxFuture<'a, Result<UpsertOutcome>> {
		Box::pin(async move { self.inner.lock().await.upsert(category, restricted_items, now) })
	}

	fn clear(&self, id: i64, now: OffsetDateTime) -> BoxFuture<'_, Result<ClearOutcome>> {
		Box::pin(async move { self.inner.lock().await.clear(id, now) })
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use time::macros::datetime;

	use super::*;

	#[tokio::test]
	async fn first_upsert_creates_and_second_updates() {
		let store = MemoryStore::new();
		let t0 = datetime!(2025-12-31 10:00 UTC);
		let t1 = datetime!(2025-12-31 11:00 UTC);
		let created = store.upsert("Electronics", "old phone", t0).await.expect("upsert");
		let updated = store.upsert("Electronics", "old laptop", t1).await.expect("upsert");

		assert!(matches!(created, UpsertOutcome::Created(_)));
		assert!(matches!(updated, UpsertOutcome::Updated(_)));

		let updated = updated.into_departure();

		assert_eq!(updated.id, 1);
		assert_eq!(updated.restricted_items, "old laptop");
		assert_eq!(updated.created_at, t0);
		assert_eq!(updated.updated_at, t1);
		assert_eq!(store.list().await.expect("list").len(), 1);
	}

	#[tokio::test]
	async fn ids_follow_creation_order() {
		let store = MemoryStore::new();
		let now = datetime!(2025-12-31 10:00 UTC);

		for category in ["Habits", "Electronics", "Grudges"] {
			store.upsert(category, "", now).await.expect("upsert");
		}

		let categories = store
			.list()
			.await
			.expect("list")
			.into_iter()
			.map(|departure| (departure.id, departure.category))
			.collect::<Vec<_>>();

		assert_eq!(
			categories,
			vec![
				(1, "Habits".to_string()),
				(2, "Electronics".to_string()),
				(3, "Grudges".to_string()),
			]
		);
	}

	#[tokio::test]
	async fn clear_is_terminal_and_blocks_upsert() {
		let store = MemoryStore::new();
		let t0 = datetime!(2025-12-31 10:00 UTC);
		let t1 = datetime!(2025-12-31 11:00 UTC);
		let t2 = datetime!(2025-12-31 12:00 UTC);

		store.upsert("Electronics", "old phone", t0).await.expect("upsert");

		let cleared = store.clear(1, t1).await.expect("clear");

		assert!(matches!(cleared, ClearOutcome::Cleared(ref departure) if departure.is_cleared));

		let again = store.clear(1, t2).await.expect("clear again");

		match again {
			ClearOutcome::AlreadyCleared(departure) => assert_eq!(departure.updated_at, t1),
			other => panic!("Unexpected outcome: {other:?}"),
		}

		let err = store.upsert("Electronics", "new phone", t2).await.expect_err("conflict");

		assert!(matches!(err, Error::Conflict(_)), "Unexpected error: {err}");

		let listed = store.list().await.expect("list");

		assert_eq!(listed[0].restricted_items, "old phone");
		assert!(listed[0].is_cleared);
	}

	#[tokio::test]
	async fn clear_unknown_id_is_not_found() {
		let store = MemoryStore::new();
		let err = store.clear(999, datetime!(2025-12-31 10:00 UTC)).await.expect_err("not found");

		assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err}");
		assert!(store.list().await.expect("list").is_empty());
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_upserts_share_one_record() {
		let store = Arc::new(MemoryStore::new());
		let now = datetime!(2025-12-31 10:00 UTC);
		let mut handles = Vec::new();

		for i in 0..32 {
			let store = Arc::clone(&store);

			handles.push(tokio::spawn(async move {
				store.upsert("Electronics", &format!("item {i}"), now).await.map(|_| ())
			}));
		}
		for handle in handles {
			handle.await.expect("join").expect("upsert");
		}

		let listed = store.list().await.expect("list");

		assert_eq!(listed.len(), 1);
		assert_eq!(listed[0].id, 1);
	}
}

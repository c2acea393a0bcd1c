use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Departure {
	pub id: i64,
	pub category: String,
	pub restricted_items: String,
	pub is_cleared: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
	Created(Departure),
	Updated(Departure),
}
impl UpsertOutcome {
	pub fn departure(&self) -> &Departure {
		match self {
			Self::Created(departure) | Self::Updated(departure) => departure,
		}
	}

	pub fn into_departure(self) -> Departure {
		match self {
			Self::Created(departure) | Self::Updated(departure) => departure,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClearOutcome {
	Cleared(Departure),
	/// The record was already cleared; nothing was written.
	AlreadyCleared(Departure),
}
impl ClearOutcome {
	pub fn into_departure(self) -> Departure {
		match self {
			Self::Cleared(departure) | Self::AlreadyCleared(departure) => departure,
		}
	}
}

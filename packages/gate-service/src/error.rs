pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request at {field}: {message}")]
	InvalidRequest { field: String, message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<gate_storage::Error> for Error {
	fn from(err: gate_storage::Error) -> Self {
		match err {
			gate_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			gate_storage::Error::NotFound(message) => Self::NotFound { message },
			gate_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}

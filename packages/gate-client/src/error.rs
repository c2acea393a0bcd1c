pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Transport failure: {message}")]
	Transport { message: String },
	#[error("Response from {operation} does not match the expected schema.")]
	SchemaViolation { operation: &'static str, source: serde_json::Error },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		Self::Transport { message: err.to_string() }
	}
}

use std::time::Duration as StdDuration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{BoxFuture, DepartureApi, DepartureRecord, Error, Result, SyncRequest};

const DEPARTURES_PATH: &str = "/api/departures";

#[derive(Deserialize)]
struct ErrorBody {
	message: String,
}

/// Talks to the departure API over HTTP.
///
/// The underlying client keeps a cookie store, so session cookies set by the server ride along
/// on every later request.
#[derive(Clone, Debug)]
pub struct HttpClient {
	api_base: String,
	client: Client,
}
impl HttpClient {
	pub fn new(cfg: &gate_config::Client) -> Result<Self> {
		let client = Client::builder()
			.cookie_store(true)
			.timeout(StdDuration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self { api_base: cfg.api_base.trim_end_matches('/').to_string(), client })
	}

	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	async fn list_departures(&self) -> Result<Vec<DepartureRecord>> {
		let url = format!("{}{DEPARTURES_PATH}", self.api_base);
		let res = self.client.get(url).send().await?;

		decode(res, "list").await
	}

	async fn sync_departure(&self, req: &SyncRequest) -> Result<DepartureRecord> {
		let url = format!("{}{DEPARTURES_PATH}", self.api_base);
		let res = self.client.post(url).json(req).send().await?;

		decode(res, "sync").await
	}

	async fn clear_departure(&self, id: i64) -> Result<DepartureRecord> {
		let url = format!("{}{DEPARTURES_PATH}/{id}/clear", self.api_base);
		let res = self.client.post(url).send().await?;

		decode(res, "clear").await
	}
}

impl DepartureApi for HttpClient {
	fn list(&self) -> BoxFuture<'_, Result<Vec<DepartureRecord>>> {
		Box::pin(self.list_departures())
	}

	fn sync<'a>(&'a self, req: &'a SyncRequest) -> BoxFuture<'a, Result<DepartureRecord>> {
		Box::pin(self.sync_departure(req))
	}

	fn clear(&self, id: i64) -> BoxFuture<'_, Result<DepartureRecord>> {
		Box::pin(self.clear_departure(id))
	}
}

async fn decode<T>(res: Response, operation: &'static str) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = res.status();
	let body = res.bytes().await?;

	if !status.is_success() {
		return Err(status_error(status, &body, operation));
	}

	serde_json::from_slice(&body).map_err(|source| Error::SchemaViolation { operation, source })
}

fn status_error(status: StatusCode, body: &[u8], operation: &str) -> Error {
	let message = serde_json::from_slice::<ErrorBody>(body)
		.map(|body| body.message)
		.unwrap_or_else(|_| format!("{operation} failed with status {status}."));

	// Only a clear names a record by id; a 404 anywhere else means a wrong route or base URL.
	match status {
		StatusCode::NOT_FOUND if operation == "clear" => Error::NotFound { message },
		StatusCode::CONFLICT => Error::Conflict { message },
		StatusCode::UNPROCESSABLE_ENTITY => Error::InvalidRequest { message },
		_ => Error::Transport { message },
	}
}

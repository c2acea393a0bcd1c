use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub limits: Limits,
	pub security: Security,
	pub client: Option<Client>,
}

/// The slice of a config file a client needs. Server sections are ignored when present.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
	pub client: Option<Client>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub backend: StorageBackend,
	/// Required when `backend = "postgres"`.
	pub postgres: Option<Postgres>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
	Postgres,
	/// Process-local map. Records do not survive a restart.
	Memory,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Limits {
	pub max_category_chars: usize,
	pub max_restricted_items_chars: usize,
}
impl Default for Limits {
	fn default() -> Self {
		Self { max_category_chars: 64, max_restricted_items_chars: 4_096 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Client {
	pub api_base: String,
	#[serde(default = "default_client_timeout_ms")]
	pub timeout_ms: u64,
}

fn default_client_timeout_ms() -> u64 {
	5_000
}

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Client, ClientConfig, Config, Limits, Postgres, Security, Service, Storage, StorageBackend};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = read(path)?;

	parse(&raw).map_err(|err| with_path(err, path))
}

/// Loads only the `[client]` section, so a client can share a file with the server or use a
/// file that holds nothing else.
pub fn load_client(path: &Path) -> Result<Client> {
	let raw = read(path)?;

	parse_client(&raw).map_err(|err| with_path(err, path))
}

pub fn parse_client(raw: &str) -> Result<Client> {
	let cfg: ClientConfig = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;
	let mut client = cfg.client.ok_or_else(|| Error::Validation {
		message: "client section is required.".to_string(),
	})?;

	normalize_client(&mut client);

	validate_client(&client)?;

	Ok(client)
}

/// Parses, normalizes, and validates a config document held in memory.
pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	match (cfg.storage.backend, cfg.storage.postgres.as_ref()) {
		(StorageBackend::Postgres, None) => {
			return Err(Error::Validation {
				message: "storage.postgres is required when storage.backend is postgres."
					.to_string(),
			});
		},
		(StorageBackend::Postgres, Some(postgres)) => {
			if postgres.dsn.trim().is_empty() {
				return Err(Error::Validation {
					message: "storage.postgres.dsn must be non-empty.".to_string(),
				});
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::Validation {
					message: "storage.postgres.pool_max_conns must be greater than zero."
						.to_string(),
				});
			}
		},
		(StorageBackend::Memory, _) => {},
	}

	if cfg.limits.max_category_chars == 0 {
		return Err(Error::Validation {
			message: "limits.max_category_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.limits.max_restricted_items_chars == 0 {
		return Err(Error::Validation {
			message: "limits.max_restricted_items_chars must be greater than zero.".to_string(),
		});
	}

	if let Some(client) = cfg.client.as_ref() {
		validate_client(client)?;
	}

	Ok(())
}

pub fn validate_client(client: &Client) -> Result<()> {
	let api_base = client.api_base.as_str();

	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "client.api_base must start with http:// or https://.".to_string(),
		});
	}
	if client.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "client.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn read(path: &Path) -> Result<String> {
	fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })
}

fn with_path(err: Error, path: &Path) -> Error {
	match err {
		Error::ParseConfig { source, .. } =>
			Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	}
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if let Some(client) = cfg.client.as_mut() {
		normalize_client(client);
	}
}

fn normalize_client(client: &mut Client) {
	client.api_base = client.api_base.trim().trim_end_matches('/').to_string();
}

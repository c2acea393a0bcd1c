use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use gate_client::{CachedDepartures, HttpClient, SyncRequest};

#[derive(Debug, Parser)]
#[command(
	version = gate_cli::VERSION,
	rename_all = "kebab",
	styles = gate_cli::styles(),
)]
pub struct Args {
	/// Config file. Only its `[client]` section is read.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Overrides `client.api_base` from the config file.
	#[arg(long, value_name = "URL")]
	pub api_base: Option<String>,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Print every departure record.
	List,
	/// Create or update the record for a category, then print the refreshed list.
	Sync {
		#[arg(long)]
		category: String,
		#[arg(long = "items", value_name = "TEXT", default_value = "")]
		restricted_items: String,
	},
	/// Mark a record cleared, then print the refreshed list.
	Clear { id: i64 },
}

pub async fn run(args: Args) -> Result<()> {
	init_tracing()?;

	let mut client_cfg = gate_config::load_client(&args.config)?;

	if let Some(api_base) = args.api_base {
		client_cfg.api_base = api_base;
	}

	let departures = CachedDepartures::new(HttpClient::new(&client_cfg)?);

	match args.command {
		Command::List => {},
		Command::Sync { category, restricted_items } => {
			let record = departures.sync(&SyncRequest { category, restricted_items }).await?;

			println!("{}", serde_json::to_string_pretty(&record)?);
		},
		Command::Clear { id } => {
			let record = departures.clear(id).await?;

			println!("{}", serde_json::to_string_pretty(&record)?);
		},
	}

	let listed = departures.list().await?;

	tracing::debug!(source = ?listed.source, "Loaded departures.");
	println!("{}", serde_json::to_string_pretty(&listed.data)?);

	Ok(())
}

// Reads `RUST_LOG`; stdout carries the JSON output, so logs stay quiet by default.
fn init_tracing() -> Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|err| eyre::eyre!("Failed to initialize tracing: {err}"))?;

	Ok(())
}

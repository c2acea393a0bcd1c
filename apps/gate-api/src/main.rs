use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = gate_api::Args::parse();
	gate_api::run(args).await
}

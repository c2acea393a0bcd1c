use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = gate_ctl::Args::parse();
	gate_ctl::run(args).await
}

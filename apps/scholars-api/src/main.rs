use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = scholars_api::Args::parse();

	scholars_api::run(args).await
}

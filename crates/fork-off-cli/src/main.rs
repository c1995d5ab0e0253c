// SPDX-License-Identifier: GPL-3.0

mod fork;
mod style;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, styles=style::get_styles())]
pub struct Cli {
	#[command(flatten)]
	args: fork::ForkArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	fork::Command::execute(&cli.args).await
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}

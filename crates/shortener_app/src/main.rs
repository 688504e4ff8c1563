use std::process::ExitCode;

use clap::Parser;
use shortener_app::platform::{self, cli::Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    platform::run_app(Cli::parse()).await
}

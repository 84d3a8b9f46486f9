//! Main application entry point (native).

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting Chalkboard");

    chalkboard_app::cli::run(chalkboard_app::cli::Cli::parse())
}

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use primdb::{cli::Repl, config::Config, sql::engine::Session};

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "starting primdb");

    let session = Session::new(config.storage());
    let mut repl = Repl::new(session, config.history_path())?;
    repl.run()
}

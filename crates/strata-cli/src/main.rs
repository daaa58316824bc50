use std::io;

use tracing_subscriber::EnvFilter;

mod command;
mod model;
mod util;

fn main() -> anyhow::Result<()> {
    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    command::run()
}

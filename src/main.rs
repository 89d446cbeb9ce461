mod cli;

use clap::Parser;
use cli::Cli;
use redpower::BuildInfo;
use std::io::{stderr, stdout};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

fn init_tracing(debug: bool) {
    // RUST_LOG wins over --debug.
    let default_directives = if debug { "redpower=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let debug = cli.debug;
    init_tracing(debug);

    match cli::run(cli, &BuildInfo::current(), &mut stdout().lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if debug {
                let _ = cli::write_debug_details(&err, &mut stderr().lock());
            }
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

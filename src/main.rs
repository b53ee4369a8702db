use codequal::cli::{Args, Command};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose, args.quiet);

    let command = Command::from_args(args);
    process::exit(command.run());
}

/// Log to stderr; `RUST_LOG` overrides the level picked from the flags
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "codequal=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

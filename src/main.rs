//! chessai request loop entry point.

use clap::Parser;
use chessai::protocol::{run_service_loop, ServiceOptions};
use chessai::Side;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Side used when an engine is built before any `ai` request
    #[arg(short, long, value_enum, default_value_t = Side::Red)]
    side: Side,

    /// Log every command at debug level (to stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let options = ServiceOptions {
        side: args.side,
        ..ServiceOptions::default()
    };

    if let Err(e) = run_service_loop(options) {
        tracing::error!(error = %e, "request loop failed");
        std::process::exit(1);
    }
}

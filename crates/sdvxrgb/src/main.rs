//! sdvxrgb CLI: inspect, edit and test SDVX tape LED color transforms.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

mod cli;

/// Shared shutdown flag, cleared by the Ctrl+C handler.
pub static RUNNING: AtomicBool = AtomicBool::new(true);

#[derive(Parser)]
#[command(
    name = "sdvxrgb-cli",
    version,
    about = "Per-strip color transforms for SDVX tape LEDs"
)]
struct Args {
    /// Output as JSON (for layout, show, preview, capture, profile list, settings)
    #[arg(long, global = true)]
    json: bool,

    /// Transform INI to use instead of the one from settings
    #[arg(long, global = true, value_name = "PATH")]
    ini: Option<PathBuf>,

    /// Log debug messages (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    ctrlc::set_handler(move || {
        RUNNING.store(false, Ordering::SeqCst);
    })
    .ok();

    let ctx = cli::Context::resolve(args.ini);
    if let Err(e) = cli::run(args.command, args.json, &ctx) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

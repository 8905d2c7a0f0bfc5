//! pv-core CLI: load and inspect a chat-application preset.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pv_core::exit_codes::ExitCode;
use pv_core::load::{load, Source};
use pv_core::output::{print_summary, OutputFormat};

/// Inspect a preset from a .json file or an http(s) URL.
///
/// Prints the canonical prompt ordering with resolved names, or a JSON
/// envelope with `--format json`. Diagnostics go to stderr (`RUST_LOG`
/// controls verbosity).
#[derive(Parser, Debug)]
#[command(name = "pv-core", version, about)]
struct Cli {
    /// Path to a preset .json file, or an http(s) URL to fetch
    source: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = Source::parse(&cli.source);

    let code = match load(&source) {
        Ok(loaded) => {
            print_summary(cli.format, &loaded);
            ExitCode::Clean
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(&err)
        }
    };

    std::process::exit(code.as_i32());
}

//! ucon - interactive unit converter
//!
//! Reads requests like `12 mi => ft` from stdin, one per line, until
//! `quit` or end of input. A single request may also be passed on the
//! command line.
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see them.

mod repl;

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use ucon_units::{Catalog, ConvertOptions, Converter, DEFAULT_PRECISION};

use repl::{OutputFormat, Repl, ReplConfig};

#[derive(Parser)]
#[command(name = "ucon")]
#[command(version, about = "Convert between units of length, mass and temperature", long_about = None)]
struct Cli {
    /// Convert a single request (e.g. "12 mi => ft") and exit
    conversion: Option<String>,

    /// Digits after the decimal point
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Print each result or error as a JSON object
    #[arg(long)]
    json: bool,

    /// Skip the startup banner and prompt
    #[arg(short, long)]
    quiet: bool,

    /// Allow metric prefixes on offset units such as kelvin
    #[arg(long)]
    allow_affine_prefix: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let options = ConvertOptions { allow_affine_prefix: cli.allow_affine_prefix };
    let converter = Converter::new(Catalog::standard()).with_options(options);
    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    let interactive = !cli.quiet && format == OutputFormat::Text;

    let config = ReplConfig {
        precision: cli.precision,
        format,
        banner: interactive,
        prompt: interactive && io::stdin().is_terminal(),
    };
    let repl = Repl::new(converter, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(request) = cli.conversion {
        return match repl.convert_one(&request, &mut out).and_then(|ok| out.flush().map(|_| ok)) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                error!(error = %e, "failed to write output");
                ExitCode::FAILURE
            }
        };
    }

    info!(units = Catalog::standard().units().len(), "catalog loaded");

    let stdin = io::stdin();
    match repl.run(stdin.lock(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "session aborted");
            ExitCode::FAILURE
        }
    }
}

//! Line-oriented conversion session

use std::io::{self, BufRead, Write};
use serde_json::json;
use tracing::{debug, info};
use ucon_units::{Catalog, Conversion, ConversionError, Converter, DEFAULT_PRECISION};

pub const HELP: &str = "Convert between units like this: \"12 mi => ft\".\n\
                        Use \"quit\" to exit the program. Also note that\n\
                        metric prefixes are supported on metric units.\n";

const LIST_INTRO: &str = "The following units are supported: ";

/// Wrap the unit list once a line grows past this many columns
const WRAP_AT: usize = 40;

const PROMPT: &str = "> ";
const QUIT: &str = "quit";
const HELP_COMMAND: &str = "help";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Presentation settings for a session
#[derive(Debug, Clone, Copy)]
pub struct ReplConfig {
    /// Digits after the decimal point in text output
    pub precision: usize,
    pub format: OutputFormat,
    /// Print the help banner before the first prompt
    pub banner: bool,
    /// Print "> " before reading each line
    pub prompt: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            precision: DEFAULT_PRECISION,
            format: OutputFormat::Text,
            banner: true,
            prompt: true,
        }
    }
}

/// Counts for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub converted: usize,
    pub failed: usize,
}

/// The comma separated, wrapped list of canonical unit names
pub fn unit_list(catalog: &Catalog) -> String {
    let mut out = String::from(LIST_INTRO);
    let mut length = LIST_INTRO.len();

    for (i, name) in catalog.names().enumerate() {
        if i > 0 {
            out.push(',');
            if length > WRAP_AT {
                out.push('\n');
                length = 0;
            } else {
                out.push(' ');
            }
        }
        out.push_str(name);
        length += name.len() + 2;
    }

    out
}

/// Help text followed by the unit list
pub fn banner(catalog: &Catalog) -> String {
    format!("{}\n{}\n", HELP, unit_list(catalog))
}

pub struct Repl<'c> {
    converter: Converter<'c>,
    config: ReplConfig,
}

impl<'c> Repl<'c> {
    pub fn new(converter: Converter<'c>, config: ReplConfig) -> Self {
        Repl { converter, config }
    }

    /// Convert a single request and write the result or diagnostic
    ///
    /// Returns whether the conversion succeeded.
    pub fn convert_one<W: Write>(&self, line: &str, out: &mut W) -> io::Result<bool> {
        let result = self.converter.convert_line(line.trim());
        if let Err(e) = &result {
            debug!(line, error = %e, "conversion failed");
        }
        self.write_result(&result, out)?;
        Ok(result.is_ok())
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> io::Result<SessionStats> {
        let mut stats = SessionStats::default();

        if self.config.banner {
            writeln!(out, "{}", banner(self.converter.catalog()))?;
        }

        info!("session started");
        let mut buf = Vec::new();
        loop {
            if self.config.prompt {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                debug!("end of input");
                break;
            }

            // Bytes that are not UTF-8 become U+FFFD; the line is still handled
            let line = String::from_utf8_lossy(&buf);
            let request = line.trim();
            if request.is_empty() {
                continue;
            }
            if request == QUIT {
                break;
            }
            if request == HELP_COMMAND {
                writeln!(out, "{}", banner(self.converter.catalog()))?;
                continue;
            }

            if self.convert_one(request, out)? {
                stats.converted += 1;
            } else {
                stats.failed += 1;
            }
            out.flush()?;
        }

        info!(converted = stats.converted, failed = stats.failed, "session finished");
        Ok(stats)
    }

    fn write_result<W: Write>(
        &self,
        result: &Result<Conversion, ConversionError>,
        out: &mut W,
    ) -> io::Result<()> {
        match (self.config.format, result) {
            (OutputFormat::Text, Ok(c)) => writeln!(out, "{}", c.format(self.config.precision)),
            (OutputFormat::Text, Err(e)) => writeln!(out, "{}", e),
            (OutputFormat::Json, Ok(c)) => {
                serde_json::to_writer(&mut *out, c)?;
                writeln!(out)
            }
            (OutputFormat::Json, Err(e)) => {
                serde_json::to_writer(&mut *out, &json!({ "error": e.to_string() }))?;
                writeln!(out)
            }
        }
    }
}

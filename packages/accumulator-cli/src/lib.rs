/**
 * Message Accumulator CLI
 *
 * Option loading, console diagnostics and the commands behind `msgacc`
 */
use anyhow::{Context, Result};
use message_accumulator::{
    AccumulatorOptions, DiagnosticSink, Fragment, LogLevel, MessageAccumulator,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

/// Metadata type used on the command line; messages come without a source,
/// so every extra stays unset.
pub type CliAccumulator = MessageAccumulator<Value>;

/// Writes diagnostics to stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    level: LogLevel,
}

impl ConsoleSink {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn for_verbosity(verbose: bool) -> Self {
        Self::new(if verbose { LogLevel::Debug } else { LogLevel::Warn })
    }
}

impl DiagnosticSink for ConsoleSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        if self.is_enabled(LogLevel::Debug) {
            eprintln!("[DEBUG] {}", msg);
        }
    }

    fn info(&self, msg: &str) {
        if self.is_enabled(LogLevel::Info) {
            eprintln!("[INFO] {}", msg);
        }
    }

    fn warn(&self, msg: &str) {
        if self.is_enabled(LogLevel::Warn) {
            eprintln!("[WARN] {}", msg);
        }
    }

    fn error(&self, msg: &str) {
        if self.is_enabled(LogLevel::Error) {
            eprintln!("[ERROR] {}", msg);
        }
    }
}

/// Parse `AccumulatorOptions` from JSON; missing fields take their defaults
pub fn parse_options(json: &str) -> Result<AccumulatorOptions> {
    let options = serde_json::from_str(json).context("invalid accumulator options")?;
    Ok(options)
}

/// Options from a JSON file, or the defaults when no file is given
pub fn load_options(path: Option<&Path>) -> Result<AccumulatorOptions> {
    let Some(path) = path else {
        return Ok(AccumulatorOptions::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    parse_options(&json).with_context(|| format!("in {}", path.display()))
}

/// The message argument itself, or stdin when it is `-`
pub fn read_message(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut message = String::new();
    io::stdin()
        .read_to_string(&mut message)
        .context("failed to read message from stdin")?;
    Ok(message)
}

fn accumulate(
    message: &str,
    options: &AccumulatorOptions,
    sink: Arc<dyn DiagnosticSink>,
) -> CliAccumulator {
    let mut ma = CliAccumulator::with_options(options.clone()).with_sink(sink);
    ma.append_parsed(message, None);
    ma
}

/// Output of the `minimize` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimizeReport {
    pub string: String,
    pub minimal: String,
    pub prefix: Vec<Fragment<Value>>,
    pub suffix: Vec<Fragment<Value>>,
}

/// Canonical serialization of a tagged message
pub fn run_parse(message: &str, options: &AccumulatorOptions, sink: Arc<dyn DiagnosticSink>) -> String {
    accumulate(message, options, sink).get_string()
}

pub fn run_minimize(
    message: &str,
    options: &AccumulatorOptions,
    sink: Arc<dyn DiagnosticSink>,
) -> MinimizeReport {
    let mut ma = accumulate(message, options, sink);
    let string = ma.get_string();
    let minimal = ma.get_minimal_string();
    MinimizeReport {
        string,
        minimal,
        prefix: ma.get_prefix().to_vec(),
        suffix: ma.get_suffix().to_vec(),
    }
}

/// Non-whitespace length of the message's text content
pub fn run_length(message: &str, options: &AccumulatorOptions, sink: Arc<dyn DiagnosticSink>) -> usize {
    accumulate(message, options, sink).get_text_length()
}

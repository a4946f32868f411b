//! Subscriber setup for the command-line tool. Events go to stderr so that
//! stdout carries only command output.

use std::fmt;
use std::io;

use clap::ValueEnum;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    Compact,
    /// Multi-line, human oriented.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(level: LogLevel, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Compact => registry
            .with(tracing_fmt::layer().compact().with_writer(io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_fmt::layer().pretty().with_writer(io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_fmt::layer().json().with_writer(io::stderr))
            .try_init(),
    };
    let _ = result;
}

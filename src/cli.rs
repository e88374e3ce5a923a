//! Command line interface and its conversion into library configuration.

use clap::{ArgAction, Parser};

use crate::endpoint::{
    DEFAULT_CLASS_NAME, DEFAULT_MESSAGE_NAME, DEFAULT_WINDOW_NAME, EndpointConfig,
};

/// Maximum log level selected on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(
    version,
    about = concat!(
        env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"),
        " - Open a message-only window endpoint and exchange registered window messages with another process.",
    )
)]
pub struct Cli {
    #[arg(long = "message-name", alias = "message", default_value = DEFAULT_MESSAGE_NAME)]
    /// Window message name shared with the counterpart application.
    pub message_name: String,
    #[arg(long = "class-name", alias = "class", default_value = DEFAULT_CLASS_NAME)]
    /// Window class registered for the endpoint window.
    pub class_name: String,
    #[arg(long = "window-name", alias = "title", default_value = DEFAULT_WINDOW_NAME)]
    /// Name given to the endpoint window.
    pub window_name: String,
    #[arg(long = "announce")]
    /// Broadcast the registered message with the endpoint handle once the window exists.
    pub announce: bool,
    /// Increase verbosity (-v=debug, -vv=trace). Overrides RUST_LOG.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
    /// Quiet mode: only warnings and errors. Overrides -v and RUST_LOG.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Level forced by flags; `-q` wins over `-v`. `None` defers to `RUST_LOG`.
    pub fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            Some(LogLevel::Warn)
        } else {
            match self.verbose {
                0 => None,
                1 => Some(LogLevel::Debug),
                _ => Some(LogLevel::Trace),
            }
        }
    }

    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig {
            message_name: self.message_name.clone(),
            class_name: self.class_name.clone(),
            window_name: self.window_name.clone(),
        }
    }
}

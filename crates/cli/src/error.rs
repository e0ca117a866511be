//! CLI errors with distinct exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (bad config, bad dimensions)
//! - 11: I/O error (seed file read, PNG write)
//! - 12: input error (bad JSON params, bad seed file contents)
//! - 13: serialization error

use metaballs_core::MetaballError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The simulation rejected its configuration.
    Simulation(MetaballError),
    /// Reading or writing a file failed.
    Io(String),
    /// User-supplied input could not be understood.
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<MetaballError> for CliError {
    fn from(e: MetaballError) -> Self {
        match e {
            MetaballError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

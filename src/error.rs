// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::application::port::TransportError;
use crate::grid::GridError;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Json(String),
    Grid(GridError),
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Json(e) => write!(f, "JSON Error: {}", e),
            Error::Grid(e) => write!(f, "Grid Error: {}", e),
            Error::Transport(e) => write!(f, "Transport Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Error::Grid(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Transport(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for gridpath

use crate::node::Node;
use thiserror::Error;

/// Errors raised while building or mutating the grid graph, placing
/// obstacles, or loading configuration.
///
/// An unreachable goal is not an error: the search reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimension {width}x{height}: both sides must be at least 1")]
    InvalidDimension { width: i32, height: i32 },

    #[error("no edge between {0} and {1}")]
    EdgeNotFound(Node, Node),

    #[error("{0} is not a grid cell of this graph")]
    PositionNotInGraph(Node),

    #[error("unknown direction tag '{0}'")]
    UnknownDirection(String),

    #[error("speed {speed} does not match direction {direction}: speed 0 requires 'none' and vice versa")]
    InvalidMotion { speed: u32, direction: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<toml::de::Error> for GridError {
    fn from(e: toml::de::Error) -> Self {
        GridError::Config(e.to_string())
    }
}

impl From<std::io::Error> for GridError {
    fn from(e: std::io::Error) -> Self {
        GridError::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridError>;

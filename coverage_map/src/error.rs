// THEORY:
// Every failure the engine can report lives here. The split follows the stage
// that detects it: parsing a color key, building a legend, probing a buffer,
// running a batch, and reading configuration. Only the "no legend color nearby"
// outcome is not an error; it is a `Resolution` variant the caller must handle.

use crate::core_modules::color_key::ColorKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorKeyError {
    #[error("expected 4 color channels, found {found}")]
    ChannelCount { found: usize },

    #[error("channel {index} is not an integer: {value:?}")]
    NotAnInteger { index: usize, value: String },

    #[error("channel {index} is outside 0..=255: {value}")]
    OutOfRange { index: usize, value: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("a {width}x{height} RGBA buffer needs {expected} bytes, got {found}")]
    Length {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Color(#[from] ColorKeyError),
}

#[derive(Error, Debug)]
pub enum LegendError {
    #[error("malformed legend key {key:?}: {source}")]
    MalformedEntry {
        key: String,
        #[source]
        source: ColorKeyError,
    },

    #[error("color {0} is registered more than once")]
    DuplicateColor(ColorKey),

    #[error("swatch has no pixels")]
    EmptySwatch,

    #[error("legend JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("query ({x}, {y}) is outside the {width}x{height} pixel buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("event {matchup:?} has no broadcast day")]
    MissingWeekday { matchup: String },

    #[error("event {matchup:?} has unknown broadcast day {day:?}")]
    UnknownWeekday { matchup: String, day: String },

    #[error("map {map:?} could not be resolved: {source}")]
    Resolve {
        map: String,
        #[source]
        source: ResolveError,
    },

    #[error("resolution worker failed: {0}")]
    Worker(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidInteger { var: &'static str, value: String },

    #[error("{var} must be \"manhattan\" or \"chebyshev\", got {value:?}")]
    InvalidMetric { var: &'static str, value: String },
}

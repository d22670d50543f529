//! Error types for clicktrader.

use crate::trade::TradeStep;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for clicktrader.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors outside the coordinate store (log directory, settings file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The coordinate store could not be read.
    #[error("error reading config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The coordinate store is not valid JSON of the expected shape.
    #[error("error parsing config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The coordinate store could not be written.
    #[error("error writing config file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file or environment errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or out-of-range trade parameter.
    #[error("{0}")]
    Validation(String),

    /// Account string matches none of the known accounts.
    #[error("unknown account type: {0}")]
    UnknownAccount(String),

    /// Action is neither buy nor sell.
    #[error("invalid action: {0}, must be 'buy' or 'sell'")]
    InvalidAction(String),

    /// Order type is neither market nor limit.
    #[error("invalid order type: {0}, must be 'market' or 'limit'")]
    InvalidOrderType(String),

    /// A required anchor is absent or does not have exactly two components.
    #[error("invalid coordinates for {label}: {reason}")]
    InvalidAnchor { label: String, reason: String },

    /// The input-injection backend reported a failure.
    #[error("input injection failed: {0}")]
    Injection(String),

    /// The global event listener could not be started.
    #[error("event listener error: {0}")]
    Listener(String),

    /// The operator interrupted a recording session.
    #[error("recording aborted by operator")]
    Aborted,

    /// A trade step failed.
    #[error("error {}: {source}", .step.activity())]
    Step {
        step: TradeStep,
        #[source]
        source: Box<Error>,
    },

    /// One repetition of a batch failed.
    #[error("failed at repeat {index}/{total}: {source}")]
    Repetition {
        index: u32,
        total: u32,
        #[source]
        source: Box<Error>,
    },
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Flat classification of an error, looking through step and repetition wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    ConfigRead,
    ConfigParse,
    ConfigWrite,
    Config,
    Validation,
    UnknownAccount,
    InvalidAction,
    InvalidOrderType,
    InvalidAnchor,
    Injection,
    Listener,
    Aborted,
}

impl Error {
    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new injection error.
    pub fn injection(msg: impl Into<String>) -> Self {
        Self::Injection(msg.into())
    }

    /// Create a new listener error.
    pub fn listener(msg: impl Into<String>) -> Self {
        Self::Listener(msg.into())
    }

    /// Create a new invalid anchor error.
    pub fn invalid_anchor(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAnchor {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Wrap this error with the trade step that produced it.
    pub fn in_step(self, step: TradeStep) -> Self {
        Self::Step {
            step,
            source: Box::new(self),
        }
    }

    /// Wrap this error with the batch repetition that produced it.
    pub fn in_repetition(self, index: u32, total: u32) -> Self {
        Self::Repetition {
            index,
            total,
            source: Box::new(self),
        }
    }

    /// The innermost error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::ConfigRead { .. } => ErrorKind::ConfigRead,
            Self::ConfigParse { .. } => ErrorKind::ConfigParse,
            Self::ConfigWrite { .. } => ErrorKind::ConfigWrite,
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) => ErrorKind::Validation,
            Self::UnknownAccount(_) => ErrorKind::UnknownAccount,
            Self::InvalidAction(_) => ErrorKind::InvalidAction,
            Self::InvalidOrderType(_) => ErrorKind::InvalidOrderType,
            Self::InvalidAnchor { .. } => ErrorKind::InvalidAnchor,
            Self::Injection(_) => ErrorKind::Injection,
            Self::Listener(_) => ErrorKind::Listener,
            Self::Aborted => ErrorKind::Aborted,
            Self::Step { source, .. } | Self::Repetition { source, .. } => source.kind(),
        }
    }

    /// The trade step that failed, if this error came out of the sequencer.
    pub fn failed_step(&self) -> Option<TradeStep> {
        match self {
            Self::Step { step, .. } => Some(*step),
            Self::Repetition { source, .. } => source.failed_step(),
            _ => None,
        }
    }

    /// The batch repetition that failed, if any.
    pub fn failed_repetition(&self) -> Option<u32> {
        match self {
            Self::Repetition { index, .. } => Some(*index),
            _ => None,
        }
    }
}

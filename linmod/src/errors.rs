//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = LinmodError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum LinmodError {
    InvalidCorpus(InvalidCorpusError),
    InvalidModel(InvalidModelError),
    InvalidArgument(InvalidArgumentError),
    CastError(std::num::TryFromIntError),
    SerdeError(serde_json::Error),
    IOError(std::io::Error),
}

impl LinmodError {
    pub(crate) fn invalid_corpus<S>(line: usize, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidCorpus(InvalidCorpusError {
            line,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for LinmodError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidCorpus(e) => e.fmt(f),
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::CastError(e) => e.fmt(f),
            Self::SerdeError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for LinmodError {}

/// Error used when a corpus line is malformed.
#[derive(Debug)]
pub struct InvalidCorpusError {
    /// 1-based line number.
    pub(crate) line: usize,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidCorpusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidCorpusError: line {}: {}", self.line, self.msg)
    }
}

impl Error for InvalidCorpusError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::num::TryFromIntError> for LinmodError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::CastError(error)
    }
}

impl From<serde_json::Error> for LinmodError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerdeError(error)
    }
}

impl From<std::io::Error> for LinmodError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}

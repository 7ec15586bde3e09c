//! All error types for the stringkit crate.
//!
//! [`Error`] is the only error a caller of the parsers sees. It always names the
//! file it came from. Problems hit while recovering comments never reach this
//! type; see [`crate::scanner`].

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The catalog file could not be read at all.
    #[error("failed to load `{}`: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but are not a string-to-string property document.
    #[error("failed to decode `{}`: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("table `{table}` is defined by both `{}` and `{}`", .first.display(), .second.display())]
    DuplicateTable {
        table: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("unsupported file `{}`", .0.display())]
    UnsupportedFile(PathBuf),
}

impl Error {
    /// The file this error refers to.
    ///
    /// For [`Error::DuplicateTable`] this is the file that clashed with an
    /// already parsed table.
    pub fn path(&self) -> &Path {
        match self {
            Error::Load { path, .. } | Error::Decode { path, .. } => path,
            Error::DuplicateTable { second, .. } => second,
            Error::UnsupportedFile(path) => path,
        }
    }
}

/// Reasons the structured decode of a catalog can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bytes are not valid {encoding} text")]
    InvalidEncoding { encoding: &'static str },

    #[error("invalid binary property list: {0}")]
    Binary(String),

    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: String,
    },

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error("XML parse error: {0}")]
    Xml(String),
}

impl DecodeError {
    pub(crate) fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        DecodeError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

//! Error types shared by the goal engine.

use std::path::PathBuf;

/// Everything that can go wrong while driving a [`crate::QuestManager`].
///
/// None of these are fatal; the manager leaves its state untouched whenever
/// one is returned.
#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("goal selection {index} is out of range (1..={count})")]
    InvalidSelection { index: usize, count: usize },

    #[error("goal selection '{0}' is not a number")]
    NonNumericSelection(String),

    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    #[error("save file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("malformed save data at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("template error: {0}")]
    Template(String),
}

impl QuestError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        QuestError::Malformed {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QuestError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuestError>;

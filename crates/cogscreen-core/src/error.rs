//! Engine error types.
//!
//! User input never produces an error: malformed answers simply score zero.
//! These types cover precondition violations and collaborator failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Stage, Subtest};

/// Errors raised by the session orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An operation was invoked outside the stage it belongs to.
    #[error("{operation} is not valid during the {stage} stage")]
    WrongStage {
        operation: &'static str,
        stage: Stage,
    },

    /// The session already reached the results stage.
    #[error("assessment is complete; restart to begin a new session")]
    AlreadyComplete,
}

impl SessionError {
    pub(crate) fn wrong_stage(operation: &'static str, stage: Stage) -> Self {
        SessionError::WrongStage { operation, stage }
    }
}

/// Errors from a word source.
#[derive(Debug, Error)]
pub enum WordBankError {
    /// The word list could not be read.
    #[error("failed to read word bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The word list contained no usable entries.
    #[error("word bank is empty")]
    Empty,
}

/// Errors for partial scores supplied from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("{subtest} score {value} exceeds maximum {max}")]
    OutOfRange { subtest: Subtest, value: u8, max: u8 },
}

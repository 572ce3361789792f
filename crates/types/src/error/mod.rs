// Path: crates/types/src/error/mod.rs
//! Core error types for the custody ledger.

use crate::app::{BatchId, LifecycleStatus, Role};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to the state store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The provided value was invalid.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// An error occurred during state deserialization.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::WriteError(_) => "STATE_WRITE_ERROR",
            Self::InvalidValue(_) => "STATE_INVALID_VALUE",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Why the caller was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// The user registry does not know the caller.
    UnknownRole,
    /// The caller holds a role, but not the one the operation needs.
    WrongRole {
        /// The role the operation requires.
        required: Role,
        /// The role the caller holds.
        actual: Role,
    },
    /// The caller is not the batch's current custodian.
    NotCustodian,
}

impl core::fmt::Display for Denial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownRole => f.write_str("caller has no registered role"),
            Self::WrongRole { required, actual } => {
                write!(f, "requires role {}, caller is {}", required, actual)
            }
            Self::NotCustodian => f.write_str("caller is not the current custodian"),
        }
    }
}

/// Errors returned by the tracking ledger. A failed call leaves state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A malformed identifier, length, weight or proof size.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Role mismatch or custody mismatch.
    #[error("Unauthorized: {0}")]
    Unauthorized(Denial),
    /// The oracle rejected the proof, or no oracle is configured.
    #[error("Proof not verified: {0}")]
    NotVerified(String),
    /// The batch has never been deposited.
    #[error("Batch {0} not found")]
    NotFound(BatchId),
    /// The batch has already been deposited.
    #[error("Batch {0} already exists")]
    AlreadyExists(BatchId),
    /// The batch is in a terminal state.
    #[error("Batch {batch_id} is {status:?} and admits no further transitions")]
    InvalidState {
        /// The batch that was targeted.
        batch_id: BatchId,
        /// Its current terminal status.
        status: LifecycleStatus,
    },
    /// The batch's history has reached the configured ceiling.
    #[error("History for batch {batch_id} is full ({count} of {ceiling} entries)")]
    CapacityExceeded {
        /// The batch that was targeted.
        batch_id: BatchId,
        /// Its current history count.
        count: u32,
        /// The configured ceiling.
        ceiling: u32,
    },
    /// The oracle is already set, or the ceiling was changed before the oracle.
    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),
    /// A stored record could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The state backend failed or held an undecodable value.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "LEDGER_INVALID_INPUT",
            Self::Unauthorized(_) => "LEDGER_UNAUTHORIZED",
            Self::NotVerified(_) => "LEDGER_NOT_VERIFIED",
            Self::NotFound(_) => "LEDGER_NOT_FOUND",
            Self::AlreadyExists(_) => "LEDGER_ALREADY_EXISTS",
            Self::InvalidState { .. } => "LEDGER_INVALID_STATE",
            Self::CapacityExceeded { .. } => "LEDGER_CAPACITY_EXCEEDED",
            Self::ConfigConflict(_) => "LEDGER_CONFIG_CONFLICT",
            Self::Serialization(_) => "LEDGER_SERIALIZATION_ERROR",
            Self::State(e) => e.code(),
        }
    }
}

/// Errors raised while dispatching a call to a service by method name.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The call parameters could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// The service does not expose the requested method.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    /// The ledger refused the call.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Deserialization(_) => "TX_DESERIALIZATION_ERROR",
            Self::Unsupported(_) => "TX_UNSUPPORTED",
            Self::Ledger(e) => e.code(),
        }
    }
}

impl From<String> for TransactionError {
    fn from(s: String) -> Self {
        TransactionError::Deserialization(s)
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field holds a value the ledger cannot run with.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_errors_keep_their_code_through_the_ledger() {
        let err: LedgerError = StateError::Decode("bad".into()).into();
        assert_eq!(err.code(), "STATE_DECODE_ERROR");
        let tx: TransactionError = err.into();
        assert_eq!(tx.code(), "STATE_DECODE_ERROR");
    }

    #[test]
    fn denial_messages_are_descriptive() {
        let err = LedgerError::Unauthorized(Denial::WrongRole {
            required: Role::Collector,
            actual: Role::Consumer,
        });
        assert_eq!(
            err.to_string(),
            "Unauthorized: requires role collector, caller is consumer"
        );
        assert_eq!(err.code(), "LEDGER_UNAUTHORIZED");
    }

    #[test]
    fn capacity_message_reports_the_boundary() {
        let err = LedgerError::CapacityExceeded {
            batch_id: 9,
            count: 3,
            ceiling: 3,
        };
        assert_eq!(
            err.to_string(),
            "History for batch 9 is full (3 of 3 entries)"
        );
    }
}

//! Error types shared across the gencf crates
//!
//! [`GencfError`] covers the failures that stop a command before any work
//! starts: a bad reporting period or a missing credential. The remaining types
//! describe the outcome of a single call into an external collaborator, so a
//! caller can tell *why* a stage degraded instead of only *that* it did.
//!
//! # Example
//!
//! ```
//! use gencf_core::{GencfResult, MissingCredential, ReportingPeriod};
//!
//! fn key(value: Option<&str>) -> GencfResult<String> {
//!     let key = value.ok_or_else(|| MissingCredential::new("EIA_API_KEY", "eia-api-key"))?;
//!     Ok(key.to_string())
//! }
//!
//! assert!(key(None).is_err());
//! assert!("2025-13".parse::<ReportingPeriod>().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for gencf operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GencfError {
    /// Invalid run settings (reporting period, day count)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A credential required by the requested stage is not set
    #[error(transparent)]
    Credential(#[from] MissingCredential),
}

/// Convenience type alias for Results using GencfError.
pub type GencfResult<T> = Result<T, GencfError>;

/// A stage needs a credential (API key) that is not configured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing credential {name}: set the {name} environment variable or pass --{flag}")]
pub struct MissingCredential {
    /// Environment variable name, e.g. `EIA_API_KEY`
    pub name: String,
    /// Equivalent command-line flag, e.g. `eia-api-key`
    pub flag: String,
}

impl MissingCredential {
    pub fn new(name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag: flag.into(),
        }
    }
}

/// Failure to obtain generation rows from the upstream API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout problems
    #[error("generation API request failed: {0}")]
    Transport(String),
    /// The API answered with a non-200 status
    #[error("generation API returned status {0}")]
    Status(u16),
    /// The body was not the expected JSON envelope
    #[error("could not decode generation API response: {0}")]
    Decode(String),
    /// The envelope decoded but carried no rows
    #[error("generation API returned no rows")]
    Empty,
}

/// Failure to load the plant-attributes reference table.
#[derive(Error, Debug)]
pub enum ReferenceLoadError {
    #[error("reference table not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("malformed reference table: {0}")]
    Malformed(String),
}

/// Failure of one classification batch. The whole batch falls back to its
/// deterministic flags whichever variant is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationFailure {
    /// Connection, DNS, TLS or timeout problems
    #[error("classification request failed: {0}")]
    Transport(String),
    /// The service answered with a non-200 status
    #[error("classification service returned status {0}")]
    Status(u16),
    /// No JSON object could be recovered from the reply
    #[error("unparseable classification reply: {0}")]
    Unparseable(String),
    /// The reply mapped no plants
    #[error("classification reply was empty")]
    Empty,
    /// A plant was given a label outside the accepted label set
    #[error("plant '{plant}' received unknown label '{label}'")]
    UnknownLabel { plant: String, label: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GencfError::Config("invalid reporting month 2025-13".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid reporting month 2025-13"
        );
    }

    #[test]
    fn test_missing_credential_names_variable_and_flag() {
        let err: GencfError = MissingCredential::new("EIA_API_KEY", "eia-api-key").into();
        assert!(matches!(err, GencfError::Credential(_)));
        let text = err.to_string();
        assert!(text.contains("EIA_API_KEY"));
        assert!(text.contains("--eia-api-key"));
    }

    #[test]
    fn test_fetch_status_display() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "generation API returned status 503"
        );
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> Result<(), MissingCredential> {
            Err(MissingCredential::new("DS_API_KEY", "ds-api-key"))
        }

        fn outer() -> GencfResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(GencfError::Credential(_))));
    }
}

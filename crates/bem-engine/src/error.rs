//! Fatal pass errors.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that abort a pass. A pass that fails leaves the entity store untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Missing input: {what}")]
    MissingInput { what: String },

    #[error("There can only be one {what} per pass, got {count}")]
    Cardinality { what: &'static str, count: usize },

    #[error("Invalid {field} for {entity}: {value} ({reason})")]
    Range {
        field: &'static str,
        entity: String,
        value: String,
        reason: String,
    },

    #[error(
        "Input {channel} has more values than there are surfaces ({surfaces}); \
         e.g. 2 surfaces cannot take 3 values"
    )]
    ChannelOverflow {
        channel: &'static str,
        surfaces: usize,
    },

    #[error("Can't find {name} in the {library} library. Add it to the library and try again")]
    UnresolvedReference { library: &'static str, name: String },

    #[error("Failed to add {name} to the {library} library")]
    LibraryRegistration { library: &'static str, name: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(
        "Internal error: {what}. Check that no input is longer than the number of surfaces \
         and try again"
    )]
    Internal { what: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub(crate) fn range(
        field: &'static str,
        entity: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::Range {
            field,
            entity: entity.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(what: impl Into<String>) -> Self {
        EngineError::MissingInput { what: what.into() }
    }
}

//! Error types for populating configuration from environment variables

use crate::schema::LeafKind;

/// Errors returned by [`Populator::populate`](crate::Populator::populate).
///
/// Only [`PresencePolicy::Strict`](crate::PresencePolicy::Strict) produces
/// errors. The first failing field aborts the whole traversal; fields written
/// before it keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    /// A leaf field's environment variable is unset or does not parse.
    ///
    /// The two cases are not distinguished; see [`crate::resolve`].
    #[error(
        "Environment variable '{key}' for field '{field}' is not set or is not a valid {expected}"
    )]
    Missing {
        /// Environment variable that was looked up
        key: String,
        /// Dotted path of the field, e.g. `database.dsn`
        field: String,
        /// Type category the value had to parse as
        expected: LeafKind,
    },

    /// An annotated field cannot be written because it is private to its struct.
    #[error("Field '{field}' is annotated for the environment but is not writable")]
    Unsettable {
        /// Dotted path of the field
        field: String,
        /// Environment key or group prefix on the field, if any
        key: Option<String>,
    },
}

impl PopulateError {
    /// Environment key the caller has to fix, if the error names one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Missing { key, .. } => Some(key),
            Self::Unsettable { key, .. } => key.as_deref(),
        }
    }

    /// Dotted path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field, .. } | Self::Unsettable { field, .. } => field,
        }
    }

    pub(crate) fn missing(
        key: impl Into<String>,
        field: impl Into<String>,
        expected: LeafKind,
    ) -> Self {
        Self::Missing {
            key: key.into(),
            field: field.into(),
            expected,
        }
    }

    pub(crate) fn unsettable(field: impl Into<String>, key: Option<&str>) -> Self {
        Self::Unsettable {
            field: field.into(),
            key: key.map(str::to_string),
        }
    }
}

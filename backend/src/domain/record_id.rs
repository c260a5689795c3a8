//! Store-native record identifiers.
//!
//! Every document in the store (accounts, funds, events) is keyed by a UUID.
//! Request strings are parsed into [`RecordId`] before they reach a port, so
//! malformed identifiers are rejected at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`RecordId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIdError {
    /// Returned when the provided identifier is empty.
    Empty,
    /// Returned when the identifier is not a UUID or carries whitespace padding.
    Invalid,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Invalid => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for RecordIdError {}

/// Identifier of a stored document.
///
/// # Examples
/// ```
/// use civic_backend::domain::RecordId;
///
/// let id = RecordId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(RecordId::new("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(Uuid);

impl RecordId {
    /// Validate and construct a [`RecordId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, RecordIdError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(RecordIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(RecordIdError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| RecordIdError::Invalid)
    }

    /// Construct a [`RecordId`] directly from a UUID.
    #[rustfmt::skip]
    pub const fn from_uuid(uuid: Uuid) -> Self { Self(uuid) }

    /// Generate a new random [`RecordId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[rustfmt::skip]
    pub const fn as_uuid(&self) -> &Uuid { &self.0 }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

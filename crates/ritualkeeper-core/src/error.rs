//! Core error types for ritualkeeper-core.
//!
//! All fallible operations in the library return [`CoreError`] (or a more
//! specific enum that folds into it via `#[from]`).

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for ritualkeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (bad ritual draft, bad goal text, ...)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence-layer failures
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Suggestion-service failures
    #[error("Suggestion error: {0}")]
    Suggest(#[from] SuggestError),

    /// Unknown ritual id
    #[error("Ritual not found: {0}")]
    RitualNotFound(Uuid),

    /// Unknown shop item id
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Item is not in the account's inventory
    #[error("Item '{0}' is not in the inventory")]
    ItemNotOwned(String),

    /// A completion already exists for this ritual and day
    #[error("Ritual already completed for {0}")]
    AlreadyCompleted(NaiveDate),

    /// No completion exists for this ritual and day
    #[error("No completion to undo for {0}")]
    NothingToUndo(NaiveDate),

    /// Purchase attempted without enough essence
    #[error("Insufficient essence: balance {balance}, cost {cost}")]
    InsufficientEssence { balance: i64, cost: i64 },

    /// Restore-streak item used on a ritual with no broken streak on record
    #[error("No broken streak recorded for this ritual")]
    NothingToRestore,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid field value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Required field missing or empty
    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl ValidationError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Persistence-collaborator errors. Writes are all-or-nothing per logical
/// document; a failed save leaves both the previous document and the
/// in-memory state intact.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a logical document
    #[error("Failed to load document '{key}': {message}")]
    LoadFailed { key: String, message: String },

    /// Failed to write a logical document
    #[error("Failed to save document '{key}': {message}")]
    SaveFailed { key: String, message: String },

    /// Document exists but cannot be decoded
    #[error("Document '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Suggestion-service errors. These are expected fallback paths: the
/// ritual-creation flow degrades to a local suggestion list instead of
/// surfacing them to the user.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// No endpoint configured
    #[error("Suggestion service is not configured")]
    NotConfigured,

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Service returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    BadResponse(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

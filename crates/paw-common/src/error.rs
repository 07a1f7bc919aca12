//! Error types for the PawTrack comparison engine.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! Every error is a clean rejection of a single call. The engine holds no
//! persistent state, so there is no fatal/unrecoverable condition of its own;
//! the routing collaborator maps these onto user-facing messages and status
//! codes.
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 11,
//!   "category": "validation",
//!   "message": "too many pets selected: 6 (maximum 5)",
//!   "recoverable": true,
//!   "suggested_action": "adjust_request",
//!   "context": { "count": 6, "max": 5 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for comparison engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request shape errors (cardinality, window bounds, malformed ids).
    Validation,
    /// Ownership resolution errors.
    Authorization,
    /// Observation store access errors.
    Store,
    /// Boundary serialization errors.
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Authorization => write!(f, "authorization"),
            ErrorCategory::Store => write!(f, "store"),
            ErrorCategory::Serialization => write!(f, "serialization"),
        }
    }
}

/// Suggested actions for callers in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Retry the operation (possibly with backoff).
    Retry,
    /// Change the request parameters and resubmit.
    AdjustRequest,
    /// Re-check which pets exist and belong to the caller.
    VerifySelection,
    /// Manual intervention required.
    ManualIntervention,
    /// No action needed (informational).
    None,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::AdjustRequest => write!(f, "adjust_request"),
            SuggestedAction::VerifySelection => write!(f, "verify_selection"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
            SuggestedAction::None => write!(f, "none"),
        }
    }
}

/// Unified error type for the comparison engine.
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors (10-19)
    #[error("too few pets selected: {count} (minimum {min})")]
    TooFewPets { count: usize, min: usize },

    #[error("too many pets selected: {count} (maximum {max})")]
    TooManyPets { count: usize, max: usize },

    #[error("comparison window of {days} days is outside [{min}, {max}]")]
    WindowOutOfRange { days: u32, min: u32, max: u32 },

    #[error("malformed pet id: {0}")]
    MalformedPetId(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    // Authorization errors (20-29)
    #[error("requested {requested} pets but only {resolved} resolved to active owned pets")]
    PetsUnresolved { requested: usize, resolved: usize },

    // Store errors (30-39)
    #[error("observation store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("observation fetch failed for pet {pet_id}: {reason}")]
    FetchFailed { pet_id: String, reason: String },

    // Serialization errors (60-69)
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Validation errors
    /// - 20-29: Authorization errors
    /// - 30-39: Store errors
    /// - 60-69: Serialization errors
    pub fn code(&self) -> u32 {
        match self {
            Error::TooFewPets { .. } => 10,
            Error::TooManyPets { .. } => 11,
            Error::WindowOutOfRange { .. } => 12,
            Error::MalformedPetId(_) => 13,
            Error::InvalidConfig(_) => 14,
            Error::PetsUnresolved { .. } => 20,
            Error::StoreUnavailable(_) => 30,
            Error::FetchFailed { .. } => 31,
            Error::Json(_) => 60,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::TooFewPets { .. }
            | Error::TooManyPets { .. }
            | Error::WindowOutOfRange { .. }
            | Error::MalformedPetId(_)
            | Error::InvalidConfig(_) => ErrorCategory::Validation,

            Error::PetsUnresolved { .. } => ErrorCategory::Authorization,

            Error::StoreUnavailable(_) | Error::FetchFailed { .. } => ErrorCategory::Store,

            Error::Json(_) => ErrorCategory::Serialization,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Recoverable errors may be resolved by:
    /// - Retrying after a transient store outage
    /// - Resubmitting with corrected parameters
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Validation: recoverable by fixing the request
            Error::TooFewPets { .. } => true,
            Error::TooManyPets { .. } => true,
            Error::WindowOutOfRange { .. } => true,
            Error::MalformedPetId(_) => true,
            Error::InvalidConfig(_) => true,

            // Authorization: the pet is gone or was never the caller's
            Error::PetsUnresolved { .. } => false,

            // Store: often transient
            Error::StoreUnavailable(_) => true,
            Error::FetchFailed { .. } => true,

            Error::Json(_) => true,
        }
    }

    /// Returns the suggested action for callers.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::TooFewPets { .. } => SuggestedAction::AdjustRequest,
            Error::TooManyPets { .. } => SuggestedAction::AdjustRequest,
            Error::WindowOutOfRange { .. } => SuggestedAction::AdjustRequest,
            Error::MalformedPetId(_) => SuggestedAction::AdjustRequest,
            Error::InvalidConfig(_) => SuggestedAction::ManualIntervention,

            Error::PetsUnresolved { .. } => SuggestedAction::VerifySelection,

            Error::StoreUnavailable(_) => SuggestedAction::Retry,
            Error::FetchFailed { .. } => SuggestedAction::Retry,

            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::TooFewPets { .. } => {
                "Select at least two pets to compare. Single-pet analytics are on the pet's own page."
            }
            Error::TooManyPets { .. } => {
                "Select at most five pets per comparison and rerun."
            }
            Error::WindowOutOfRange { .. } => {
                "Pick a window within the documented range (1-365 days for comparisons, 7-365 for trends)."
            }
            Error::MalformedPetId(_) => {
                "Pet ids are UUIDs. Re-fetch the pet list and use the ids it returns."
            }
            Error::InvalidConfig(_) => {
                "The engine configuration is inconsistent. Restore the defaults or fix the overridden values."
            }

            Error::PetsUnresolved { .. } => {
                "One or more selected pets no longer exist or belong to another account. Refresh the pet list."
            }

            Error::StoreUnavailable(_) => {
                "The observation store did not respond. Retry shortly; no partial results were produced."
            }
            Error::FetchFailed { .. } => {
                "Fetching one pet's observations failed, so the whole comparison was aborted. Retry the call."
            }

            Error::Json(_) => {
                "Serializing the result failed. Report this with the request parameters attached."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::TooFewPets { .. } => "Too Few Pets Selected",
            Error::TooManyPets { .. } => "Too Many Pets Selected",
            Error::WindowOutOfRange { .. } => "Window Out of Range",
            Error::MalformedPetId(_) => "Malformed Pet Id",
            Error::InvalidConfig(_) => "Invalid Engine Configuration",

            Error::PetsUnresolved { .. } => "Pets Not Found",

            Error::StoreUnavailable(_) => "Observation Store Unavailable",
            Error::FetchFailed { .. } => "Observation Fetch Failed",

            Error::Json(_) => "JSON Serialization Error",
        }
    }
}

/// Structured error response for JSON output.
///
/// Used by the routing collaborator for machine-parseable error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for callers.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., counts, pet id).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        // Add error-specific context
        match err {
            Error::TooFewPets { count, min } => {
                context.insert("count".to_string(), serde_json::json!(count));
                context.insert("min".to_string(), serde_json::json!(min));
            }
            Error::TooManyPets { count, max } => {
                context.insert("count".to_string(), serde_json::json!(count));
                context.insert("max".to_string(), serde_json::json!(max));
            }
            Error::WindowOutOfRange { days, min, max } => {
                context.insert("days".to_string(), serde_json::json!(days));
                context.insert("min".to_string(), serde_json::json!(min));
                context.insert("max".to_string(), serde_json::json!(max));
            }
            Error::PetsUnresolved {
                requested,
                resolved,
            } => {
                context.insert("requested".to_string(), serde_json::json!(requested));
                context.insert("resolved".to_string(), serde_json::json!(resolved));
            }
            Error::FetchFailed { pet_id, .. } => {
                context.insert("pet_id".to_string(), serde_json::json!(pet_id));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::TooFewPets { count: 1, min: 2 }.code(), 10);
        assert_eq!(Error::TooManyPets { count: 6, max: 5 }.code(), 11);
        assert_eq!(
            Error::WindowOutOfRange {
                days: 400,
                min: 1,
                max: 365
            }
            .code(),
            12
        );
        assert_eq!(
            Error::PetsUnresolved {
                requested: 3,
                resolved: 2
            }
            .code(),
            20
        );
        assert_eq!(Error::StoreUnavailable("down".into()).code(), 30);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::MalformedPetId("x".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            Error::PetsUnresolved {
                requested: 2,
                resolved: 1
            }
            .category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            Error::FetchFailed {
                pet_id: "p".into(),
                reason: "timeout".into()
            }
            .category(),
            ErrorCategory::Store
        );
    }

    #[test]
    fn test_error_recoverable() {
        assert!(Error::TooFewPets { count: 0, min: 2 }.is_recoverable());
        assert!(Error::StoreUnavailable("down".into()).is_recoverable());
        assert!(!Error::PetsUnresolved {
            requested: 2,
            resolved: 0
        }
        .is_recoverable());
    }

    #[test]
    fn test_suggested_action() {
        assert_eq!(
            Error::TooManyPets { count: 6, max: 5 }.suggested_action(),
            SuggestedAction::AdjustRequest
        );
        assert_eq!(
            Error::PetsUnresolved {
                requested: 2,
                resolved: 1
            }
            .suggested_action(),
            SuggestedAction::VerifySelection
        );
        assert_eq!(
            Error::StoreUnavailable("down".into()).suggested_action(),
            SuggestedAction::Retry
        );
    }

    #[test]
    fn test_structured_error_from_error() {
        let err = Error::TooManyPets { count: 6, max: 5 };
        let structured = StructuredError::from(&err);

        assert_eq!(structured.code, 11);
        assert_eq!(structured.category, ErrorCategory::Validation);
        assert!(structured.recoverable);
        assert_eq!(structured.suggested_action, SuggestedAction::AdjustRequest);
        assert_eq!(structured.context.get("count"), Some(&serde_json::json!(6)));
        assert_eq!(structured.context.get("max"), Some(&serde_json::json!(5)));
    }

    #[test]
    fn test_structured_error_with_context() {
        let err = Error::StoreUnavailable("timeout".into());
        let structured = StructuredError::from(&err).with_context("attempt", 2);
        assert_eq!(
            structured.context.get("attempt"),
            Some(&serde_json::json!(2))
        );
    }

    #[test]
    fn test_structured_error_json() {
        let err = Error::WindowOutOfRange {
            days: 400,
            min: 1,
            max: 365,
        };
        let structured = StructuredError::from(&err);
        let json = structured.to_json();

        assert!(json.contains(r#""code":12"#));
        assert!(json.contains(r#""category":"validation""#));
        assert!(json.contains(r#""recoverable":true"#));
        assert!(json.contains(r#""suggested_action":"adjust_request""#));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::TooFewPets { count: 1, min: 2 };
        let formatted = format_error_human(&err, false);

        assert!(formatted.contains("Too Few Pets Selected"));
        assert!(formatted.contains("too few pets selected: 1 (minimum 2)"));
        assert!(formatted.contains("at least two pets"));
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::Store.to_string(), "store");
    }

    #[test]
    fn test_suggested_action_display() {
        assert_eq!(SuggestedAction::Retry.to_string(), "retry");
        assert_eq!(
            SuggestedAction::VerifySelection.to_string(),
            "verify_selection"
        );
    }
}

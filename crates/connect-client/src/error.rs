use achievements_core::api::{
    ApiError, ENTITY_ALREADY_EXISTS, LOCALIZATION_DUPLICATE, VENDOR_IDENTIFIER_DUPLICATE,
};
use thiserror::Error;

use crate::types::ErrorObject;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("App Store Connect returned {status}: {}: {}", .error.code(), .error.message())]
    Api { status: u16, error: ErrorObject },

    #[error("Failed to parse response: {source}\n  body: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ConnectError> for ApiError {
    fn from(e: ConnectError) -> Self {
        match e {
            ConnectError::Api { status, error } => classify(status, &error),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Map an App Store Connect error object onto the core error taxonomy.
///
/// Conflicts arrive as generic `*.DUPLICATE` / `*ALREADY_EXISTS` codes; which
/// kind of conflict it is comes from the source pointer or the detail text.
pub fn classify(status: u16, error: &ErrorObject) -> ApiError {
    ApiError::from_code(&canonical_code(status, error), error.message())
}

fn canonical_code(status: u16, error: &ErrorObject) -> String {
    let code = error.code();
    if matches!(
        code,
        VENDOR_IDENTIFIER_DUPLICATE | ENTITY_ALREADY_EXISTS | LOCALIZATION_DUPLICATE
    ) {
        return code.to_string();
    }

    if code.contains("DUPLICATE") || code.contains("ALREADY_EXISTS") {
        let haystack = format!("{} {}", error.pointer(), error.message()).to_lowercase();
        let canonical = if haystack.contains("vendoridentifier")
            || haystack.contains("vendor identifier")
        {
            VENDOR_IDENTIFIER_DUPLICATE
        } else if haystack.contains("locale") || haystack.contains("localization") {
            LOCALIZATION_DUPLICATE
        } else {
            ENTITY_ALREADY_EXISTS
        };
        return canonical.to_string();
    }

    if code.is_empty() {
        format!("HTTP_{status}")
    } else {
        code.to_string()
    }
}

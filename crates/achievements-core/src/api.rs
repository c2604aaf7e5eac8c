use async_trait::async_trait;
use thiserror::Error;

use crate::types::{NewAchievement, NewLocalization, RemoteAchievementRef};

/// Upper bound on a single listing call. Listings are not paged further, so an
/// app with more achievements than this only ever sees the first page.
pub const LIST_LIMIT: usize = 200;

pub const VENDOR_IDENTIFIER_DUPLICATE: &str = "VENDOR_IDENTIFIER_DUPLICATE";
pub const ENTITY_ALREADY_EXISTS: &str = "ENTITY_ALREADY_EXISTS";
pub const LOCALIZATION_DUPLICATE: &str = "LOCALIZATION_DUPLICATE";
pub const TRANSPORT: &str = "TRANSPORT";

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Error returned by every remote operation.
///
/// The three conflict variants are the ones the reconciler recovers from;
/// everything else is carried as `Remote` (the service answered) or
/// `Transport` (it did not, or the answer was unreadable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("vendor identifier already in use: {0}")]
    DuplicateVendorId(String),

    #[error("entity already exists: {0}")]
    AlreadyExists(String),

    #[error("localization already exists: {0}")]
    LocalizationDuplicate(String),

    #[error("{code}: {message}")]
    Remote { code: String, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Classify a canonical remote error code.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            VENDOR_IDENTIFIER_DUPLICATE => ApiError::DuplicateVendorId(message),
            ENTITY_ALREADY_EXISTS => ApiError::AlreadyExists(message),
            LOCALIZATION_DUPLICATE => ApiError::LocalizationDuplicate(message),
            _ => ApiError::Remote {
                code: code.to_string(),
                message,
            },
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &str {
        match self {
            ApiError::DuplicateVendorId(_) => VENDOR_IDENTIFIER_DUPLICATE,
            ApiError::AlreadyExists(_) => ENTITY_ALREADY_EXISTS,
            ApiError::LocalizationDuplicate(_) => LOCALIZATION_DUPLICATE,
            ApiError::Remote { code, .. } => code,
            ApiError::Transport(_) => TRANSPORT,
        }
    }

    /// True for the conflicts a localization create may safely skip.
    pub fn is_localization_conflict(&self) -> bool {
        matches!(
            self,
            ApiError::AlreadyExists(_) | ApiError::LocalizationDuplicate(_)
        )
    }
}

// ---------------------------------------------------------------------------
// AchievementApi
// ---------------------------------------------------------------------------

/// Remote operations the reconciliation engine needs.
///
/// Implementations own transport, authentication and any retry policy.
/// Callers never issue more than one call at a time.
#[async_trait]
pub trait AchievementApi: Send + Sync {
    /// Resolve the achievement-group (Game Center detail) id for an app.
    async fn get_group_id(&self, app_id: &str) -> Result<String, ApiError>;

    async fn create_achievement(
        &self,
        group_id: &str,
        achievement: &NewAchievement,
    ) -> Result<RemoteAchievementRef, ApiError>;

    async fn create_localization(
        &self,
        achievement_id: &str,
        localization: &NewLocalization,
    ) -> Result<(), ApiError>;

    /// List at most `limit` achievements (`limit` is clamped to [`LIST_LIMIT`]).
    async fn list_achievements(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<RemoteAchievementRef>, ApiError>;

    async fn delete_achievement(&self, achievement_id: &str) -> Result<(), ApiError>;
}

//! Converge one desired achievement onto the remote.
//!
//! ```text
//! Creating ──create ok──────────────────────────▶ Resolved ─▶ Localizing ─▶ Done
//!    │                                               ▲
//!    ├─VENDOR_IDENTIFIER_DUPLICATE─▶ list + scan ────┘ (found)
//!    │                                 └────────────▶ Failed (not found / list error)
//!    └─any other error──────────────────────────────▶ Failed
//! ```
//!
//! A rerun of a partially applied batch resumes through the duplicate path:
//! every achievement created last time answers with a vendor-id conflict and
//! is adopted instead of recreated.

use serde::Serialize;
use thiserror::Error;

use crate::api::{AchievementApi, ApiError, LIST_LIMIT};
use crate::cache::GroupIdCache;
use crate::locale;
use crate::types::{DesiredAchievement, DesiredLocalization, NewLocalization, RemoteAchievementRef};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to resolve achievement group: {0}")]
    GroupLookup(#[source] ApiError),

    #[error("failed to create achievement: {0}")]
    Create(#[source] ApiError),

    #[error("duplicate vendor identifier reported but listing failed: {0}")]
    DuplicateLookup(#[source] ApiError),

    #[error("duplicate vendor identifier '{0}' reported but not found")]
    DuplicateNotFound(String),
}

/// How the remote achievement was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Created,
    /// Already existed; adopted after a vendor-id conflict.
    Existing,
}

/// An achievement known to exist remotely. Only [`Reconciler::resolve`]
/// produces one, so localizations cannot be applied to an unresolved item.
#[derive(Debug, Clone)]
pub struct ResolvedAchievement {
    remote: RemoteAchievementRef,
    resolution: Resolution,
}

impl ResolvedAchievement {
    pub fn id(&self) -> &str {
        &self.remote.id
    }

    pub fn remote(&self) -> &RemoteAchievementRef {
        &self.remote
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizationFailure {
    pub locale: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizationStats {
    pub succeeded: usize,
    /// Already present remotely.
    pub skipped: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<LocalizationFailure>,
}

impl LocalizationStats {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub achievement: ResolvedAchievement,
    pub localizations: LocalizationStats,
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

pub struct Reconciler<'a, C: ?Sized> {
    client: &'a C,
    cache: &'a GroupIdCache,
    app_id: &'a str,
}

impl<'a, C> Reconciler<'a, C>
where
    C: AchievementApi + ?Sized,
{
    pub fn new(client: &'a C, cache: &'a GroupIdCache, app_id: &'a str) -> Self {
        Self {
            client,
            cache,
            app_id,
        }
    }

    /// Create or adopt `desired`, then apply its localizations in order.
    pub async fn reconcile(&self, desired: &DesiredAchievement) -> Result<Reconciled, ReconcileError> {
        let achievement = self.resolve(desired).await?;
        let localizations = self
            .apply_localizations(&achievement, &desired.localizations)
            .await;
        Ok(Reconciled {
            achievement,
            localizations,
        })
    }

    /// The Creating step: one create call, plus one listing call when the
    /// vendor identifier is already taken.
    pub async fn resolve(
        &self,
        desired: &DesiredAchievement,
    ) -> Result<ResolvedAchievement, ReconcileError> {
        let group_id = self
            .cache
            .get_or_fetch(self.client, self.app_id)
            .await
            .map_err(ReconcileError::GroupLookup)?;

        match self
            .client
            .create_achievement(group_id, &desired.to_new_achievement())
            .await
        {
            Ok(remote) => {
                tracing::info!(
                    vendor_id = %desired.vendor_identifier,
                    id = %remote.id,
                    "created achievement"
                );
                Ok(ResolvedAchievement {
                    remote,
                    resolution: Resolution::Created,
                })
            }
            Err(ApiError::DuplicateVendorId(_)) => {
                tracing::info!(
                    vendor_id = %desired.vendor_identifier,
                    "achievement already exists, looking it up"
                );
                let remote = self
                    .find_by_vendor_id(group_id, &desired.vendor_identifier)
                    .await?;
                Ok(ResolvedAchievement {
                    remote,
                    resolution: Resolution::Existing,
                })
            }
            Err(e) => Err(ReconcileError::Create(e)),
        }
    }

    async fn find_by_vendor_id(
        &self,
        group_id: &str,
        vendor_identifier: &str,
    ) -> Result<RemoteAchievementRef, ReconcileError> {
        let listed = self
            .client
            .list_achievements(group_id, LIST_LIMIT)
            .await
            .map_err(ReconcileError::DuplicateLookup)?;
        listed
            .into_iter()
            .find(|r| r.vendor_identifier.as_deref() == Some(vendor_identifier))
            .ok_or_else(|| ReconcileError::DuplicateNotFound(vendor_identifier.to_string()))
    }

    /// The Localizing step. Every localization is attempted; none of their
    /// failures propagate.
    pub async fn apply_localizations(
        &self,
        achievement: &ResolvedAchievement,
        localizations: &[DesiredLocalization],
    ) -> LocalizationStats {
        let mut stats = LocalizationStats::default();

        for loc in localizations {
            let normalized = locale::normalize(&loc.locale);
            if !locale::is_valid(normalized) {
                tracing::warn!(
                    input = %loc.locale,
                    locale = %normalized,
                    "locale is not in the accepted list, sending anyway"
                );
            }

            let request = NewLocalization {
                locale: normalized.to_string(),
                name: loc.name.clone(),
                before_earned_description: loc.before_description.clone(),
                after_earned_description: loc.after_description.clone(),
            };

            match self
                .client
                .create_localization(achievement.id(), &request)
                .await
            {
                Ok(()) => {
                    tracing::debug!(id = %achievement.id(), locale = %normalized, "added localization");
                    stats.succeeded += 1;
                }
                Err(e) if e.is_localization_conflict() => {
                    tracing::info!(
                        id = %achievement.id(),
                        locale = %normalized,
                        "localization already exists, skipping"
                    );
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        id = %achievement.id(),
                        locale = %normalized,
                        error = %e,
                        "failed to add localization"
                    );
                    stats.failed += 1;
                    stats.failures.push(LocalizationFailure {
                        locale: normalized.to_string(),
                        code: e.code().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::time::Duration;

use serde::Serialize;

use crate::api::{AchievementApi, ApiError, LIST_LIMIT};
use crate::batch::DEFAULT_PACING;
use crate::cache::GroupIdCache;
use crate::types::RemoteAchievementRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub success_count: usize,
    pub fail_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DeleteFailure>,
}

/// Lists and removes remote achievements.
///
/// Confirmation is the caller's job; by the time [`BulkDeleter::delete_all`]
/// runs, the decision has been made.
pub struct BulkDeleter<'a, C: ?Sized> {
    client: &'a C,
    cache: &'a GroupIdCache,
    app_id: &'a str,
    pacing: Duration,
}

impl<'a, C> BulkDeleter<'a, C>
where
    C: AchievementApi + ?Sized,
{
    pub fn new(client: &'a C, cache: &'a GroupIdCache, app_id: &'a str) -> Self {
        Self {
            client,
            cache,
            app_id,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// One listing call, capped at [`LIST_LIMIT`] items. Anything beyond the
    /// cap is not visible; that is a limit, not an error.
    pub async fn list_all(&self) -> Result<Vec<RemoteAchievementRef>, ApiError> {
        let group_id = self.cache.get_or_fetch(self.client, self.app_id).await?;
        let mut listed = self.client.list_achievements(group_id, LIST_LIMIT).await?;
        if listed.len() > LIST_LIMIT {
            tracing::debug!(returned = listed.len(), "listing exceeded cap, truncating");
            listed.truncate(LIST_LIMIT);
        }
        if listed.len() == LIST_LIMIT {
            tracing::warn!(
                limit = LIST_LIMIT,
                "listing hit the cap; further achievements are not shown"
            );
        }
        Ok(listed)
    }

    /// Delete `refs` in order, one call each, continuing past failures.
    pub async fn delete_all(&self, refs: &[RemoteAchievementRef]) -> DeleteOutcome {
        let mut outcome = DeleteOutcome::default();

        for (i, r) in refs.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            match self.client.delete_achievement(&r.id).await {
                Ok(()) => {
                    tracing::info!(
                        index = i + 1,
                        total = refs.len(),
                        id = %r.id,
                        "deleted achievement"
                    );
                    outcome.success_count += 1;
                }
                Err(e) => {
                    tracing::warn!(id = %r.id, error = %e, "failed to delete achievement");
                    outcome.fail_count += 1;
                    outcome.failures.push(DeleteFailure {
                        id: r.id.clone(),
                        reference_name: r.reference_name.clone(),
                        code: e.code().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        outcome
    }
}

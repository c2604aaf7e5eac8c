use std::time::Duration;

use serde::Serialize;

use crate::api::AchievementApi;
use crate::reconcile::{LocalizationStats, Reconciler, Resolution};
use crate::types::DesiredAchievement;

/// Pause between consecutive remote writes.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemStatus {
    Created { id: String },
    Existing { id: String },
    Failed { reason: String },
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, ItemStatus::Failed { .. })
    }
}

/// What happened to one input item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    /// 1-based position in the input.
    pub index: usize,
    pub total: usize,
    pub name: String,
    pub vendor_identifier: String,
    #[serde(flatten)]
    pub status: ItemStatus,
    pub localizations: LocalizationStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub success_count: usize,
    pub fail_count: usize,
    pub items: Vec<ItemReport>,
}

impl BatchOutcome {
    pub fn localization_success_count(&self) -> usize {
        self.items.iter().map(|i| i.localizations.succeeded).sum()
    }

    pub fn localization_skip_count(&self) -> usize {
        self.items.iter().map(|i| i.localizations.skipped).sum()
    }

    pub fn localization_fail_count(&self) -> usize {
        self.items.iter().map(|i| i.localizations.failed).sum()
    }

    fn record(&mut self, report: ItemReport) {
        if report.status.is_success() {
            self.success_count += 1;
        } else {
            self.fail_count += 1;
        }
        self.items.push(report);
    }
}

/// Drives the [`Reconciler`] over an ordered batch, one item at a time.
pub struct BatchRunner<'a, C: ?Sized> {
    reconciler: Reconciler<'a, C>,
    pacing: Duration,
}

impl<'a, C> BatchRunner<'a, C>
where
    C: AchievementApi + ?Sized,
{
    pub fn new(reconciler: Reconciler<'a, C>) -> Self {
        Self {
            reconciler,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub async fn run_batch(&self, items: &[DesiredAchievement]) -> BatchOutcome {
        self.run_batch_with(items, |_| {}).await
    }

    /// Process every item in input order, calling `on_item` after each one.
    ///
    /// Never returns early: item failures are folded into the outcome.
    pub async fn run_batch_with<F>(&self, items: &[DesiredAchievement], mut on_item: F) -> BatchOutcome
    where
        F: FnMut(&ItemReport),
    {
        let total = items.len();
        let mut outcome = BatchOutcome::default();

        for (i, desired) in items.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            let (status, localizations) = match self.reconciler.reconcile(desired).await {
                Ok(done) => {
                    let id = done.achievement.id().to_string();
                    let status = match done.achievement.resolution() {
                        Resolution::Created => ItemStatus::Created { id },
                        Resolution::Existing => ItemStatus::Existing { id },
                    };
                    (status, done.localizations)
                }
                Err(e) => {
                    tracing::warn!(
                        vendor_id = %desired.vendor_identifier,
                        error = %e,
                        "achievement failed"
                    );
                    (
                        ItemStatus::Failed {
                            reason: e.to_string(),
                        },
                        LocalizationStats::default(),
                    )
                }
            };

            let report = ItemReport {
                index: i + 1,
                total,
                name: desired.name.clone(),
                vendor_identifier: desired.vendor_identifier.clone(),
                status,
                localizations,
            };
            tracing::info!(
                index = report.index,
                total,
                name = %report.name,
                ok = report.status.is_success(),
                localized = report.localizations.succeeded,
                skipped = report.localizations.skipped,
                "batch item done"
            );
            on_item(&report);
            outcome.record(report);
        }

        outcome
    }
}

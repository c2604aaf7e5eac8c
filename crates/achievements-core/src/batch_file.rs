use crate::error::{CoreError, Result};
use crate::locale;
use crate::types::DesiredAchievement;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Game Center's per-app points budget across all achievements.
pub const MAX_TOTAL_POINTS: i64 = 1000;
/// Per-achievement points range Game Center accepts.
pub const POINTS_RANGE: std::ops::RangeInclusive<i64> = 1..=100;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read a batch file: a JSON array of achievements.
pub fn load_batch(path: &Path) -> Result<Vec<DesiredAchievement>> {
    let data = std::fs::read_to_string(path)?;
    parse_batch(&data)
}

pub fn parse_batch(data: &str) -> Result<Vec<DesiredAchievement>> {
    serde_json::from_str(data).map_err(|e| CoreError::InvalidBatch(e.to_string()))
}

// ---------------------------------------------------------------------------
// BatchWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchWarning {
    pub level: WarnLevel,
    /// Vendor identifier of the offending item, when the finding is per-item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_identifier: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl BatchWarning {
    fn item(level: WarnLevel, item: &DesiredAchievement, message: String) -> Self {
        Self {
            level,
            vendor_identifier: Some(item.vendor_identifier.clone()).filter(|v| !v.is_empty()),
            message,
        }
    }
}

/// Offline checks on a parsed batch. Advisory: the remote has the final say.
pub fn lint_batch(items: &[DesiredAchievement]) -> Vec<BatchWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for (i, item) in items.iter().enumerate() {
        let position = i + 1;

        if item.name.trim().is_empty() {
            warnings.push(BatchWarning::item(
                WarnLevel::Error,
                item,
                format!("item {position}: name is empty"),
            ));
        }
        if item.vendor_identifier.trim().is_empty() {
            warnings.push(BatchWarning::item(
                WarnLevel::Error,
                item,
                format!("item {position}: vendorIdentifier is empty"),
            ));
        } else if !seen.insert(item.vendor_identifier.as_str()) {
            warnings.push(BatchWarning::item(
                WarnLevel::Error,
                item,
                format!(
                    "item {position}: vendorIdentifier '{}' appears more than once",
                    item.vendor_identifier
                ),
            ));
        }
        if !POINTS_RANGE.contains(&item.points) {
            warnings.push(BatchWarning::item(
                WarnLevel::Warning,
                item,
                format!(
                    "item {position}: points {} outside {}..={}",
                    item.points,
                    POINTS_RANGE.start(),
                    POINTS_RANGE.end()
                ),
            ));
        }
        if item.localizations.is_empty() {
            warnings.push(BatchWarning::item(
                WarnLevel::Warning,
                item,
                format!("item {position}: no localizations"),
            ));
        }
        for loc in &item.localizations {
            let normalized = locale::normalize(&loc.locale);
            if !locale::is_valid(normalized) {
                warnings.push(BatchWarning::item(
                    WarnLevel::Warning,
                    item,
                    format!(
                        "item {position}: locale '{}' is not an accepted Game Center locale",
                        loc.locale
                    ),
                ));
            }
        }
    }

    let total: i64 = items.iter().map(|i| i.points).sum();
    if total > MAX_TOTAL_POINTS {
        warnings.push(BatchWarning {
            level: WarnLevel::Warning,
            vendor_identifier: None,
            message: format!("total points {total} exceed the {MAX_TOTAL_POINTS}-point app budget"),
        });
    }

    warnings
}

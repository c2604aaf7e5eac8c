use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Desired state (batch file input)
// ---------------------------------------------------------------------------

/// One achievement as declared in a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredAchievement {
    /// Display / reference name.
    pub name: String,
    /// Stable per-app key. Immutable once the achievement exists remotely.
    pub vendor_identifier: String,
    /// Range is enforced by the remote service, not here.
    pub points: i64,
    #[serde(default)]
    pub is_secret: bool,
    #[serde(default)]
    pub can_repeat: bool,
    #[serde(default)]
    pub localizations: Vec<DesiredLocalization>,
}

impl DesiredAchievement {
    /// The create-achievement payload for this record.
    pub fn to_new_achievement(&self) -> NewAchievement {
        NewAchievement {
            reference_name: self.name.clone(),
            vendor_identifier: self.vendor_identifier.clone(),
            points: self.points,
            show_before_earned: !self.is_secret,
            repeatable: self.can_repeat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredLocalization {
    /// Raw input tag, normalized before it is sent.
    pub locale: String,
    pub name: String,
    pub before_description: String,
    pub after_description: String,
}

// ---------------------------------------------------------------------------
// Remote state
// ---------------------------------------------------------------------------

/// An achievement as it exists remotely. Fetched fresh, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAchievementRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

impl RemoteAchievementRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reference_name: None,
            vendor_identifier: None,
            points: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    pub reference_name: String,
    pub vendor_identifier: String,
    pub points: i64,
    pub show_before_earned: bool,
    pub repeatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocalization {
    /// Already normalized.
    pub locale: String,
    pub name: String,
    pub before_earned_description: String,
    pub after_earned_description: String,
}

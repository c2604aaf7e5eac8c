use achievements_core::types::{NewAchievement, NewLocalization, RemoteAchievementRef};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const ACHIEVEMENTS_TYPE: &str = "gameCenterAchievements";
pub const LOCALIZATIONS_TYPE: &str = "gameCenterAchievementLocalizations";
pub const DETAILS_TYPE: &str = "gameCenterDetails";

// ─── Response documents ───────────────────────────────────────────────────

/// Top-level JSON:API document: `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

/// `{"type": "...", "id": "..."}` with any attributes ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AchievementResource {
    pub id: String,
    #[serde(default)]
    pub attributes: AchievementAttributes,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementAttributes {
    pub reference_name: Option<String>,
    pub vendor_identifier: Option<String>,
    pub points: Option<i64>,
    pub show_before_earned: Option<bool>,
    pub repeatable: Option<bool>,
}

impl From<AchievementResource> for RemoteAchievementRef {
    fn from(r: AchievementResource) -> Self {
        RemoteAchievementRef {
            id: r.id,
            reference_name: r.attributes.reference_name,
            vendor_identifier: r.attributes.vendor_identifier,
            points: r.attributes.points,
        }
    }
}

// ─── Error documents ──────────────────────────────────────────────────────

/// `{"errors": [...]}` body returned with every non-2xx response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub source: Option<ErrorSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorSource {
    #[serde(default)]
    pub pointer: Option<String>,
    #[serde(default)]
    pub parameter: Option<String>,
}

impl ErrorObject {
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    /// Best human-readable text: detail, else title, else the code.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_else(|| self.code())
    }

    pub fn pointer(&self) -> &str {
        self.source
            .as_ref()
            .and_then(|s| s.pointer.as_deref())
            .unwrap_or("")
    }
}

// ─── Request bodies ───────────────────────────────────────────────────────

pub fn create_achievement_body(group_id: &str, a: &NewAchievement) -> serde_json::Value {
    json!({
        "data": {
            "type": ACHIEVEMENTS_TYPE,
            "attributes": {
                "referenceName": a.reference_name,
                "vendorIdentifier": a.vendor_identifier,
                "points": a.points,
                "showBeforeEarned": a.show_before_earned,
                "repeatable": a.repeatable,
            },
            "relationships": {
                "gameCenterDetail": {
                    "data": { "type": DETAILS_TYPE, "id": group_id }
                }
            }
        }
    })
}

pub fn create_localization_body(achievement_id: &str, l: &NewLocalization) -> serde_json::Value {
    json!({
        "data": {
            "type": LOCALIZATIONS_TYPE,
            "attributes": {
                "locale": l.locale,
                "name": l.name,
                "beforeEarnedDescription": l.before_earned_description,
                "afterEarnedDescription": l.after_earned_description,
            },
            "relationships": {
                "gameCenterAchievement": {
                    "data": { "type": ACHIEVEMENTS_TYPE, "id": achievement_id }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_achievement_listing() {
        let json = r#"{
            "data": [
                {
                    "type": "gameCenterAchievements",
                    "id": "a1",
                    "attributes": {
                        "referenceName": "First",
                        "vendorIdentifier": "first",
                        "points": 10,
                        "showBeforeEarned": true,
                        "repeatable": false,
                        "archived": false
                    }
                },
                {"type": "gameCenterAchievements", "id": "a2"}
            ],
            "links": {"self": "https://example.invalid"}
        }"#;
        let doc: Document<Vec<AchievementResource>> = serde_json::from_str(json).unwrap();
        let refs: Vec<RemoteAchievementRef> = doc.data.into_iter().map(Into::into).collect();
        assert_eq!(refs[0].vendor_identifier.as_deref(), Some("first"));
        assert_eq!(refs[0].points, Some(10));
        assert_eq!(refs[1].id, "a2");
        assert_eq!(refs[1].vendor_identifier, None);
    }

    #[test]
    fn parse_error_document() {
        let json = r#"{
            "errors": [{
                "id": "abc",
                "status": "409",
                "code": "ENTITY_ERROR.ATTRIBUTE.INVALID.DUPLICATE",
                "title": "The provided entity includes an attribute with a value that has already been used",
                "detail": "The vendor identifier has already been used.",
                "source": {"pointer": "/data/attributes/vendorIdentifier"}
            }]
        }"#;
        let doc: ErrorDocument = serde_json::from_str(json).unwrap();
        let err = &doc.errors[0];
        assert_eq!(err.code(), "ENTITY_ERROR.ATTRIBUTE.INVALID.DUPLICATE");
        assert_eq!(err.pointer(), "/data/attributes/vendorIdentifier");
        assert_eq!(err.message(), "The vendor identifier has already been used.");
    }

    #[test]
    fn message_falls_back_to_title_then_code() {
        let mut err = ErrorObject {
            code: Some("X".into()),
            title: Some("Title".into()),
            ..Default::default()
        };
        assert_eq!(err.message(), "Title");
        err.title = None;
        assert_eq!(err.message(), "X");
    }

    #[test]
    fn achievement_body_links_detail() {
        let body = create_achievement_body(
            "detail-1",
            &NewAchievement {
                reference_name: "First".into(),
                vendor_identifier: "first".into(),
                points: 10,
                show_before_earned: false,
                repeatable: true,
            },
        );
        assert_eq!(body["data"]["type"], ACHIEVEMENTS_TYPE);
        assert_eq!(body["data"]["attributes"]["showBeforeEarned"], false);
        assert_eq!(
            body["data"]["relationships"]["gameCenterDetail"]["data"]["id"],
            "detail-1"
        );
    }
}

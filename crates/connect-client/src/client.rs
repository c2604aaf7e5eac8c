use std::time::Duration;

use achievements_core::api::{AchievementApi, ApiError, LIST_LIMIT};
use achievements_core::types::{NewAchievement, NewLocalization, RemoteAchievementRef};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ConnectError;
use crate::types::{
    create_achievement_body, create_localization_body, AchievementResource, Document,
    ErrorDocument, ErrorObject, ResourceIdentifier,
};
use crate::Result;

const USER_AGENT: &str = concat!("achievements/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─── ConnectClient ────────────────────────────────────────────────────────

/// App Store Connect REST client scoped to Game Center achievements.
///
/// Every request carries `Authorization: Bearer <token>`; minting the token
/// happens elsewhere. No retries.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ConnectClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /v1/apps/{id}/gameCenterDetail`, returning the achievement group id.
    pub async fn fetch_game_center_detail(&self, app_id: &str) -> Result<String> {
        let url = self.url(&format!("/v1/apps/{app_id}/gameCenterDetail"));
        let resp = self.send(self.http.get(url)).await?;
        let doc: Document<ResourceIdentifier> = read_json(resp).await?;
        Ok(doc.data.id)
    }

    pub async fn post_achievement(
        &self,
        group_id: &str,
        achievement: &NewAchievement,
    ) -> Result<RemoteAchievementRef> {
        let url = self.url("/v1/gameCenterAchievements");
        let body = create_achievement_body(group_id, achievement);
        let resp = self.send(self.http.post(url).json(&body)).await?;
        let doc: Document<AchievementResource> = read_json(resp).await?;
        Ok(doc.data.into())
    }

    pub async fn post_localization(
        &self,
        achievement_id: &str,
        localization: &NewLocalization,
    ) -> Result<()> {
        let url = self.url("/v1/gameCenterAchievementLocalizations");
        let body = create_localization_body(achievement_id, localization);
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    /// One page of the group's achievements, never more than [`LIST_LIMIT`].
    pub async fn fetch_achievements(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<RemoteAchievementRef>> {
        let limit = limit.clamp(1, LIST_LIMIT);
        let url = self.url(&format!("/v1/gameCenterDetails/{group_id}/gameCenterAchievements"));
        let resp = self
            .send(self.http.get(url).query(&[("limit", limit)]))
            .await?;
        let doc: Document<Vec<AchievementResource>> = read_json(resp).await?;
        Ok(doc.data.into_iter().take(limit).map(Into::into).collect())
    }

    pub async fn remove_achievement(&self, achievement_id: &str) -> Result<()> {
        let url = self.url(&format!("/v1/gameCenterAchievements/{achievement_id}"));
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send with auth; turn any non-2xx into [`ConnectError::Api`].
    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.bearer_auth(&self.token).send().await?;
        let status = resp.status();
        tracing::debug!(url = %resp.url(), status = status.as_u16(), "app store connect response");
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let error = serde_json::from_str::<ErrorDocument>(&body)
            .ok()
            .and_then(|doc| doc.errors.into_iter().next())
            .unwrap_or_else(|| ErrorObject {
                status: Some(status.as_u16().to_string()),
                detail: Some(body.trim().to_string()).filter(|b| !b.is_empty()),
                ..Default::default()
            });
        Err(ConnectError::Api {
            status: status.as_u16(),
            error,
        })
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|source| ConnectError::Decode { body, source })
}

// ─── AchievementApi ───────────────────────────────────────────────────────

#[async_trait]
impl AchievementApi for ConnectClient {
    async fn get_group_id(&self, app_id: &str) -> std::result::Result<String, ApiError> {
        Ok(self.fetch_game_center_detail(app_id).await?)
    }

    async fn create_achievement(
        &self,
        group_id: &str,
        achievement: &NewAchievement,
    ) -> std::result::Result<RemoteAchievementRef, ApiError> {
        Ok(self.post_achievement(group_id, achievement).await?)
    }

    async fn create_localization(
        &self,
        achievement_id: &str,
        localization: &NewLocalization,
    ) -> std::result::Result<(), ApiError> {
        Ok(self.post_localization(achievement_id, localization).await?)
    }

    async fn list_achievements(
        &self,
        group_id: &str,
        limit: usize,
    ) -> std::result::Result<Vec<RemoteAchievementRef>, ApiError> {
        Ok(self.fetch_achievements(group_id, limit).await?)
    }

    async fn delete_achievement(&self, achievement_id: &str) -> std::result::Result<(), ApiError> {
        Ok(self.remove_achievement(achievement_id).await?)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> ConnectClient {
        ConnectClient::new(server.url(), "test-token").unwrap()
    }

    fn new_achievement(vendor_id: &str) -> NewAchievement {
        NewAchievement {
            reference_name: "First".into(),
            vendor_identifier: vendor_id.into(),
            points: 10,
            show_before_earned: true,
            repeatable: false,
        }
    }

    #[tokio::test]
    async fn get_group_id_reads_detail_id() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/v1/apps/123/gameCenterDetail")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"type": "gameCenterDetails", "id": "gcd-1"}}"#)
            .create_async()
            .await;

        let id = client(&server).get_group_id("123").await.unwrap();

        assert_eq!(id, "gcd-1");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn create_achievement_posts_document() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/gameCenterAchievements")
            .match_body(Matcher::PartialJson(json!({
                "data": {
                    "type": "gameCenterAchievements",
                    "attributes": {"vendorIdentifier": "first", "points": 10},
                    "relationships": {"gameCenterDetail": {"data": {"id": "gcd-1"}}}
                }
            })))
            .with_status(201)
            .with_body(
                r#"{"data": {"type": "gameCenterAchievements", "id": "ach-9",
                    "attributes": {"referenceName": "First", "vendorIdentifier": "first", "points": 10}}}"#,
            )
            .create_async()
            .await;

        let created = client(&server)
            .create_achievement("gcd-1", &new_achievement("first"))
            .await
            .unwrap();

        assert_eq!(created.id, "ach-9");
        assert_eq!(created.vendor_identifier.as_deref(), Some("first"));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn duplicate_vendor_id_is_classified() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/gameCenterAchievements")
            .with_status(409)
            .with_body(
                r#"{"errors": [{"status": "409", "code": "ENTITY_ERROR.ATTRIBUTE.INVALID.DUPLICATE",
                    "detail": "already used", "source": {"pointer": "/data/attributes/vendorIdentifier"}}]}"#,
            )
            .create_async()
            .await;

        let err = client(&server)
            .create_achievement("gcd-1", &new_achievement("first"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::DuplicateVendorId(_)));
    }

    #[tokio::test]
    async fn localization_conflict_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/gameCenterAchievementLocalizations")
            .match_body(Matcher::PartialJson(json!({
                "data": {
                    "attributes": {"locale": "it", "beforeEarnedDescription": "b"},
                    "relationships": {"gameCenterAchievement": {"data": {"id": "ach-9"}}}
                }
            })))
            .with_status(409)
            .with_body(
                r#"{"errors": [{"code": "ENTITY_ERROR.ATTRIBUTE.INVALID.DUPLICATE",
                    "source": {"pointer": "/data/attributes/locale"}}]}"#,
            )
            .create_async()
            .await;

        let err = client(&server)
            .create_localization(
                "ach-9",
                &NewLocalization {
                    locale: "it".into(),
                    name: "Primo".into(),
                    before_earned_description: "b".into(),
                    after_earned_description: "a".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_localization_conflict());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn list_clamps_limit_and_truncates() {
        let mut server = mockito::Server::new_async().await;
        let data: Vec<serde_json::Value> = (0..205)
            .map(|n| json!({"type": "gameCenterAchievements", "id": format!("a{n}")}))
            .collect();
        let m = server
            .mock("GET", "/v1/gameCenterDetails/gcd-1/gameCenterAchievements")
            .match_query(Matcher::UrlEncoded("limit".into(), "200".into()))
            .with_status(200)
            .with_body(json!({ "data": data }).to_string())
            .create_async()
            .await;

        let refs = client(&server)
            .list_achievements("gcd-1", 500)
            .await
            .unwrap();

        assert_eq!(refs.len(), LIST_LIMIT);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", "/v1/gameCenterAchievements/ach-9")
            .with_status(204)
            .create_async()
            .await;

        client(&server).delete_achievement("ach-9").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_remote_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/v1/gameCenterAchievements/ach-9")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client(&server)
            .delete_achievement("ach-9")
            .await
            .unwrap_err();

        assert_eq!(err.code(), "HTTP_502");
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/apps/123/gameCenterDetail")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client(&server).get_group_id("123").await.unwrap_err();
        assert_eq!(err.code(), "TRANSPORT");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let c = ConnectClient::new("https://example.invalid/", "t").unwrap();
        assert_eq!(c.base_url(), "https://example.invalid");
        assert_eq!(c.url("/v1/x"), "https://example.invalid/v1/x");
    }
}

use tokio::sync::OnceCell;

use crate::api::{AchievementApi, ApiError};

/// Single-slot memo of the app's achievement-group id.
///
/// Written at most once; a failed lookup leaves the slot empty so the next
/// caller retries. There is no invalidation: the app-to-group binding is
/// assumed stable for the life of the process.
#[derive(Debug, Default)]
pub struct GroupIdCache {
    cell: OnceCell<String>,
}

impl GroupIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that never calls the remote.
    pub fn with_group_id(group_id: impl Into<String>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(group_id.into())),
        }
    }

    pub fn get(&self) -> Option<&str> {
        self.cell.get().map(String::as_str)
    }

    /// Return the cached id, fetching it through `client` on first use.
    ///
    /// Concurrent callers share one in-flight lookup.
    pub async fn get_or_fetch<C>(&self, client: &C, app_id: &str) -> Result<&str, ApiError>
    where
        C: AchievementApi + ?Sized,
    {
        let id = self
            .cell
            .get_or_try_init(|| async {
                let id = client.get_group_id(app_id).await?;
                tracing::debug!(app_id, group_id = %id, "resolved achievement group");
                Ok::<_, ApiError>(id)
            })
            .await?;
        Ok(id.as_str())
    }
}

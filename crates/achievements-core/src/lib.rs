//! `achievements-core`: converge Game Center achievements to a declared list.
//!
//! The remote API is the only source of truth; nothing is cached across runs.
//!
//! ```text
//! Vec<DesiredAchievement>
//!     │
//!     ▼
//! BatchRunner     ← sequential, paced, never stops on item failure
//!     │
//!     ▼
//! Reconciler      ← create, or adopt on vendor-id conflict; then localize
//!     │
//!     ├── GroupIdCache   (one group lookup per process)
//!     ├── locale         (alias normalization, advisory validation)
//!     ▼
//! dyn AchievementApi ← transport lives in `connect-client`
//! ```

pub mod api;
pub mod batch;
pub mod batch_file;
pub mod cache;
pub mod config;
pub mod delete;
pub mod error;
pub mod locale;
pub mod reconcile;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{AchievementApi, ApiError, LIST_LIMIT};
pub use batch::{BatchOutcome, BatchRunner, ItemReport, ItemStatus};
pub use cache::GroupIdCache;
pub use delete::{BulkDeleter, DeleteOutcome};
pub use error::{CoreError, Result};
pub use reconcile::{LocalizationStats, Reconciled, ReconcileError, Reconciler, Resolution};
pub use types::{DesiredAchievement, DesiredLocalization, RemoteAchievementRef};

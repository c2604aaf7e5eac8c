//! `connect-client`: App Store Connect transport for `achievements-core`.
//!
//! Implements [`achievements_core::AchievementApi`] over the JSON:API
//! endpoints for Game Center achievements:
//!
//! ```text
//! GET    /v1/apps/{id}/gameCenterDetail
//! POST   /v1/gameCenterAchievements
//! POST   /v1/gameCenterAchievementLocalizations
//! GET    /v1/gameCenterDetails/{id}/gameCenterAchievements?limit=200
//! DELETE /v1/gameCenterAchievements/{id}
//! ```
//!
//! Wire errors are folded into [`achievements_core::ApiError`] by
//! [`error::classify`], which decides whether a 409 is a vendor-id conflict,
//! a localization conflict, or a generic duplicate.

pub mod client;
pub mod error;
pub mod types;

pub use client::ConnectClient;
pub use error::ConnectError;

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, ConnectError>;

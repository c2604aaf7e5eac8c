//! In-memory [`AchievementApi`] used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AchievementApi, ApiError, LIST_LIMIT};
use crate::types::{NewAchievement, NewLocalization, RemoteAchievementRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetGroupId(String),
    CreateAchievement(String),
    CreateLocalization { achievement_id: String, locale: String },
    List(usize),
    Delete(String),
}

/// Behaves like a well-formed remote: creates succeed, a second create with a
/// known vendor identifier conflicts, listings return what exists. Individual
/// calls can be scripted to fail.
pub struct FakeApi {
    group_id: String,
    group_lookups: AtomicU64,
    group_failures: Mutex<(u64, Option<ApiError>)>,
    next_id: AtomicU64,
    existing: Mutex<Vec<RemoteAchievementRef>>,
    create_failures: Mutex<HashMap<String, ApiError>>,
    localization_failures: Mutex<HashMap<String, ApiError>>,
    delete_failures: Mutex<HashMap<String, ApiError>>,
    list_failure: Mutex<Option<ApiError>>,
    ignore_limit: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            group_lookups: AtomicU64::new(0),
            group_failures: Mutex::new((0, None)),
            next_id: AtomicU64::new(1),
            existing: Mutex::new(Vec::new()),
            create_failures: Mutex::new(HashMap::new()),
            localization_failures: Mutex::new(HashMap::new()),
            delete_failures: Mutex::new(HashMap::new()),
            list_failure: Mutex::new(None),
            ignore_limit: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed an achievement that already exists remotely.
    pub fn insert_existing(&self, id: &str, vendor_identifier: &str) {
        self.existing.lock().unwrap().push(RemoteAchievementRef {
            id: id.to_string(),
            reference_name: Some(format!("existing {vendor_identifier}")),
            vendor_identifier: Some(vendor_identifier.to_string()),
            points: Some(10),
        });
    }

    pub fn fail_group_lookups(&self, times: u64, err: ApiError) {
        *self.group_failures.lock().unwrap() = (times, Some(err));
    }

    pub fn fail_create(&self, vendor_identifier: &str, err: ApiError) {
        self.create_failures
            .lock()
            .unwrap()
            .insert(vendor_identifier.to_string(), err);
    }

    pub fn fail_localization(&self, locale: &str, err: ApiError) {
        self.localization_failures
            .lock()
            .unwrap()
            .insert(locale.to_string(), err);
    }

    pub fn fail_delete(&self, id: &str, err: ApiError) {
        self.delete_failures
            .lock()
            .unwrap()
            .insert(id.to_string(), err);
    }

    pub fn fail_list(&self, err: ApiError) {
        *self.list_failure.lock().unwrap() = Some(err);
    }

    /// Return every achievement from listings, whatever limit was asked for.
    pub fn ignore_list_limit(&self) {
        self.ignore_limit.store(true, Ordering::SeqCst);
    }

    pub fn group_lookups(&self) -> u64 {
        self.group_lookups.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_vendor_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateAchievement(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn localization_calls(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateLocalization {
                    achievement_id,
                    locale,
                } => Some((achievement_id, locale)),
                _ => None,
            })
            .collect()
    }

    pub fn existing_ids(&self) -> Vec<String> {
        self.existing
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AchievementApi for FakeApi {
    async fn get_group_id(&self, app_id: &str) -> Result<String, ApiError> {
        self.record(Call::GetGroupId(app_id.to_string()));
        self.group_lookups.fetch_add(1, Ordering::SeqCst);
        let mut failures = self.group_failures.lock().unwrap();
        if failures.0 > 0 {
            failures.0 -= 1;
            if let Some(err) = failures.1.clone() {
                return Err(err);
            }
        }
        Ok(self.group_id.clone())
    }

    async fn create_achievement(
        &self,
        _group_id: &str,
        achievement: &NewAchievement,
    ) -> Result<RemoteAchievementRef, ApiError> {
        self.record(Call::CreateAchievement(
            achievement.vendor_identifier.clone(),
        ));
        if let Some(err) = self
            .create_failures
            .lock()
            .unwrap()
            .get(&achievement.vendor_identifier)
        {
            return Err(err.clone());
        }
        let mut existing = self.existing.lock().unwrap();
        if existing
            .iter()
            .any(|r| r.vendor_identifier.as_deref() == Some(&achievement.vendor_identifier))
        {
            return Err(ApiError::DuplicateVendorId(
                achievement.vendor_identifier.clone(),
            ));
        }
        let id = format!("ach-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = RemoteAchievementRef {
            id,
            reference_name: Some(achievement.reference_name.clone()),
            vendor_identifier: Some(achievement.vendor_identifier.clone()),
            points: Some(achievement.points),
        };
        existing.push(created.clone());
        Ok(created)
    }

    async fn create_localization(
        &self,
        achievement_id: &str,
        localization: &NewLocalization,
    ) -> Result<(), ApiError> {
        self.record(Call::CreateLocalization {
            achievement_id: achievement_id.to_string(),
            locale: localization.locale.clone(),
        });
        match self
            .localization_failures
            .lock()
            .unwrap()
            .get(&localization.locale)
        {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn list_achievements(
        &self,
        _group_id: &str,
        limit: usize,
    ) -> Result<Vec<RemoteAchievementRef>, ApiError> {
        self.record(Call::List(limit));
        if let Some(err) = self.list_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let limit = if self.ignore_limit.load(Ordering::SeqCst) {
            usize::MAX
        } else {
            limit.min(LIST_LIMIT)
        };
        Ok(self
            .existing
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_achievement(&self, achievement_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(achievement_id.to_string()));
        if let Some(err) = self.delete_failures.lock().unwrap().get(achievement_id) {
            return Err(err.clone());
        }
        self.existing
            .lock()
            .unwrap()
            .retain(|r| r.id != achievement_id);
        Ok(())
    }
}

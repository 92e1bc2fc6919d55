//! Per-user threshold settings and the in-memory store that owns them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Chat-platform user identifier.
pub type UserId = i64;

/// One user's alert thresholds plus the notification flag.
///
/// Field names match the wire shape shared by the handoff token, the
/// mini-app save message and the device query string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub temp_lower: f32,
    pub temp_upper: f32,
    pub humidity_lower: f32,
    pub humidity_upper: f32,
    pub notif_active: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            temp_lower: 20.0,
            temp_upper: 35.0,
            humidity_lower: 40.0,
            humidity_upper: 80.0,
            notif_active: true,
        }
    }
}

/// Partial update merged onto a user's record by `SettingsStore::set`.
///
/// The store merges blindly; callers accepting raw external input must run
/// `gauge::validate_range` before building a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsPatch {
    pub temp_lower: Option<f32>,
    pub temp_upper: Option<f32>,
    pub humidity_lower: Option<f32>,
    pub humidity_upper: Option<f32>,
    pub notif_active: Option<bool>,
}

impl SettingsPatch {
    pub fn temp_bounds(min: f32, max: f32) -> Self {
        Self {
            temp_lower: Some(min),
            temp_upper: Some(max),
            ..Self::default()
        }
    }

    pub fn humidity_bounds(min: f32, max: f32) -> Self {
        Self {
            humidity_lower: Some(min),
            humidity_upper: Some(max),
            ..Self::default()
        }
    }

    pub fn notify(enabled: bool) -> Self {
        Self {
            notif_active: Some(enabled),
            ..Self::default()
        }
    }
}

/// Process-wide settings storage keyed by user id.
///
/// Records are created with defaults on first access and live for the
/// process lifetime; nothing is persisted. All mutation goes through `set`
/// or `replace`, each an atomic read-modify-write on one key.
#[derive(Debug, Default)]
pub struct SettingsStore {
    records: HashMap<UserId, UserSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing record, or the default record inserted on first call.
    pub fn get(&mut self, user: UserId) -> UserSettings {
        *self.records.entry(user).or_default()
    }

    /// Merge `patch` onto the existing (or default) record; returns the
    /// merged record. No cross-field validation happens here.
    pub fn set(&mut self, user: UserId, patch: SettingsPatch) -> UserSettings {
        let rec = self.records.entry(user).or_default();
        if let Some(v) = patch.temp_lower {
            rec.temp_lower = v;
        }
        if let Some(v) = patch.temp_upper {
            rec.temp_upper = v;
        }
        if let Some(v) = patch.humidity_lower {
            rec.humidity_lower = v;
        }
        if let Some(v) = patch.humidity_upper {
            rec.humidity_upper = v;
        }
        if let Some(v) = patch.notif_active {
            rec.notif_active = v;
        }
        *rec
    }

    /// Full overwrite, used by the mini-app save path.
    pub fn replace(&mut self, user: UserId, settings: UserSettings) -> UserSettings {
        self.records.insert(user, settings);
        settings
    }

    /// Read-only lookup that does not insert a default record.
    pub fn get_if_present(&self, user: UserId) -> Option<UserSettings> {
        self.records.get(&user).copied()
    }

    /// Notification flag without inserting a record; absent means enabled.
    pub fn is_notify_enabled(&self, user: UserId) -> bool {
        self.records.get(&user).map_or(true, |s| s.notif_active)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

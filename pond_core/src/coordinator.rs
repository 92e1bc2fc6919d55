//! Orchestration of the three edit surfaces over one settings store.
//!
//! Every surface follows the same commit protocol: validate, mutate the
//! store, push the merged record to the device, reply. There is no pending
//! edit state; a valid input commits immediately. The device push is
//! best-effort: a failure becomes a `TransportError` on the log and is
//! never visible to the user who made the edit.

use crate::codec;
use crate::error::{MonitorError, Result, ValidationError};
use crate::gauge::{self, Zone};
use crate::settings::{SettingsPatch, SettingsStore, UserId, UserSettings};
use crate::slider::{Domain, Domains};
use eyre::WrapErr;
use pond_traits::{DeviceLink, Reading};
use std::collections::HashSet;

/// Parsed chat command, numeric arguments already split off by the
/// transport's parser. The coordinator re-validates `min < max` regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatCommand {
    SetTemp { min: f32, max: f32 },
    SetHumid { min: f32, max: f32 },
    NotifyOn,
    NotifyOff,
}

pub struct SyncCoordinator<D: DeviceLink> {
    store: SettingsStore,
    device: D,
    domains: Domains,
    miniapp_base: String,
    allowed: HashSet<UserId>,
}

impl<D: DeviceLink> SyncCoordinator<D> {
    pub fn new(
        device: D,
        domains: Domains,
        miniapp_base: impl Into<String>,
        allowed: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            store: SettingsStore::new(),
            device,
            domains,
            miniapp_base: miniapp_base.into(),
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Static allow-list check; an empty list denies everyone.
    pub fn is_allowed(&self, user: UserId) -> bool {
        self.allowed.contains(&user)
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Handle a parsed chat command. Validation failures reject the input
    /// with a corrective message before anything is stored.
    pub fn on_chat_command(&mut self, user: UserId, cmd: ChatCommand) -> Result<String> {
        match cmd {
            ChatCommand::SetTemp { min, max } => {
                self.check_bounds("temperature", self.domains.temperature, min, max)?;
                let merged = self.store.set(user, SettingsPatch::temp_bounds(min, max));
                self.push_settings(user, &merged);
                Ok(format!("Temperature bounds set: {min} - {max} \u{b0}C"))
            }
            ChatCommand::SetHumid { min, max } => {
                self.check_bounds("humidity", self.domains.humidity, min, max)?;
                let merged = self
                    .store
                    .set(user, SettingsPatch::humidity_bounds(min, max));
                self.push_settings(user, &merged);
                Ok(format!("Humidity bounds set: {min} - {max}%"))
            }
            ChatCommand::NotifyOn => Ok(self.on_inline_toggle(user, true)),
            ChatCommand::NotifyOff => Ok(self.on_inline_toggle(user, false)),
        }
    }

    /// Flip the notification flag. Booleans carry no invariant, so this
    /// commits and pushes without validation.
    pub fn on_inline_toggle(&mut self, user: UserId, enabled: bool) -> String {
        let merged = self.store.set(user, SettingsPatch::notify(enabled));
        self.push_settings(user, &merged);
        if enabled {
            "Notifications enabled!".to_string()
        } else {
            "Notifications disabled!".to_string()
        }
    }

    /// Consume a mini-app data message carrying a full settings record.
    /// The payload is re-validated even though the mini-app sliders cannot
    /// structurally produce an inverted range.
    pub fn on_mini_app_message(&mut self, user: UserId, payload: &str) -> Result<String> {
        let settings =
            codec::parse_mini_app(payload).map_err(|e| eyre::Report::new(MonitorError::Decode(e)))?;
        self.check_bounds(
            "temperature",
            self.domains.temperature,
            settings.temp_lower,
            settings.temp_upper,
        )?;
        self.check_bounds(
            "humidity",
            self.domains.humidity,
            settings.humidity_lower,
            settings.humidity_upper,
        )?;
        let stored = self.store.replace(user, settings);
        self.push_settings(user, &stored);
        Ok("Settings saved!".to_string())
    }

    /// Build the dashboard deep link for a session start, inserting default
    /// settings for a first-time user.
    pub fn on_session_start(&mut self, user: UserId) -> Result<String> {
        let settings = self.store.get(user);
        let token = codec::encode(&settings).wrap_err("encode handoff token")?;
        Ok(format!(
            "{}/?start={token}",
            self.miniapp_base.trim_end_matches('/')
        ))
    }

    /// Format the status text for the latest reading against the user's
    /// thresholds, inserting defaults for a first-time user.
    pub fn status_report(&mut self, user: UserId, reading: &Reading) -> String {
        let s = self.store.get(user);
        let temp_zone = gauge::classify(
            reading.temperature,
            s.temp_lower,
            s.temp_upper,
            self.domains.temperature.span(),
        );
        let humid_zone = gauge::classify(
            reading.humidity,
            s.humidity_lower,
            s.humidity_upper,
            self.domains.humidity.span(),
        );
        format!(
            "Pond status\n\
             Temperature: {:.1} \u{b0}C ({})\n\
             Humidity: {:.1}% ({})\n\
             Last update: {}\n\
             Notifications: {}\n\
             Temperature bounds: {} - {} \u{b0}C\n\
             Humidity bounds: {} - {}%",
            reading.temperature,
            zone_text(temp_zone, reading.temperature, s.temp_lower),
            reading.humidity,
            zone_text(humid_zone, reading.humidity, s.humidity_lower),
            reading.observed_at,
            if s.notif_active { "on" } else { "off" },
            s.temp_lower,
            s.temp_upper,
            s.humidity_lower,
            s.humidity_upper,
        )
    }

    fn check_bounds(
        &self,
        metric: &'static str,
        domain: Domain,
        min: f32,
        max: f32,
    ) -> Result<()> {
        gauge::validate_range(min, max).map_err(eyre::Report::new)?;
        if min < domain.min || max > domain.max {
            return Err(eyre::Report::new(ValidationError::OutOfDomain {
                metric,
                min: domain.min,
                max: domain.max,
            }));
        }
        Ok(())
    }

    /// Fire-and-forget push of the committed record to the device. Failure
    /// is routed through the transport error channel and only logged.
    fn push_settings(&mut self, user: UserId, settings: &UserSettings) {
        let query = codec::device_query(settings);
        match self.device.push(&query) {
            Ok(()) => tracing::debug!(user, "settings pushed to device"),
            Err(e) => {
                let err = MonitorError::Transport(e.to_string());
                tracing::warn!(user, error = %err, "device push failed");
            }
        }
    }
}

fn zone_text(zone: Zone, value: f32, lower: f32) -> &'static str {
    match zone {
        Zone::Normal => "normal",
        Zone::NearLower => "near lower bound",
        Zone::NearUpper => "near upper bound",
        Zone::OutOfRange => {
            if value < lower {
                "too low!"
            } else {
                "too high!"
            }
        }
    }
}

#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the pond monitoring service.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Validation returns one specific message per offending field so the CLI
//!   can point the operator at the exact line to fix.
use serde::Deserialize;

/// Remote sensor/actuator device that receives threshold pushes.
#[derive(Debug, Deserialize)]
pub struct DeviceCfg {
    /// Base URL of the device settings endpoint, e.g. "http://192.168.1.50/settings"
    pub endpoint: String,
    /// Per-push HTTP timeout (ms). The push itself is fire-and-forget.
    #[serde(default = "default_push_timeout_ms")]
    pub push_timeout_ms: u64,
}

fn default_push_timeout_ms() -> u64 {
    2_000
}

/// Spreadsheet-backed reading source polled by the dashboard surface.
#[derive(Debug, Deserialize)]
pub struct SourceCfg {
    /// URL of the deployed sheet script, POSTed with `action=getLatest`.
    pub endpoint: String,
    /// Poll interval in seconds for the watch/dashboard loop.
    #[serde(default = "default_poll_secs")]
    pub poll_secs: u64,
    /// Per-fetch HTTP timeout (ms).
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

fn default_poll_secs() -> u64 {
    30
}

fn default_fetch_timeout_ms() -> u64 {
    5_000
}

/// Static allow-list of user ids. An empty list denies everyone.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AccessCfg {
    pub allowed_users: Vec<i64>,
}

/// Embedded dashboard (mini-app) handoff target.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MiniAppCfg {
    /// Base URL the handoff token is appended to as `?start=<token>`.
    pub base_url: String,
}

impl Default for MiniAppCfg {
    fn default() -> Self {
        Self {
            base_url: "https://pond-dashboard.example.app".to_string(),
        }
    }
}

/// Metric domains and the slider handle separation.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct LimitsCfg {
    pub temp_min: f32,
    pub temp_max: f32,
    pub humidity_min: f32,
    pub humidity_max: f32,
    /// Minimum gap kept between the two handles, in domain units.
    pub min_separation: f32,
}

impl Default for LimitsCfg {
    fn default() -> Self {
        Self {
            temp_min: 0.0,
            temp_max: 50.0,
            humidity_min: 0.0,
            humidity_max: 100.0,
            min_separation: 1.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub device: DeviceCfg,
    pub source: SourceCfg,
    #[serde(default)]
    pub access: AccessCfg,
    #[serde(default)]
    pub miniapp: MiniAppCfg,
    #[serde(default)]
    pub limits: LimitsCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

fn check_endpoint(what: &str, url: &str) -> eyre::Result<()> {
    if url.trim().is_empty() {
        eyre::bail!("{what}.endpoint must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        eyre::bail!("{what}.endpoint must start with http:// or https://");
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Device
        check_endpoint("device", &self.device.endpoint)?;
        if self.device.push_timeout_ms == 0 {
            eyre::bail!("device.push_timeout_ms must be >= 1");
        }

        // Source
        check_endpoint("source", &self.source.endpoint)?;
        if self.source.poll_secs == 0 {
            eyre::bail!("source.poll_secs must be >= 1");
        }
        if self.source.poll_secs > 24 * 60 * 60 {
            eyre::bail!("source.poll_secs is unreasonably large (>24h)");
        }
        if self.source.fetch_timeout_ms == 0 {
            eyre::bail!("source.fetch_timeout_ms must be >= 1");
        }

        // Mini-app
        check_endpoint("miniapp", &self.miniapp.base_url).map_err(|_| {
            eyre::eyre!("miniapp.base_url must be a non-empty http(s) URL")
        })?;

        // Limits
        let l = &self.limits;
        for (name, v) in [
            ("temp_min", l.temp_min),
            ("temp_max", l.temp_max),
            ("humidity_min", l.humidity_min),
            ("humidity_max", l.humidity_max),
            ("min_separation", l.min_separation),
        ] {
            if !v.is_finite() {
                eyre::bail!("limits.{name} must be a finite number");
            }
        }
        if l.temp_min >= l.temp_max {
            eyre::bail!("limits.temp_min must be < limits.temp_max");
        }
        if l.humidity_min >= l.humidity_max {
            eyre::bail!("limits.humidity_min must be < limits.humidity_max");
        }
        if l.min_separation <= 0.0 {
            eyre::bail!("limits.min_separation must be > 0");
        }
        let narrowest = (l.temp_max - l.temp_min).min(l.humidity_max - l.humidity_min);
        if l.min_separation >= narrowest {
            eyre::bail!("limits.min_separation must be smaller than the narrowest domain");
        }

        Ok(())
    }
}

#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Network adapters for the pond monitor.
//!
//! Implements `pond_traits::DeviceLink` over a plain HTTP GET to the sensor
//! device and `pond_traits::SensorSource` over the spreadsheet web endpoint
//! that the device appends readings to. Simulated variants exist for running
//! the stack without any network.

pub mod error;

use crate::error::NetError;
use pond_traits::{DeviceLink, Reading, SensorSource};
use serde::Deserialize;
use std::time::Duration;

/// Settings receiver on the pond device, reached by HTTP GET with the
/// settings as query parameters.
///
/// `push` is fire-and-forget: the request runs on a detached thread and the
/// call returns once it is dispatched. Failures are logged there and never
/// reach the caller, matching the one-way contract of `DeviceLink`.
pub struct HttpDevice {
    endpoint: String,
    timeout: Duration,
}

impl HttpDevice {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Perform the GET synchronously. The detached push thread runs this;
    /// tests call it directly to observe the outcome.
    pub fn push_blocking(endpoint: &str, query: &str, timeout: Duration) -> Result<(), NetError> {
        let url = format!("{endpoint}?{query}");
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        match agent.get(&url).call() {
            Ok(resp) => {
                tracing::debug!(status = resp.status(), "device accepted settings");
                Ok(())
            }
            Err(ureq::Error::Status(code, _)) => Err(NetError::Status(code)),
            Err(e) => Err(NetError::Http(e.to_string())),
        }
    }
}

impl DeviceLink for HttpDevice {
    fn push(&mut self, query: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let endpoint = self.endpoint.clone();
        let query = query.to_string();
        let timeout = self.timeout;
        std::thread::spawn(move || {
            if let Err(e) = Self::push_blocking(&endpoint, &query, timeout) {
                tracing::warn!(error = %e, "device push failed");
            }
        });
        Ok(())
    }
}

/// Number that the sheet endpoint may serialize as a JSON number or as a
/// quoted string depending on the cell format.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f32),
    Str(String),
}

impl NumOrStr {
    fn to_f32(&self, field: &str) -> Result<f32, NetError> {
        match self {
            Self::Num(n) => Ok(*n),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| NetError::Malformed(format!("{field}: not a number: {s:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SheetWire {
    temperature: Option<NumOrStr>,
    humidity: Option<NumOrStr>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time: String,
    error: Option<String>,
}

/// Latest-reading endpoint backed by the spreadsheet the device logs to.
///
/// The endpoint answers a form POST `action=getLatest` with either the last
/// logged row or `{"error": ...}` when the sheet is empty.
pub struct SheetSource {
    endpoint: String,
}

impl SheetSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn fetch(&self, timeout: Duration) -> Result<Reading, NetError> {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let resp = agent
            .post(&self.endpoint)
            .send_form(&[("action", "getLatest")])
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => NetError::Status(code),
                other => NetError::Http(other.to_string()),
            })?;
        let wire: SheetWire = resp
            .into_json()
            .map_err(|e| NetError::Malformed(e.to_string()))?;

        if let Some(msg) = wire.error {
            return Err(NetError::Source(msg));
        }
        let temperature = wire
            .temperature
            .ok_or_else(|| NetError::Malformed("missing temperature".into()))?
            .to_f32("temperature")?;
        let humidity = wire
            .humidity
            .ok_or_else(|| NetError::Malformed("missing humidity".into()))?
            .to_f32("humidity")?;

        Ok(Reading {
            temperature,
            humidity,
            observed_at: format!("{} {}", wire.date, wire.time)
                .trim()
                .to_string(),
        })
    }
}

impl SensorSource for SheetSource {
    fn fetch_latest(
        &mut self,
        timeout: Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>> {
        self.fetch(timeout).map_err(Into::into)
    }
}

/// Simulated device link for offline runs; logs the query and succeeds.
pub struct SimulatedDevice;

impl DeviceLink for SimulatedDevice {
    fn push(&mut self, query: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!(query, "device push (simulated)");
        Ok(())
    }
}

/// Simulated reading source producing a slow sine drift around mid-range.
pub struct SimulatedSource {
    tick: u32,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self { tick: 0 }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for SimulatedSource {
    fn fetch_latest(
        &mut self,
        _timeout: Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>> {
        self.tick = self.tick.wrapping_add(1);
        let phase = f32::from(self.tick as u16) * 0.1;
        Ok(Reading {
            temperature: 26.0 + 4.0 * phase.sin(),
            humidity: 60.0 + 10.0 * phase.cos(),
            observed_at: format!("simulated tick {}", self.tick),
        })
    }
}

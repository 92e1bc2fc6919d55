pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// One observation produced by the remote sensor source.
///
/// `observed_at` is the source's own "date time" stamp, kept verbatim for
/// display; the core never parses it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
    pub observed_at: String,
}

/// One-way settings push to the remote sensor/actuator device.
///
/// Implementations receive the pre-built query string (five threshold/notify
/// keys) and deliver it best-effort; callers never retry.
pub trait DeviceLink {
    fn push(&mut self, query: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Read-only access to the latest pond reading.
pub trait SensorSource {
    fn fetch_latest(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<Reading, Box<dyn std::error::Error + Send + Sync>>;
}

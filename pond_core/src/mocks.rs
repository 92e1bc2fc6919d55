//! Test and helper mocks for pond_core

/// A device link that always errors on push; useful when exercising the
/// coordinator's logged-and-ignored transport failure path.
pub struct NoopDevice;

impl pond_traits::DeviceLink for NoopDevice {
    fn push(&mut self, _query: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop device")))
    }
}

/// A sensor source that always errors; the poller keeps whatever reading
/// the consumer saw last.
pub struct NoopSource;

impl pond_traits::SensorSource for NoopSource {
    fn fetch_latest(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<pond_traits::Reading, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop source")))
    }
}

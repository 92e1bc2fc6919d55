//! Two-handle range selector used to edit one bounded quantity.
//!
//! Each handle move is clamped relative to the other handle's *current*
//! value, so the handles can never cross or coincide without any two-phase
//! reconciliation. The selector is UI-side scratch state: it is seeded from
//! a `UserSettings` record and written back at commit points, never the
//! source of truth.

use crate::error::ValidationError;

/// Closed value domain for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f32,
    pub max: f32,
}

impl Domain {
    pub fn span(self) -> f32 {
        self.max - self.min
    }
}

/// Both metric domains plus the handle separation, as configured.
#[derive(Debug, Clone, Copy)]
pub struct Domains {
    pub temperature: Domain,
    pub humidity: Domain,
    pub min_separation: f32,
}

impl Default for Domains {
    fn default() -> Self {
        Self {
            temperature: Domain {
                min: 0.0,
                max: 50.0,
            },
            humidity: Domain {
                min: 0.0,
                max: 100.0,
            },
            min_separation: 1.0,
        }
    }
}

impl From<&pond_config::LimitsCfg> for Domains {
    fn from(l: &pond_config::LimitsCfg) -> Self {
        Self {
            temperature: Domain {
                min: l.temp_min,
                max: l.temp_max,
            },
            humidity: Domain {
                min: l.humidity_min,
                max: l.humidity_max,
            },
            min_separation: l.min_separation,
        }
    }
}

/// Normalized track positions for proportional handle placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPositions {
    pub lower_pct: f32,
    pub upper_pct: f32,
}

/// Coupled pair of bounds over a fixed domain.
///
/// Invariant: `domain.min <= lower < upper <= domain.max` and
/// `upper - lower >= min_separation`. Construction validates it; the
/// setters preserve it for any requested value, including non-finite ones.
#[derive(Debug, Clone, Copy)]
pub struct RangeSelector {
    domain: Domain,
    min_separation: f32,
    lower: f32,
    upper: f32,
}

impl RangeSelector {
    /// Selector over the configured temperature domain.
    pub fn temperature(
        domains: &Domains,
        lower: f32,
        upper: f32,
    ) -> Result<Self, ValidationError> {
        Self::new(domains.temperature, domains.min_separation, lower, upper)
    }

    /// Selector over the configured humidity domain.
    pub fn humidity(domains: &Domains, lower: f32, upper: f32) -> Result<Self, ValidationError> {
        Self::new(domains.humidity, domains.min_separation, lower, upper)
    }

    pub fn new(
        domain: Domain,
        min_separation: f32,
        lower: f32,
        upper: f32,
    ) -> Result<Self, ValidationError> {
        crate::gauge::validate_range(lower, upper)?;
        if lower < domain.min || upper > domain.max {
            return Err(ValidationError::OutOfDomain {
                metric: "selector",
                min: domain.min,
                max: domain.max,
            });
        }
        if upper - lower < min_separation {
            return Err(ValidationError::TooNarrow { min_separation });
        }
        Ok(Self {
            domain,
            min_separation,
            lower,
            upper,
        })
    }

    pub fn lower(&self) -> f32 {
        self.lower
    }

    pub fn upper(&self) -> f32 {
        self.upper
    }

    /// Move the lower handle toward `requested`; the applied value is capped
    /// at `upper - min_separation` and clamped to the domain. Returns the
    /// applied value. Non-finite requests leave the handle where it is.
    pub fn set_lower(&mut self, requested: f32) -> f32 {
        if !requested.is_finite() {
            return self.lower;
        }
        let capped = requested.min(self.upper - self.min_separation);
        self.lower = capped.clamp(self.domain.min, self.domain.max);
        self.lower
    }

    /// Symmetric to `set_lower`: floored at `lower + min_separation`,
    /// clamped to the domain.
    pub fn set_upper(&mut self, requested: f32) -> f32 {
        if !requested.is_finite() {
            return self.upper;
        }
        let floored = requested.max(self.lower + self.min_separation);
        self.upper = floored.clamp(self.domain.min, self.domain.max);
        self.upper
    }

    /// Percent positions of both handles on the track; no side effects.
    pub fn positions(&self) -> TrackPositions {
        let span = self.domain.span();
        TrackPositions {
            lower_pct: (self.lower - self.domain.min) / span * 100.0,
            upper_pct: (self.upper - self.domain.min) / span * 100.0,
        }
    }
}

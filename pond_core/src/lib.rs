#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core threshold-settings logic (transport-agnostic).
//!
//! This crate provides the transport-independent settings engine for a pond
//! monitor. All network interactions go through `pond_traits::DeviceLink`
//! and `pond_traits::SensorSource` traits.
//!
//! ## Architecture
//!
//! - **Settings**: Per-user threshold records and the in-memory store
//!   (`settings` module)
//! - **Classification**: Reading-vs-threshold zones and gauge geometry
//!   (`gauge` module)
//! - **Editing**: Coupled two-handle range selection (`slider` module)
//! - **Wire formats**: Handoff token, mini-app message, device query
//!   (`codec` module)
//! - **Orchestration**: Validate, commit, push, reply (`SyncCoordinator`)
//! - **Polling**: Background reading fetch loop (`poller` module)

// Module declarations
pub mod codec;
pub mod coordinator;
pub mod error;
pub mod gauge;
pub mod mocks;
pub mod poller;
pub mod settings;
pub mod slider;

pub use coordinator::{ChatCommand, SyncCoordinator};
pub use error::{DecodeError, MonitorError, Report, Result, ValidationError};
pub use gauge::{Zone, classify, needle_angle, validate_range};
pub use poller::ReadingPoller;
pub use settings::{SettingsPatch, SettingsStore, UserId, UserSettings};
pub use slider::{Domain, Domains, RangeSelector, TrackPositions};

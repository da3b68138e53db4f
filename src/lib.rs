// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! Firmware configuration bootstrap for Cohesix board targets.
//!
//! Seeds the NV variables behind the firmware setup forms and applies the
//! CPU clock policy through the firmware clock service. Everything here is
//! best effort: failures are logged and boot continues.

/// Error types for the store, clock service and driver entry.
pub mod error;

/// NV variable store interface and host-side stores.
pub mod store;

/// Firmware clock service interface and CPU clock policy.
pub mod clock;

/// The fixed settings table.
pub mod settings;

/// Platform defaults loaded from TOML.
#[cfg(not(target_os = "none"))]
pub mod config;

/// Seed-if-absent pass over the settings table.
pub mod bootstrap;

/// CPU clock policy applicator.
pub mod apply;

/// Driver entry sequencing.
pub mod driver;

pub use apply::{ApplyReport, ClockPolicyApplicator};
pub use bootstrap::{BootstrapReport, Outcome, VariableBootstrapper};
pub use clock::{ClockDomain, ClockPolicy, ClockRate, ClockService};
pub use driver::{ConfigDriver, DriverReport, FormPublisher};
pub use error::{ClockError, ConfigError, DriverError, FormError, StoreError};
pub use settings::{ConfigSetting, SettingDefaults, SettingId, FWCONFIG_NAMESPACE};
pub use store::{Namespace, VariableAttributes, VariableStore};

// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Error types shared by the variable store, clock service and driver entry.
//!
//! Only [`DriverError`] ever reaches the caller of
//! [`ConfigDriver::initialize`](crate::driver::ConfigDriver::initialize).
//! Everything else is absorbed by the bootstrap and clock stages and ends up
//! in a report or a log line.

use thiserror::Error;

use crate::clock::ClockDomain;

/// Failures reported by a [`VariableStore`](crate::store::VariableStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No variable with that name exists in the namespace.
    #[error("variable not found")]
    NotFound,
    /// The stored payload does not fit the caller's buffer.
    #[error("size mismatch: expected {expected} bytes, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// The store refused the write.
    #[error("variable store is write protected")]
    WriteProtected,
    /// Any other backend failure.
    #[error("variable store device error: {0}")]
    Device(String),
}

impl StoreError {
    /// `NotFound` is the normal first-boot state and not worth an error log.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Failures reported by a [`ClockService`](crate::clock::ClockService).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("clock domain {0} not supported by firmware")]
    Unsupported(ClockDomain),
    #[error("rate {requested} Hz outside supported range (max {max} Hz)")]
    RateOutOfRange { requested: u32, max: u32 },
    #[error("firmware clock service error: {0}")]
    Device(String),
}

/// Failures while loading defaults or a store snapshot from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Failure to publish the setup forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("couldn't install configuration pages: {0}")]
    Install(String),
}

/// Fatal conditions of the driver entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("firmware clock service not available")]
    ClockServiceUnavailable,
}

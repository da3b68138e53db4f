// CLASSIFICATION: COMMUNITY
// Filename: bootstrap.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Seeds missing setup-form variables with their compiled-in defaults.
//!
//! The forms can only update variables that already exist, so every
//! setting in the table must be present before they are published. A
//! value already in the store always wins over the default. Each setting
//! is handled on its own: a failed write is logged and the next setting
//! is processed.

use log::{debug, error, info, warn};

use crate::error::StoreError;
use crate::settings::ConfigSetting;
use crate::store::{read_u32, write_u32, VariableStore};

/// Whether a best-effort stage finished cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// Something failed, boot carries on regardless.
    Degraded,
}

/// What happened to one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingStatus {
    /// Already in the store and left untouched.
    Present(u32),
    /// Missing or unreadable; the default was written.
    Seeded { value: u32, read_error: StoreError },
    /// Missing or unreadable and the default could not be written.
    SeedFailed {
        read_error: StoreError,
        write_error: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingReport {
    pub setting: ConfigSetting,
    pub status: SettingStatus,
}

/// Per-setting results of [`VariableBootstrapper::ensure_defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub settings: Vec<SettingReport>,
}

impl BootstrapReport {
    pub fn outcome(&self) -> Outcome {
        if self.failures().next().is_some() {
            Outcome::Degraded
        } else {
            Outcome::Succeeded
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &SettingReport> {
        self.settings
            .iter()
            .filter(|r| matches!(r.status, SettingStatus::SeedFailed { .. }))
    }

    pub fn seeded(&self) -> usize {
        self.settings
            .iter()
            .filter(|r| matches!(r.status, SettingStatus::Seeded { .. }))
            .count()
    }

    pub fn status_of(&self, name: &str) -> Option<&SettingStatus> {
        self.settings
            .iter()
            .find(|r| r.setting.name() == name)
            .map(|r| &r.status)
    }
}

/// Runs the seed-if-absent pass over a fixed settings table.
pub struct VariableBootstrapper<S> {
    store: S,
    table: Vec<ConfigSetting>,
}

impl<S: VariableStore> VariableBootstrapper<S> {
    pub fn new(store: S, table: Vec<ConfigSetting>) -> Self {
        Self { store, table }
    }

    /// Make sure every setting exists. Never fails; see the report for
    /// per-setting results.
    pub fn ensure_defaults(&mut self) -> BootstrapReport {
        let mut report = BootstrapReport::default();
        for setting in &self.table {
            let status = ensure_one(&mut self.store, setting);
            report.settings.push(SettingReport {
                setting: *setting,
                status,
            });
        }
        debug!(
            "[bootstrap] {} settings checked, {} seeded, {} failed",
            report.settings.len(),
            report.seeded(),
            report.failures().count()
        );
        report
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

fn ensure_one<S: VariableStore>(store: &mut S, setting: &ConfigSetting) -> SettingStatus {
    let name = setting.name();
    let read_error = match read_u32(store, &setting.namespace, name) {
        Ok(value) => {
            debug!("[bootstrap] {name} present ({value:#x})");
            return SettingStatus::Present(value);
        }
        Err(e) => e,
    };

    if read_error.is_not_found() {
        info!("[bootstrap] {name} missing, seeding default {:#x}", setting.default);
    } else {
        warn!(
            "[bootstrap] {name} unreadable ({read_error}), reseeding default {:#x}",
            setting.default
        );
    }

    match write_u32(store, &setting.namespace, name, setting.default) {
        Ok(()) => SettingStatus::Seeded {
            value: setting.default,
            read_error,
        },
        Err(write_error) => {
            error!("[bootstrap] couldn't create {name}: {write_error}");
            SettingStatus::SeedFailed {
                read_error,
                write_error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{setting_table, SettingDefaults, FWCONFIG_NAMESPACE};
    use crate::store::{MemoryStore, VariableAttributes};

    fn table() -> Vec<ConfigSetting> {
        let defaults = SettingDefaults {
            hyp_enable: 1,
            cpu_clock: 1,
            ..SettingDefaults::default()
        };
        setting_table(FWCONFIG_NAMESPACE, &defaults)
    }

    #[test]
    fn empty_store_gets_every_default() {
        let mut boot = VariableBootstrapper::new(MemoryStore::new(), table());
        let report = boot.ensure_defaults();
        assert_eq!(report.outcome(), Outcome::Succeeded);
        assert_eq!(report.seeded(), 5);
        let store = boot.into_inner();
        assert_eq!(store.len(), 5);
        assert_eq!(read_u32(&store, &FWCONFIG_NAMESPACE, "HypEnable"), Ok(1));
        assert_eq!(
            store
                .variable(&FWCONFIG_NAMESPACE, "CpuClock")
                .map(|v| v.attributes),
            Some(VariableAttributes::CONFIG)
        );
    }

    #[test]
    fn wrong_sized_value_is_reseeded() {
        let mut store = MemoryStore::new();
        store
            .set(
                &FWCONFIG_NAMESPACE,
                "HypLogMask",
                &[0xff, 0xff],
                VariableAttributes::CONFIG,
            )
            .unwrap();
        let mut boot = VariableBootstrapper::new(&mut store, table());
        let report = boot.ensure_defaults();
        assert_eq!(
            report.status_of("HypLogMask"),
            Some(&SettingStatus::Seeded {
                value: 0,
                read_error: StoreError::SizeMismatch {
                    expected: 4,
                    actual: 2
                }
            })
        );
        assert_eq!(read_u32(&store, &FWCONFIG_NAMESPACE, "HypLogMask"), Ok(0));
    }
}

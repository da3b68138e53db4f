// CLASSIFICATION: COMMUNITY
// Filename: driver.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Boot entry for the firmware configuration driver.
//!
//! Sequence, run once per boot:
//!
//!  1. Require the firmware clock service; without it the driver bails.
//!  2. Seed missing setup-form variables.
//!  3. Apply the CPU clock policy.
//!  4. Publish the setup forms.
//!
//! Steps 2–4 are best effort and only logged.

use log::{error, info, warn};

use crate::apply::{ApplyReport, ClockPolicyApplicator};
use crate::bootstrap::{BootstrapReport, Outcome, VariableBootstrapper};
use crate::clock::ClockService;
use crate::error::{DriverError, FormError};
use crate::settings::{setting_table, SettingDefaults, FWCONFIG_NAMESPACE};
use crate::store::{Namespace, VariableStore};

/// Installs the setup forms that edit the seeded variables.
pub trait FormPublisher {
    fn publish(&mut self, namespace: &Namespace) -> Result<(), FormError>;
}

/// Publisher for headless boots: nothing to install, just a log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl FormPublisher for LogPublisher {
    fn publish(&mut self, namespace: &Namespace) -> Result<(), FormError> {
        info!("[fwconfig] headless boot, forms for {namespace} not installed");
        Ok(())
    }
}

/// What one [`ConfigDriver::initialize`] run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverReport {
    pub bootstrap: BootstrapReport,
    pub clock: ApplyReport,
    pub forms_published: bool,
}

impl DriverReport {
    pub fn outcome(&self) -> Outcome {
        match (self.bootstrap.outcome(), self.clock.outcome(), self.forms_published) {
            (Outcome::Succeeded, Outcome::Succeeded, true) => Outcome::Succeeded,
            _ => Outcome::Degraded,
        }
    }
}

pub struct ConfigDriver<S, F> {
    store: S,
    forms: F,
    namespace: Namespace,
    defaults: SettingDefaults,
}

impl<S: VariableStore, F: FormPublisher> ConfigDriver<S, F> {
    pub fn new(store: S, forms: F, defaults: SettingDefaults) -> Self {
        Self {
            store,
            forms,
            namespace: FWCONFIG_NAMESPACE,
            defaults,
        }
    }

    /// Scope the settings under a different namespace.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Run the boot sequence. `clock` is `None` when the firmware clock
    /// service couldn't be located, which is the only error returned.
    pub fn initialize<C: ClockService>(
        &mut self,
        clock: Option<C>,
    ) -> Result<DriverReport, DriverError> {
        let Some(clock) = clock else {
            error!("[fwconfig] firmware clock service not found");
            return Err(DriverError::ClockServiceUnavailable);
        };

        let table = setting_table(self.namespace, &self.defaults);
        let bootstrap = VariableBootstrapper::new(&mut self.store, table).ensure_defaults();
        if bootstrap.outcome() == Outcome::Degraded {
            let failed: Vec<_> = bootstrap.failures().map(|r| r.setting.name()).collect();
            error!("[fwconfig] couldn't set up NV vars: {}", failed.join(", "));
        }

        let clock = ClockPolicyApplicator::new(
            &self.store,
            clock,
            self.namespace,
            self.defaults.cpu_clock,
        )
        .apply();

        let forms_published = match self.forms.publish(&self.namespace) {
            Ok(()) => true,
            Err(e) => {
                error!("[fwconfig] {e}");
                false
            }
        };

        let report = DriverReport {
            bootstrap,
            clock,
            forms_published,
        };
        match report.outcome() {
            Outcome::Succeeded => info!("[fwconfig] configuration ready"),
            Outcome::Degraded => warn!("[fwconfig] configuration ready (degraded)"),
        }
        Ok(report)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

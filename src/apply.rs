// CLASSIFICATION: COMMUNITY
// Filename: apply.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Applies the persisted `CpuClock` policy through the firmware clock service.
//!
//! Three branches, one tail:
//!
//! * `Unmanaged` leaves the clock alone.
//! * `Maximum` asks the firmware for the ceiling (1.2GHz on a Pi 3, 1.4GHz
//!   on a 3B+, unless `arm_freq` overrides it) and requests it. If the
//!   query fails nothing is requested; there is no fallback to the fixed
//!   tier.
//! * `Fixed` requests [`ClockPolicy::FIXED_RATE`].
//!
//! The effective rate is always read back and logged. No failure here is
//! fatal and nothing is retried.

use log::{debug, error, info, warn};

use crate::bootstrap::Outcome;
use crate::clock::{ClockDomain, ClockPolicy, ClockRate, ClockService};
use crate::error::ClockError;
use crate::settings::SettingId;
use crate::store::{read_u32, Namespace, VariableStore};

/// Result of one [`ClockPolicyApplicator::apply`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    /// Raw policy code that drove the run.
    pub code: u32,
    pub policy: ClockPolicy,
    /// Rate that was requested, if any.
    pub target: Option<ClockRate>,
    /// The firmware accepted `target`.
    pub applied: bool,
    /// Rate read back at the end of the run.
    pub effective: Option<ClockRate>,
    pub errors: Vec<ClockError>,
}

impl ApplyReport {
    pub fn outcome(&self) -> Outcome {
        if self.errors.is_empty() {
            Outcome::Succeeded
        } else {
            Outcome::Degraded
        }
    }
}

pub struct ClockPolicyApplicator<'a, S: ?Sized, C> {
    store: &'a S,
    clock: C,
    namespace: Namespace,
    default_code: u32,
    domain: ClockDomain,
}

impl<'a, S, C> ClockPolicyApplicator<'a, S, C>
where
    S: VariableStore + ?Sized,
    C: ClockService,
{
    /// `default_code` is used when `CpuClock` can't be read from `store`.
    pub fn new(store: &'a S, clock: C, namespace: Namespace, default_code: u32) -> Self {
        Self {
            store,
            clock,
            namespace,
            default_code,
            domain: ClockDomain::Cpu,
        }
    }

    /// Persisted policy code, or the compiled default if it can't be read.
    pub fn policy_code(&self) -> u32 {
        let name = SettingId::CpuClock.name();
        match read_u32(self.store, &self.namespace, name) {
            Ok(code) => code,
            Err(e) => {
                warn!(
                    "[clock] {name} unreadable ({e}), using default policy {}",
                    self.default_code
                );
                self.default_code
            }
        }
    }

    pub fn apply(&mut self) -> ApplyReport {
        let code = self.policy_code();
        let policy = ClockPolicy::from_code(code);
        if !ClockPolicy::is_known_code(code) {
            warn!("[clock] unrecognized policy code {code}, treating as {policy}");
        }
        debug!("[clock] policy code {code} -> {policy}");

        let mut errors = Vec::new();
        let target = self.resolve_target(policy, &mut errors);

        let mut applied = false;
        if let Some(rate) = target {
            info!("[clock] setting {} speed to {rate}", self.domain);
            match self.clock.set_rate(self.domain, rate) {
                Ok(()) => applied = true,
                Err(e) => {
                    error!("[clock] couldn't set the {} speed: {e}", self.domain);
                    errors.push(e);
                }
            }
        }

        let effective = match self.clock.get_rate(self.domain) {
            Ok(rate) => {
                info!("[clock] current {} speed is {rate}", self.domain);
                Some(rate)
            }
            Err(e) => {
                error!("[clock] couldn't get the {} speed: {e}", self.domain);
                errors.push(e);
                None
            }
        };

        ApplyReport {
            code,
            policy,
            target,
            applied,
            effective,
            errors,
        }
    }

    fn resolve_target(
        &mut self,
        policy: ClockPolicy,
        errors: &mut Vec<ClockError>,
    ) -> Option<ClockRate> {
        match policy {
            ClockPolicy::Unmanaged => None,
            ClockPolicy::Fixed => Some(ClockPolicy::FIXED_RATE),
            ClockPolicy::Maximum => match self.clock.get_max_rate(self.domain) {
                Ok(rate) if rate.is_none() => {
                    warn!("[clock] firmware reported no maximum {} speed, leaving as is", self.domain);
                    None
                }
                Ok(rate) => Some(rate),
                Err(e) => {
                    error!(
                        "[clock] couldn't get the max {} speed, leaving as is: {e}",
                        self.domain
                    );
                    errors.push(e);
                    None
                }
            },
        }
    }

    pub fn into_clock(self) -> C {
        self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::sim::SimulatedClock;
    use crate::settings::FWCONFIG_NAMESPACE;
    use crate::store::MemoryStore;

    fn clock() -> SimulatedClock {
        SimulatedClock::new(ClockRate::from_mhz(1200), ClockRate::from_mhz(700))
    }

    #[test]
    fn missing_policy_uses_default_code() {
        let store = MemoryStore::new();
        let mut applicator = ClockPolicyApplicator::new(&store, clock(), FWCONFIG_NAMESPACE, 2);
        let report = applicator.apply();
        assert_eq!(report.code, 2);
        assert_eq!(report.target, Some(ClockRate::from_mhz(1200)));
        assert_eq!(report.effective, Some(ClockRate::from_mhz(1200)));
        assert_eq!(report.outcome(), Outcome::Succeeded);
    }

    #[test]
    fn rejected_request_is_reported_not_fatal() {
        let store = MemoryStore::new().with_u32(FWCONFIG_NAMESPACE, "CpuClock", 1);
        let slow = SimulatedClock::new(ClockRate::from_mhz(400), ClockRate::from_mhz(400));
        let mut applicator = ClockPolicyApplicator::new(&store, slow, FWCONFIG_NAMESPACE, 0);
        let report = applicator.apply();
        assert_eq!(report.target, Some(ClockPolicy::FIXED_RATE));
        assert!(!report.applied);
        assert_eq!(report.effective, Some(ClockRate::from_mhz(400)));
        assert_eq!(report.outcome(), Outcome::Degraded);
    }

    #[test]
    fn zero_max_rate_requests_nothing() {
        let store = MemoryStore::new().with_u32(FWCONFIG_NAMESPACE, "CpuClock", 2);
        let idle = SimulatedClock::new(ClockRate::NONE, ClockRate::from_mhz(600));
        let mut applicator = ClockPolicyApplicator::new(&store, idle, FWCONFIG_NAMESPACE, 0);
        let report = applicator.apply();
        assert_eq!(report.policy, ClockPolicy::Maximum);
        assert_eq!(report.target, None);
        assert!(report.errors.is_empty());
    }
}

// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Firmware clock service interface and the CPU clock policy.

use core::fmt;

use crate::error::ClockError;

pub mod sim;

/// Hardware clock line addressed through the firmware clock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockDomain {
    /// ARM core clock.
    Cpu,
}

impl ClockDomain {
    /// Clock id used by the VideoCore mailbox property interface.
    pub const fn firmware_id(self) -> u32 {
        match self {
            ClockDomain::Cpu => 3,
        }
    }
}

impl fmt::Display for ClockDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockDomain::Cpu => f.write_str("CPU"),
        }
    }
}

/// Frequency in Hz. Zero means no rate was resolved and is never requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockRate(u32);

impl ClockRate {
    pub const NONE: ClockRate = ClockRate(0);

    pub const fn from_hz(hz: u32) -> Self {
        Self(hz)
    }

    pub const fn from_mhz(mhz: u32) -> Self {
        Self(mhz * 1_000_000)
    }

    pub const fn hz(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ClockRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

/// Meaning of the persisted `CpuClock` policy code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPolicy {
    /// Leave the firmware default in place.
    Unmanaged,
    /// Run at whatever the firmware reports as the maximum rate.
    Maximum,
    /// Run at [`ClockPolicy::FIXED_RATE`].
    Fixed,
}

impl ClockPolicy {
    pub const UNMANAGED_CODE: u32 = 0;
    pub const FIXED_CODE: u32 = 1;
    pub const MAXIMUM_CODE: u32 = 2;

    /// The only fixed tier this policy version knows.
    pub const FIXED_RATE: ClockRate = ClockRate::from_mhz(600);

    /// Every non-zero code other than [`Self::MAXIMUM_CODE`] maps to `Fixed`.
    pub const fn from_code(code: u32) -> Self {
        match code {
            Self::UNMANAGED_CODE => ClockPolicy::Unmanaged,
            Self::MAXIMUM_CODE => ClockPolicy::Maximum,
            _ => ClockPolicy::Fixed,
        }
    }

    /// True for the codes the setup forms can actually produce.
    pub const fn is_known_code(code: u32) -> bool {
        matches!(
            code,
            Self::UNMANAGED_CODE | Self::FIXED_CODE | Self::MAXIMUM_CODE
        )
    }
}

impl fmt::Display for ClockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClockPolicy::Unmanaged => "unmanaged",
            ClockPolicy::Maximum => "maximum",
            ClockPolicy::Fixed => "fixed",
        };
        f.write_str(name)
    }
}

/// Narrow view of the firmware clock service.
///
/// Every call blocks until the firmware answers.
pub trait ClockService {
    /// Highest rate the firmware allows for `domain`.
    fn get_max_rate(&mut self, domain: ClockDomain) -> Result<ClockRate, ClockError>;

    /// Request `rate` for `domain`.
    fn set_rate(&mut self, domain: ClockDomain, rate: ClockRate) -> Result<(), ClockError>;

    /// Rate currently in effect for `domain`.
    fn get_rate(&mut self, domain: ClockDomain) -> Result<ClockRate, ClockError>;
}

impl<C: ClockService + ?Sized> ClockService for &mut C {
    fn get_max_rate(&mut self, domain: ClockDomain) -> Result<ClockRate, ClockError> {
        (**self).get_max_rate(domain)
    }

    fn set_rate(&mut self, domain: ClockDomain, rate: ClockRate) -> Result<(), ClockError> {
        (**self).set_rate(domain, rate)
    }

    fn get_rate(&mut self, domain: ClockDomain) -> Result<ClockRate, ClockError> {
        (**self).get_rate(domain)
    }
}

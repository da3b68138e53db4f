// CLASSIFICATION: COMMUNITY
// Filename: sim.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Host stand-in for the firmware clock service.

use log::debug;

use super::{ClockDomain, ClockRate, ClockService};
use crate::error::ClockError;

/// Single CPU clock with a ceiling, as the firmware would report it.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    max: ClockRate,
    current: ClockRate,
}

impl SimulatedClock {
    pub fn new(max: ClockRate, current: ClockRate) -> Self {
        Self { max, current }
    }

    pub fn current(&self) -> ClockRate {
        self.current
    }
}

impl ClockService for SimulatedClock {
    fn get_max_rate(&mut self, domain: ClockDomain) -> Result<ClockRate, ClockError> {
        debug!("[sim-clock] max rate for {domain} is {}", self.max);
        Ok(self.max)
    }

    fn set_rate(&mut self, domain: ClockDomain, rate: ClockRate) -> Result<(), ClockError> {
        if rate.is_none() || rate > self.max {
            return Err(ClockError::RateOutOfRange {
                requested: rate.hz(),
                max: self.max.hz(),
            });
        }
        debug!("[sim-clock] {domain} {} -> {rate}", self.current);
        self.current = rate;
        Ok(())
    }

    fn get_rate(&mut self, _domain: ClockDomain) -> Result<ClockRate, ClockError> {
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rates_above_max() {
        let mut clock = SimulatedClock::new(ClockRate::from_mhz(1200), ClockRate::from_mhz(600));
        let err = clock
            .set_rate(ClockDomain::Cpu, ClockRate::from_mhz(1400))
            .unwrap_err();
        assert_eq!(
            err,
            ClockError::RateOutOfRange {
                requested: 1_400_000_000,
                max: 1_200_000_000
            }
        );
        assert_eq!(clock.current(), ClockRate::from_mhz(600));
    }

    #[test]
    fn accepts_max_rate() {
        let mut clock = SimulatedClock::new(ClockRate::from_mhz(1400), ClockRate::from_mhz(600));
        let max = clock.get_max_rate(ClockDomain::Cpu).unwrap();
        clock.set_rate(ClockDomain::Cpu, max).unwrap();
        assert_eq!(clock.get_rate(ClockDomain::Cpu).unwrap(), max);
    }
}

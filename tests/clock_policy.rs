// CLASSIFICATION: COMMUNITY
// Filename: clock_policy.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
// Purpose: Validate CPU clock policy branches and the readback tail.


use cohesix_fwconfig::{
    ApplyReport, ClockPolicy, ClockPolicyApplicator, ClockRate, Outcome, FWCONFIG_NAMESPACE,
};
use fw_support::{init_logging, ClockCall, RecordingClock, RecordingStore};

fn run(code: u32, clock: &mut RecordingClock) -> ApplyReport {
    init_logging();
    let store = RecordingStore::new().with_u32("CpuClock", code);
    let report = ClockPolicyApplicator::new(&store, clock, FWCONFIG_NAMESPACE, 0).apply();
    report
}

#[test]
fn unmanaged_never_sets_rate() {
    let mut clock = RecordingClock::new(1_400_000_000, 700_000_000);
    let report = run(0, &mut clock);
    assert_eq!(report.policy, ClockPolicy::Unmanaged);
    assert_eq!(clock.calls, [ClockCall::GetRate]);
    assert_eq!(report.effective, Some(ClockRate::from_hz(700_000_000)));
    assert_eq!(report.outcome(), Outcome::Succeeded);
}

#[test]
fn maximum_requests_queried_rate() {
    let mut clock = RecordingClock::new(1_200_000_000, 600_000_000);
    let report = run(2, &mut clock);
    assert_eq!(
        clock.calls,
        [
            ClockCall::GetMaxRate,
            ClockCall::SetRate(1_200_000_000),
            ClockCall::GetRate
        ]
    );
    assert!(report.applied);
    assert_eq!(report.effective, Some(ClockRate::from_hz(1_200_000_000)));
}

#[test]
fn maximum_query_failure_does_not_fall_back() {
    let mut clock = RecordingClock::new(1_200_000_000, 600_000_000).failing_max();
    let report = run(2, &mut clock);
    assert!(clock.set_calls().is_empty());
    assert_eq!(clock.calls, [ClockCall::GetMaxRate, ClockCall::GetRate]);
    assert_eq!(report.target, None);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.outcome(), Outcome::Degraded);
}

#[test]
fn fixed_codes_request_600_mhz() {
    for code in [1, 3, 7, 0xffff_ffff] {
        let mut clock = RecordingClock::new(1_400_000_000, 1_400_000_000);
        let report = run(code, &mut clock);
        assert_eq!(report.policy, ClockPolicy::Fixed, "code {code}");
        assert_eq!(clock.set_calls(), [600_000_000], "code {code}");
        assert_eq!(clock.count(&ClockCall::GetMaxRate), 0);
    }
}

#[test]
fn readback_happens_exactly_once_on_every_branch() {
    for code in [0, 1, 2, 9] {
        let mut clock = RecordingClock::new(1_400_000_000, 600_000_000);
        run(code, &mut clock);
        assert_eq!(clock.count(&ClockCall::GetRate), 1, "code {code}");
        assert_eq!(clock.calls.last(), Some(&ClockCall::GetRate));
    }
}

#[test]
fn set_failure_still_reads_back() {
    let mut clock = RecordingClock::new(1_400_000_000, 600_000_000).failing_set();
    let report = run(1, &mut clock);
    assert!(!report.applied);
    assert_eq!(report.effective, Some(ClockRate::from_hz(600_000_000)));
    assert_eq!(clock.count(&ClockCall::GetRate), 1);
    assert_eq!(report.outcome(), Outcome::Degraded);
}

#[test]
fn readback_failure_is_only_reported() {
    let mut clock = RecordingClock::new(1_400_000_000, 600_000_000).failing_read();
    let report = run(2, &mut clock);
    assert!(report.applied);
    assert_eq!(report.effective, None);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn unreadable_policy_falls_back_to_default_code() {
    init_logging();
    let store = RecordingStore::new().fail_read("CpuClock");
    let mut clock = RecordingClock::new(1_400_000_000, 600_000_000);
    let report = ClockPolicyApplicator::new(&store, &mut clock, FWCONFIG_NAMESPACE, 1).apply();
    assert_eq!(report.code, 1);
    assert_eq!(clock.set_calls(), [600_000_000]);
}

use std::sync::Arc;
use std::time::Duration;
use taskgate_core::{GateState, ManualClock, RateLimiter, SystemClock};

#[test]
fn gate_opens_again_after_full_interval() {
    let clock = Arc::new(ManualClock::new());
    let limiter = RateLimiter::new(Arc::clone(&clock));

    assert!(limiter.can_execute().is_ok());

    clock.set_offset(Duration::from_secs(30));
    let err = limiter.can_execute().unwrap_err();
    assert_eq!(err.retry_after, Duration::from_secs(30));
    assert!(err.to_string().contains("too early"));

    clock.set_offset(Duration::from_secs(61));
    assert!(limiter.can_execute().is_ok());
    assert_eq!(limiter.state(), GateState::Cooling);
}

#[test]
fn system_clock_gate_permits_first_call_only() {
    let limiter = RateLimiter::new(SystemClock);
    assert_eq!(limiter.state(), GateState::Ready);
    assert!(limiter.can_execute().is_ok());
    assert!(limiter.can_execute().is_err());
}

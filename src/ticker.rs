use std::time::Duration;

/// How often the urgency evaluator re-checks today's todos, in seconds
pub const URGENCY_RECHECK_SECS: u64 = 60;

/// How often a waiting timer thread polls its cancellation flag, in milliseconds
pub const TIMER_POLL_MS: u64 = 250;

/// Interval for the periodic urgency re-check
pub fn recheck_interval() -> Duration {
    Duration::from_secs(URGENCY_RECHECK_SECS)
}

/// Poll interval for armed timer threads
pub fn timer_poll_interval() -> Duration {
    Duration::from_millis(TIMER_POLL_MS)
}

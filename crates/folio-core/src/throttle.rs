//! Login attempt throttling.
//!
//! [`LoginThrottle`] counts failed authentication attempts per client
//! identifier (usually an IP address) and blocks that identifier for a
//! while once it hits the threshold. It is best-effort abuse mitigation:
//! state lives in memory only and is lost on restart.
//!
//! Per identifier the lifecycle is:
//!
//! ```text
//! CLEAN --failure--> ACCUMULATING --Nth failure in window--> BLOCKED
//!   ^                     |                                    |
//!   +------success--------+------success / block elapsed-------+
//! ```
//!
//! Accumulation restarts at 1 when the gap since the *previous* failure is
//! longer than the attempt window. Only that one gap is compared; there is
//! no log of individual attempts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Failed attempts allowed before an identifier is blocked.
pub const MAX_ATTEMPTS: u32 = 5;
/// Longest gap between two failures that still counts as consecutive.
pub const ATTEMPT_WINDOW: Duration = Duration::from_secs(5 * 60);
/// How long an identifier stays blocked once the threshold is reached.
pub const BLOCK_DURATION: Duration = Duration::from_secs(15 * 60);

/// Monotonic time source for the throttle.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Thresholds applied by a [`LoginThrottle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub max_attempts: u32,
    pub attempt_window: Duration,
    pub block_duration: Duration,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            attempt_window: ATTEMPT_WINDOW,
            block_duration: BLOCK_DURATION,
        }
    }
}

/// Failure history for a single identifier.
///
/// A record whose `blocked_until` lies in the future always has
/// `count >= max_attempts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub count: u32,
    pub last_attempt_at: Instant,
    pub blocked_until: Option<Instant>,
}

impl AttemptRecord {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 0,
            last_attempt_at: now,
            blocked_until: None,
        }
    }

    fn is_blocked_at(&self, now: Instant) -> bool {
        matches!(self.blocked_until, Some(until) if now < until)
    }

    fn block_elapsed_at(&self, now: Instant) -> bool {
        matches!(self.blocked_until, Some(until) if now >= until)
    }
}

/// Result of [`LoginThrottle::record_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    /// The identifier is now blocked.
    pub blocked: bool,
    /// Failures left before a block; `0` once blocked.
    pub remaining_attempts: u32,
    /// Set only when `blocked` is true.
    pub block_duration: Option<Duration>,
}

impl FailureOutcome {
    fn blocked(block_duration: Duration) -> Self {
        Self {
            blocked: true,
            remaining_attempts: 0,
            block_duration: Some(block_duration),
        }
    }

    /// Block duration in whole milliseconds, as reported to HTTP clients.
    #[must_use]
    pub fn block_duration_ms(&self) -> Option<u64> {
        self.block_duration
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Per-identifier failed-login counter with temporary blocking.
///
/// Each operation touches a single identifier's record under its map shard
/// lock, so concurrent requests from the same client serialize on that
/// record.
pub struct LoginThrottle<C = SystemClock> {
    records: DashMap<String, AttemptRecord>,
    policy: ThrottlePolicy,
    clock: C,
}

impl LoginThrottle {
    /// Creates a throttle with the default policy and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(ThrottlePolicy::default(), SystemClock)
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LoginThrottle<C> {
    #[must_use]
    pub fn with_clock(policy: ThrottlePolicy, clock: C) -> Self {
        Self {
            records: DashMap::new(),
            policy,
            clock,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    /// Returns `true` while a block on `identifier` is in force.
    ///
    /// An elapsed block is discarded here, so the next failure starts from
    /// a clean count.
    pub fn is_blocked(&self, identifier: &str) -> bool {
        self.block_remaining(identifier).is_some()
    }

    /// Time left on the block for `identifier`, if any.
    ///
    /// Has the same lazy-expiry side effect as [`is_blocked`](Self::is_blocked).
    pub fn block_remaining(&self, identifier: &str) -> Option<Duration> {
        let now = self.clock.now();
        let blocked_until = self.records.get(identifier)?.blocked_until?;

        if now < blocked_until {
            return Some(blocked_until - now);
        }

        if self
            .records
            .remove_if(identifier, |_, record| record.block_elapsed_at(now))
            .is_some()
        {
            tracing::debug!(identifier, "login block elapsed, record cleared");
        }
        None
    }

    /// Counts a failed attempt and blocks `identifier` once the threshold
    /// is reached.
    pub fn record_failure(&self, identifier: &str) -> FailureOutcome {
        let now = self.clock.now();
        let policy = self.policy;

        let mut entry = self
            .records
            .entry(identifier.to_string())
            .or_insert_with(|| AttemptRecord::fresh(now));
        let record = entry.value_mut();

        // Callers normally check is_blocked first; don't extend an active block.
        if record.is_blocked_at(now) {
            record.count = record.count.saturating_add(1);
            record.last_attempt_at = now;
            return FailureOutcome::blocked(policy.block_duration);
        }

        if record.block_elapsed_at(now)
            || now.duration_since(record.last_attempt_at) > policy.attempt_window
        {
            *record = AttemptRecord::fresh(now);
        }

        record.count += 1;
        record.last_attempt_at = now;

        if record.count >= policy.max_attempts {
            record.blocked_until = Some(now + policy.block_duration);
            tracing::warn!(
                identifier,
                attempts = record.count,
                block_secs = policy.block_duration.as_secs(),
                "too many failed login attempts, blocking"
            );
            return FailureOutcome::blocked(policy.block_duration);
        }

        tracing::debug!(identifier, attempts = record.count, "failed login recorded");
        FailureOutcome {
            blocked: false,
            remaining_attempts: policy.max_attempts - record.count,
            block_duration: None,
        }
    }

    /// Forgets all failures for `identifier`.
    pub fn record_success(&self, identifier: &str) {
        if self.records.remove(identifier).is_some() {
            tracing::debug!(identifier, "login succeeded, attempt record cleared");
        }
    }

    /// Drops records that no longer affect any decision: elapsed blocks and
    /// accumulations whose last failure is outside the attempt window.
    ///
    /// Returns the number of records removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let window = self.policy.attempt_window;
        let before = self.records.len();

        self.records.retain(|_, record| match record.blocked_until {
            Some(until) => now < until,
            None => now.duration_since(record.last_attempt_at) <= window,
        });

        before.saturating_sub(self.records.len())
    }

    /// Number of identifiers currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of the record for `identifier`.
    #[must_use]
    pub fn record(&self, identifier: &str) -> Option<AttemptRecord> {
        self.records.get(identifier).map(|r| r.value().clone())
    }
}

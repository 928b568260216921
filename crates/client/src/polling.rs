//! Poll bounds and the wait step shared by the lifecycle loops.
//!
//! A [`PollPolicy`] says how often to look and when to give up. The default
//! polls every 5 seconds forever; cancellation through a
//! [`CancellationToken`] is always honoured.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use workshop_config::PollingConfig;
use workshop_config::constants::DEFAULT_POLL_INTERVAL_SECS;

use crate::error::IndexError;

/// Shortest pause between two listings; smaller intervals are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a poll loop paces itself and when it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two listings, never shorter than [`MIN_POLL_INTERVAL`].
    pub interval: Duration,
    /// Maximum number of listings, `None` for no limit.
    pub max_attempts: Option<u32>,
    /// Wall-clock budget measured from the first listing, `None` for no limit.
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: None,
            deadline: None,
        }
    }
}

impl PollPolicy {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.max_attempts.is_some() || self.deadline.is_some()
    }
}

impl From<PollingConfig> for PollPolicy {
    fn from(config: PollingConfig) -> Self {
        Self {
            interval: config.interval,
            max_attempts: config.max_attempts,
            deadline: config.deadline,
        }
    }
}

/// State of one poll loop.
///
/// Call [`Poller::begin_attempt`] before every listing and [`Poller::wait`]
/// when the condition did not hold yet. With `max_attempts = k` exactly `k`
/// listings happen before `PollExhausted`.
pub(crate) struct Poller<'a> {
    policy: &'a PollPolicy,
    cancel: &'a CancellationToken,
    name: &'a str,
    target: &'static str,
    attempts: u32,
    started: Instant,
}

impl<'a> Poller<'a> {
    /// `target` describes the awaited state ("ready", "deleted") in errors.
    pub(crate) fn new(
        policy: &'a PollPolicy,
        cancel: &'a CancellationToken,
        name: &'a str,
        target: &'static str,
    ) -> Self {
        Self {
            policy,
            cancel,
            name,
            target,
            attempts: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    fn cancelled(&self) -> IndexError {
        IndexError::Cancelled {
            name: self.name.to_string(),
        }
    }

    /// Account for the listing about to be made.
    pub(crate) fn begin_attempt(&mut self) -> Result<(), IndexError> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled());
        }
        self.attempts += 1;
        Ok(())
    }

    /// Sleep until the next listing is due, or fail if the budget is spent.
    ///
    /// The sleep is shortened so the last listing lands on the deadline.
    pub(crate) async fn wait(&mut self) -> Result<(), IndexError> {
        if let Some(max) = self.policy.max_attempts
            && self.attempts >= max
        {
            return Err(IndexError::PollExhausted {
                name: self.name.to_string(),
                target: self.target,
                attempts: self.attempts,
            });
        }

        let mut pause = self.policy.interval.max(MIN_POLL_INTERVAL);
        if let Some(deadline) = self.policy.deadline {
            let elapsed = self.started.elapsed();
            if elapsed >= deadline {
                return Err(IndexError::PollTimedOut {
                    name: self.name.to_string(),
                    target: self.target,
                    elapsed,
                });
            }
            pause = pause.min(deadline - elapsed);
        }

        tokio::select! {
            _ = self.cancel.cancelled() => Err(self.cancelled()),
            _ = tokio::time::sleep(pause) => Ok(()),
        }
    }
}

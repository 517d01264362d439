//! # Jobs
//!
//! What a caller hands the scheduler ([`Schedule`]) and what a job body
//! receives on every run ([`TaskParameters`]).

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::JobResult;

/// Priority used when the caller does not pick one. Lower runs first.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Opaque handle to a scheduled job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub(crate) u64);

impl JobId {
    /// Raw numeric id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// The value passed to a job body on every run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskParameters<C> {
    /// Caller payload given at schedule time.
    pub command: C,
    /// When this run was *due*, not when it actually started.
    pub scheduled_time: SystemTime,
    /// The job being run.
    pub job_id: JobId,
    /// How many times the job has fired, this run included.
    pub run_count: u64,
}

/// When and how often a job runs.
///
/// ```
/// use std::time::Duration;
/// use g19_scheduler::Schedule;
///
/// let poll = Schedule::every(Duration::from_millis(10)).with_priority(0);
/// assert_eq!(poll.priority, 0);
/// assert!(Schedule::once().is_one_shot());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Period between runs. Zero means run once.
    pub interval: Duration,
    /// Reference time. Periodic jobs first fire at `start + interval`,
    /// one-shot jobs at `start`.
    pub start: Option<SystemTime>,
    /// Tie-break between jobs due at the same instant.
    pub priority: i32,
}

impl Schedule {
    /// A periodic job with [`DEFAULT_PRIORITY`], aligned to the wall clock.
    #[must_use]
    pub const fn every(interval: Duration) -> Self {
        Self {
            interval,
            start: None,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// A job that fires once, immediately unless a start is given.
    #[must_use]
    pub const fn once() -> Self {
        Self::every(Duration::ZERO)
    }

    /// Sets the reference time.
    #[must_use]
    pub const fn starting_at(mut self, start: SystemTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// True for run-once jobs.
    #[must_use]
    pub const fn is_one_shot(&self) -> bool {
        self.interval.is_zero()
    }

    /// First deadline of a job scheduled at `now`.
    ///
    /// Without an explicit start, periodic jobs snap to the next wall-clock
    /// multiple of their interval so jobs sharing an interval fire together.
    #[must_use]
    pub fn first_run(&self, now: SystemTime) -> SystemTime {
        if self.is_one_shot() {
            return self.start.unwrap_or(now);
        }
        let start = self.start.unwrap_or_else(|| snap_to_interval(now, self.interval));
        start + self.interval
    }
}

/// `floor(now / interval) * interval`, measured from the Unix epoch.
fn snap_to_interval(now: SystemTime, interval: Duration) -> SystemTime {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
    let nanos = since_epoch.as_nanos();
    let floored = nanos - nanos % interval.as_nanos();
    UNIX_EPOCH + duration_from_nanos(floored)
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    // Always < 1e9, fits in u32.
    let sub = u32::try_from(nanos % NANOS_PER_SEC).unwrap_or(0);
    Duration::new(secs, sub)
}

pub(crate) type Callback<C> = Box<dyn FnMut(&TaskParameters<C>) -> JobResult + Send + 'static>;

/// Work attached to a job.
pub(crate) enum JobTask<C> {
    /// A caller body run on the scheduler thread with its payload.
    Callback {
        /// Cloned into every run's [`TaskParameters`].
        command: C,
        /// The body.
        body: Callback<C>,
    },
    /// Ends the scheduler loop.
    Stop,
}

/// A job as stored on the heap. Owned by the scheduler alone.
pub(crate) struct Job<C> {
    pub(crate) id: JobId,
    pub(crate) next_run: SystemTime,
    pub(crate) priority: i32,
    pub(crate) interval: Duration,
    pub(crate) run_count: u64,
    pub(crate) task: JobTask<C>,
}

impl<C> Job<C> {
    /// Heap ordering key: deadline, then priority, then id.
    pub(crate) fn key(&self) -> (SystemTime, i32, JobId) {
        (self.next_run, self.priority, self.id)
    }
}

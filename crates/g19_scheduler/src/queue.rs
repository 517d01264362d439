//! # Job Queue
//!
//! The heap plus the live-job index, without any locking or threads. The
//! scheduler wraps it in a mutex; tests drive it directly.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::SystemTime;

use tracing::trace;

use crate::job::{Job, JobId};

/// Heap entry ordered so the *earliest* key sits on top of the max-heap.
struct Entry<C>(Job<C>);

impl<C> PartialEq for Entry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.0.key() == other.0.key()
    }
}

impl<C> Eq for Entry<C> {}

impl<C> PartialOrd for Entry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Entry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.key().cmp(&self.0.key())
    }
}

/// Pending jobs ordered by `(next_run, priority, id)`.
pub(crate) struct JobQueue<C> {
    heap: BinaryHeap<Entry<C>>,
    /// Live jobs and whether they have been stopped.
    live: HashMap<JobId, bool>,
}

impl<C> JobQueue<C> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    /// Adds a freshly scheduled job.
    pub(crate) fn insert(&mut self, job: Job<C>) {
        self.live.insert(job.id, false);
        self.heap.push(Entry(job));
    }

    /// Marks a job stopped. Returns whether it is still known.
    pub(crate) fn stop(&mut self, id: JobId) -> bool {
        match self.live.get_mut(&id) {
            Some(stopped) => {
                *stopped = true;
                true
            }
            None => false,
        }
    }

    /// Deadline of the head job.
    pub(crate) fn next_deadline(&self) -> Option<SystemTime> {
        self.heap.peek().map(|entry| entry.0.next_run)
    }

    /// Pops the head job if it is due at `now`, discarding stopped jobs on the way.
    pub(crate) fn pop_due(&mut self, now: SystemTime) -> Option<Job<C>> {
        loop {
            if self.heap.peek()?.0.next_run > now {
                return None;
            }
            let Entry(job) = self.heap.pop()?;
            if self.live.get(&job.id).copied().unwrap_or(true) {
                self.live.remove(&job.id);
                trace!(job = job.id.raw(), "discarded stopped job");
                continue;
            }
            return Some(job);
        }
    }

    /// Returns a job after it ran: periodic jobs go back on the heap at
    /// `next_run + interval`, one-shot jobs leave the index.
    pub(crate) fn finish(&mut self, mut job: Job<C>) {
        if job.interval.is_zero() {
            self.live.remove(&job.id);
            return;
        }
        job.next_run += job.interval;
        self.heap.push(Entry(job));
    }

    /// Number of jobs in the live index.
    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }
}

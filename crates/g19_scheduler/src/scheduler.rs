//! # Scheduler
//!
//! One loop thread, one heap, one condition variable.
//!
//! Job bodies run on the loop thread with the heap lock *released*, so a
//! body may schedule or stop jobs (including itself) without deadlocking.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use crossbeam_channel::Sender;
use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, error, info, trace};

use crate::error::{JobError, JobResult, SchedulerError, SchedulerResult};
use crate::handoff::{offer, Offer};
use crate::job::{Job, JobId, JobTask, Schedule, TaskParameters};
use crate::queue::JobQueue;

/// Counters maintained by the loop thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Job bodies executed.
    pub runs: u64,
    /// Job bodies that returned an error or panicked.
    pub failures: u64,
}

struct State<C> {
    queue: JobQueue<C>,
    next_id: u64,
}

struct Shared<C> {
    state: Mutex<State<C>>,
    wakeup: Condvar,
    running: AtomicBool,
    runs: AtomicU64,
    failures: AtomicU64,
}

/// Thread-safe periodic job scheduler.
///
/// `C` is the payload handed back to every run of a job.
pub struct Scheduler<C: Clone + Send + 'static> {
    shared: Arc<Shared<C>>,
    thread: Option<JoinHandle<()>>,
}

impl<C: Clone + Send + 'static> Scheduler<C> {
    /// Starts the loop thread.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Spawn`] if the OS refuses the thread.
    pub fn new() -> SchedulerResult<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                queue: JobQueue::new(),
                next_id: 0,
            }),
            wakeup: Condvar::new(),
            running: AtomicBool::new(true),
            runs: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        });

        let loop_shared = Arc::clone(&shared);
        let thread = thread::Builder::new()
            .name("g19-scheduler".into())
            .spawn(move || run_loop(&loop_shared))
            .map_err(SchedulerError::Spawn)?;

        info!("scheduler started");
        Ok(Self {
            shared,
            thread: Some(thread),
        })
    }

    /// Schedules `callback` to run on the scheduler thread.
    ///
    /// Errors and panics from `callback` are logged and counted; the job
    /// keeps its cadence.
    pub fn schedule_synchronous<F>(&self, schedule: Schedule, command: C, callback: F) -> JobId
    where
        F: FnMut(&TaskParameters<C>) -> JobResult + Send + 'static,
    {
        self.insert(
            schedule,
            JobTask::Callback {
                command,
                body: Box::new(callback),
            },
        )
    }

    /// Schedules a job that posts its [`TaskParameters`] to `queue`.
    ///
    /// Posting never blocks: a full queue drops the tick.
    pub fn schedule_to_queue<T>(&self, schedule: Schedule, command: C, queue: Sender<T>) -> JobId
    where
        T: From<TaskParameters<C>> + Send + 'static,
    {
        self.schedule_synchronous(schedule, command, move |params| {
            match offer(&queue, T::from(params.clone())) {
                Offer::Delivered => {}
                Offer::Dropped => trace!(job = params.job_id.raw(), "queue full, tick dropped"),
                Offer::Disconnected => trace!(job = params.job_id.raw(), "queue closed, tick dropped"),
            }
            Ok(())
        })
    }

    /// Marks a job stopped. Idempotent; returns whether the job existed.
    pub fn stop_job(&self, id: JobId) -> bool {
        let existed = self.shared.state.lock().queue.stop(id);
        self.shared.wakeup.notify_one();
        debug!(job = id.raw(), existed, "job stopped");
        existed
    }

    /// Asks the loop to exit once everything already due has run.
    pub fn stop_scheduler(&self) {
        let schedule = Schedule::once()
            .starting_at(SystemTime::now())
            .with_priority(i32::MAX);
        self.insert(schedule, JobTask::Stop);
    }

    /// Stops the loop and waits for the thread to exit.
    pub fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.stop_scheduler();
            if thread.join().is_err() {
                error!("scheduler thread panicked");
            }
            info!("scheduler stopped");
        }
    }

    /// True until the loop has processed a stop request.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Jobs still in the live index (stopped jobs count until discarded).
    #[must_use]
    pub fn job_count(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Snapshot of the loop counters.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            runs: self.shared.runs.load(Ordering::Relaxed),
            failures: self.shared.failures.load(Ordering::Relaxed),
        }
    }

    fn insert(&self, schedule: Schedule, task: JobTask<C>) -> JobId {
        let mut state = self.shared.state.lock();
        let id = JobId(state.next_id);
        state.next_id += 1;
        let next_run = schedule.first_run(SystemTime::now());
        state.queue.insert(Job {
            id,
            next_run,
            priority: schedule.priority,
            interval: schedule.interval,
            run_count: 0,
            task,
        });
        drop(state);
        self.shared.wakeup.notify_one();
        debug!(
            job = id.raw(),
            interval_ms = schedule.interval.as_millis(),
            priority = schedule.priority,
            "job scheduled"
        );
        id
    }
}

impl<C: Clone + Send + 'static> Drop for Scheduler<C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop<C: Clone>(shared: &Shared<C>) {
    let mut state = shared.state.lock();
    while shared.running.load(Ordering::Acquire) {
        let now = SystemTime::now();
        match state.queue.next_deadline() {
            None => {
                shared.wakeup.wait(&mut state);
                continue;
            }
            Some(deadline) if deadline > now => {
                let timeout = deadline.duration_since(now).unwrap_or(Duration::ZERO);
                shared.wakeup.wait_for(&mut state, timeout);
                continue;
            }
            Some(_) => {}
        }

        while let Some(mut job) = state.queue.pop_due(now) {
            MutexGuard::unlocked(&mut state, || execute(shared, &mut job));
            state.queue.finish(job);
            if !shared.running.load(Ordering::Acquire) {
                break;
            }
        }
    }
}

fn execute<C: Clone>(shared: &Shared<C>, job: &mut Job<C>) {
    job.run_count += 1;
    let (command, body) = match &mut job.task {
        JobTask::Stop => {
            shared.running.store(false, Ordering::Release);
            return;
        }
        JobTask::Callback { command, body } => (command.clone(), body),
    };
    let params = TaskParameters {
        command,
        scheduled_time: job.next_run,
        job_id: job.id,
        run_count: job.run_count,
    };

    shared.runs.fetch_add(1, Ordering::Relaxed);
    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| body(&params))) {
        Ok(result) => result,
        Err(payload) => Err(panic_message(payload.as_ref())),
    };
    if let Err(err) = outcome {
        shared.failures.fetch_add(1, Ordering::Relaxed);
        error!(
            job = params.job_id.raw(),
            run_count = params.run_count,
            error = %err,
            "job failed"
        );
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> JobError {
    let text = payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "job panicked".to_string());
    format!("panic: {text}").into()
}

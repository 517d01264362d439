//! # G19 Scheduler
//!
//! A thread-safe heap of periodic jobs that never drifts.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    SCHEDULER THREAD                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  wait(head.next_run - now) ──► pop all due ──► run each   │
//! │        ▲                                          │       │
//! │        └──── reinsert at next_run + interval ◄────┘       │
//! └──────────────────────────────────────────────────────────┘
//!          │ schedule_to_queue (try_send, drop newest)
//!          ▼
//!   bounded crossbeam channel ──► consumer thread
//! ```
//!
//! The next deadline always derives from the previous *scheduled* time, so
//! a slow callback or a late wakeup never shifts the cadence.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod handoff;
pub mod job;
mod queue;
pub mod scheduler;

pub use error::{JobError, JobResult, SchedulerError, SchedulerResult};
pub use handoff::{offer, Offer};
pub use job::{JobId, Schedule, TaskParameters, DEFAULT_PRIORITY};
pub use scheduler::{Scheduler, SchedulerStats};

//! # Key Listener
//!
//! A dedicated reader thread woken by a scheduler job. Each wakeup does
//! both interrupt reads and forwards the resulting edges to the main queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use g19_device::{Simulator, UsbTransport, G19};
use g19_scheduler::{JobId, Schedule, Scheduler, TaskParameters};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::error::{InputError, InputResult};
use crate::translator::{Key, KeyEvent, KeyTranslator};

/// Key polls win ties against every other job.
pub const KEY_POLL_PRIORITY: i32 = 0;

/// How long the reader waits for a tick before rechecking its stop flag.
const IDLE_RECHECK: Duration = Duration::from_millis(100);

/// Where key masks come from.
pub trait KeySource: Send + Sync + 'static {
    /// Display key mask, `None` when nothing was reported.
    fn read_display_keys(&self) -> Option<u8>;
    /// G/M key mask, `None` when nothing usable was reported.
    fn read_g_keys(&self) -> Option<u32>;
}

impl<T: UsbTransport + 'static> KeySource for G19<T> {
    fn read_display_keys(&self) -> Option<u8> {
        self.read_display_menu_keys()
    }

    fn read_g_keys(&self) -> Option<u32> {
        self.read_g_and_m_keys()
    }
}

/// The simulator has no keys.
impl KeySource for Simulator {
    fn read_display_keys(&self) -> Option<u8> {
        None
    }

    fn read_g_keys(&self) -> Option<u32> {
        None
    }
}

/// Handle to the running key reader.
pub struct KeyListener {
    job: JobId,
    running: Arc<AtomicBool>,
    translator: Arc<Mutex<KeyTranslator>>,
    thread: Option<JoinHandle<()>>,
}

impl KeyListener {
    /// Schedules the poll job and starts the reader thread.
    ///
    /// Key events are delivered to `events` with a blocking send so no
    /// edge is lost; the reader exits when `events` disconnects.
    ///
    /// # Errors
    ///
    /// [`InputError::Spawn`] if the thread cannot be started. The poll job
    /// is stopped again in that case.
    pub fn spawn<C, S, M>(
        scheduler: &Scheduler<C>,
        interval: Duration,
        poll_command: C,
        source: Arc<S>,
        events: Sender<M>,
    ) -> InputResult<Self>
    where
        C: Clone + Send + 'static,
        S: KeySource + ?Sized,
        M: From<KeyEvent> + Send + 'static,
    {
        let (poll_tx, poll_rx) = bounded::<TaskParameters<C>>(1);
        let job = scheduler.schedule_to_queue(
            Schedule::every(interval).with_priority(KEY_POLL_PRIORITY),
            poll_command,
            poll_tx,
        );

        let running = Arc::new(AtomicBool::new(true));
        let translator = Arc::new(Mutex::new(KeyTranslator::new()));
        let reader = Reader {
            polls: poll_rx,
            source,
            events,
            running: Arc::clone(&running),
            translator: Arc::clone(&translator),
        };

        let thread = thread::Builder::new()
            .name("g19-keys".into())
            .spawn(move || reader.run())
            .map_err(|err| {
                scheduler.stop_job(job);
                InputError::Spawn(err)
            })?;

        info!(job = job.raw(), interval_ms = interval.as_millis(), "key listener started");
        Ok(Self {
            job,
            running,
            translator,
            thread: Some(thread),
        })
    }

    /// Poll job id.
    #[must_use]
    pub const fn job(&self) -> JobId {
        self.job
    }

    /// Keys currently held.
    #[must_use]
    pub fn pressed_keys(&self) -> Vec<Key> {
        self.translator.lock().pressed()
    }

    /// Cancels the poll job and joins the reader.
    pub fn stop<C: Clone + Send + 'static>(&mut self, scheduler: &Scheduler<C>) {
        scheduler.stop_job(self.job);
        self.join();
    }

    fn join(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("key reader thread panicked");
            }
            info!("key listener stopped");
        }
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        self.join();
    }
}

struct Reader<C, S: ?Sized, M> {
    polls: Receiver<TaskParameters<C>>,
    source: Arc<S>,
    events: Sender<M>,
    running: Arc<AtomicBool>,
    translator: Arc<Mutex<KeyTranslator>>,
}

impl<C, S: KeySource + ?Sized, M: From<KeyEvent>> Reader<C, S, M> {
    fn run(self) {
        while self.running.load(Ordering::Acquire) {
            match self.polls.recv_timeout(IDLE_RECHECK) {
                Ok(tick) => {
                    trace!(run = tick.run_count, "key poll");
                    if !self.poll() {
                        debug!("main queue closed, key reader exiting");
                        return;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }

    /// One poll of both groups. Returns false once nobody listens.
    fn poll(&self) -> bool {
        let display = self.source.read_display_keys();
        let g = self.source.read_g_keys();
        let events = self.translator.lock().translate(display, g);
        events
            .into_iter()
            .all(|event| self.events.send(M::from(event)).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::KeyEdge;
    use crossbeam_channel::unbounded;
    use g19_device::DisplayKey;
    use std::collections::VecDeque;

    struct Scripted {
        display: Mutex<VecDeque<Option<u8>>>,
    }

    impl KeySource for Scripted {
        fn read_display_keys(&self) -> Option<u8> {
            self.display.lock().pop_front().flatten()
        }

        fn read_g_keys(&self) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_polls_and_translates() {
        let scheduler = Scheduler::new().unwrap();
        let source = Arc::new(Scripted {
            display: Mutex::new(VecDeque::from([
                Some(0),
                Some(DisplayKey::Ok.bit()),
                None,
                Some(0),
            ])),
        });
        let (tx, rx) = unbounded::<KeyEvent>();
        let mut listener =
            KeyListener::spawn(&scheduler, Duration::from_millis(2), "poll", source, tx).unwrap();

        let down = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(down, KeyEvent::down(Key::Display(DisplayKey::Ok)));
        let up = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(up.edge, KeyEdge::Up);

        listener.stop(&scheduler);
        assert!(listener.pressed_keys().is_empty());
    }

    #[test]
    fn test_simulator_has_no_keys() {
        let sim = Simulator::new();
        assert_eq!(sim.read_display_keys(), None);
        assert_eq!(sim.read_g_keys(), None);
    }
}

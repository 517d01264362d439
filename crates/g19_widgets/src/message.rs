//! # Main Queue Messages

use g19_input::KeyEvent;
use g19_scheduler::TaskParameters;

use crate::tree::WidgetId;

/// Handle to a widget timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(crate) u64);

/// Payload of scheduler jobs feeding the main queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Repaint if dirty and push the frame.
    Update,
    /// Wake the key reader.
    KeyPoll,
    /// A widget timer fired.
    Timer(TimerToken),
}

/// Everything the main thread consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// A scheduler tick.
    Tick(TaskParameters<Command>),
    /// A decoded key edge.
    Key(KeyEvent),
    /// Data a fetcher delivered asynchronously for a widget.
    Fetched {
        /// Widget that asked for it.
        target: WidgetId,
        /// The payload.
        data: Vec<u8>,
    },
}

impl From<TaskParameters<Command>> for Message {
    fn from(params: TaskParameters<Command>) -> Self {
        Self::Tick(params)
    }
}

impl From<KeyEvent> for Message {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

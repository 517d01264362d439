//! # Bounded Handoff
//!
//! Cross-thread delivery that never blocks the sender. When the queue is
//! full the item being offered is discarded (drop-newest): whatever is
//! already queued is at least as fresh as the consumer can use.

use crossbeam_channel::{Sender, TrySendError};

/// Outcome of [`offer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    /// The item was queued.
    Delivered,
    /// The queue was full; the item was dropped.
    Dropped,
    /// The receiving side is gone.
    Disconnected,
}

/// Queues `item` if there is room, dropping it otherwise.
pub fn offer<T>(queue: &Sender<T>, item: T) -> Offer {
    match queue.try_send(item) {
        Ok(()) => Offer::Delivered,
        Err(TrySendError::Full(_)) => Offer::Dropped,
        Err(TrySendError::Disconnected(_)) => Offer::Disconnected,
    }
}

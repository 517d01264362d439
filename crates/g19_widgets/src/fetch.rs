//! # Fetcher Seam
//!
//! Widgets that show remote data (images, feeds) ask a caching fetcher for
//! bytes. A cache hit comes back immediately; a miss completes later on the
//! fetcher's own thread, and the bytes are funnelled back to the main thread
//! through the mailbox as [`Message::Fetched`](crate::message::Message::Fetched).

use std::time::Duration;

/// Called once with the downloaded bytes.
pub type FetchCallback = Box<dyn FnOnce(Vec<u8>) + Send>;

/// A caching downloader.
pub trait Fetcher: Send + Sync {
    /// Returns the cached bytes for `url` if they are younger than
    /// `max_age`. Otherwise starts a download, returns `None`, and calls
    /// `on_complete` from any thread once the bytes arrive.
    fn get(&self, url: &str, on_complete: FetchCallback, max_age: Duration) -> Option<Vec<u8>>;
}

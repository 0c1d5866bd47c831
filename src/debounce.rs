//! Trailing-edge debouncing of input values.

use std::time::Duration;
use tokio::sync::mpsc;

/// Yields the latest value from a channel once it has been quiet for `interval`.
pub struct Debouncer<T> {
    rx: mpsc::Receiver<T>,
    interval: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(rx: mpsc::Receiver<T>, interval: Duration) -> Self {
        Self { rx, interval }
    }

    /// Wait for the next settled value.
    ///
    /// Every new value restarts the quiet period. When the sender side closes,
    /// a pending value is returned immediately and the following call yields `None`.
    pub async fn next(&mut self) -> Option<T> {
        let mut pending = self.rx.recv().await?;
        loop {
            tokio::select! {
                received = self.rx.recv() => match received {
                    Some(value) => pending = value,
                    None => return Some(pending),
                },
                _ = tokio::time::sleep(self.interval) => return Some(pending),
            }
        }
    }
}

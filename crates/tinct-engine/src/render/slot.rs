//! Latest-value handoff between driver threads and the draw thread.
//!
//! Writers never block and never mutate a value in place: they push a whole new
//! value and evict whatever the reader has not picked up yet. The reader drains
//! pending values at the start of a frame and keeps the newest. With more than
//! one writer the last push wins; writers needing an order must serialize
//! themselves.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Reader side, owned by the draw loop.
#[derive(Debug)]
pub struct LatestSlot<T> {
    handle: LatestHandle<T>,
    current: Option<T>,
}

/// Cloneable writer side.
#[derive(Debug)]
pub struct LatestHandle<T> {
    tx: Sender<T>,
    // Kept so a writer can evict a stale value when the channel is full.
    rx: Receiver<T>,
}

impl<T> Clone for LatestHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T> LatestHandle<T> {
    /// Publishes `value`, replacing any value not yet observed by the reader.
    pub fn publish(&self, mut value: T) {
        loop {
            match self.tx.try_send(value) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    // Another writer or a stale value occupies the slot; drop it.
                    let _ = self.rx.try_recv();
                    value = rejected;
                }
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self {
            handle: LatestHandle { tx, rx },
            current: None,
        }
    }

    /// A new writer for this slot.
    pub fn handle(&self) -> LatestHandle<T> {
        self.handle.clone()
    }

    /// Picks up pending values and returns the newest one seen so far.
    pub fn latest(&mut self) -> Option<&T> {
        while let Ok(next) = self.handle.rx.try_recv() {
            self.current = Some(next);
        }
        self.current.as_ref()
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn empty_until_first_publish() {
        let mut slot: LatestSlot<u32> = LatestSlot::new();
        assert_eq!(slot.latest(), None);
    }

    #[test]
    fn last_publish_wins() {
        let mut slot = LatestSlot::new();
        let handle = slot.handle();
        handle.publish(1);
        handle.publish(2);
        handle.publish(3);
        assert_eq!(slot.latest(), Some(&3));
    }

    #[test]
    fn value_persists_without_new_publishes() {
        let mut slot = LatestSlot::new();
        slot.handle().publish("a");
        assert_eq!(slot.latest(), Some(&"a"));
        assert_eq!(slot.latest(), Some(&"a"));
    }

    #[test]
    fn concurrent_writers_never_tear() {
        // Each value carries the same number twice; a torn read would mismatch.
        let mut slot: LatestSlot<Arc<(u64, u64)>> = LatestSlot::new();

        let writers: Vec<_> = (0..4u64)
            .map(|w| {
                let handle = slot.handle();
                thread::spawn(move || {
                    for i in 0..2_000u64 {
                        let n = w * 1_000_000 + i;
                        handle.publish(Arc::new((n, n)));
                    }
                })
            })
            .collect();

        while writers.iter().any(|w| !w.is_finished()) {
            if let Some(v) = slot.latest() {
                assert_eq!(v.0, v.1);
            }
        }
        for w in writers {
            w.join().unwrap();
        }

        let last = slot.latest().unwrap();
        assert_eq!(last.0, last.1);
        // Every writer's final publish is the last thing it sends.
        assert_eq!(last.0 % 1_000_000, 1_999);
    }
}

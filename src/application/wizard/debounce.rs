//! Debounced persistence: the last change in a quiet window wins.

use std::future::Future;
use std::time::Duration;

use super::scheduled_task::{ScheduledTask, TimerSlot};

/// Resets a single write timer on every change.
///
/// The owner supplies the write future each time; only the one armed last
/// survives. When it wakes it must call [`fire`](DebouncedWriter::fire) with
/// its generation and skip the write if that returns false.
#[derive(Debug)]
pub struct DebouncedWriter {
    slot: TimerSlot,
    delay: Duration,
}

impl DebouncedWriter {
    pub fn new(delay: Duration) -> Self {
        Self {
            slot: TimerSlot::new(),
            delay,
        }
    }

    /// Supersedes any pending write with a new one `delay` from now.
    pub fn schedule<F, Fut>(&mut self, write: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.slot.next_generation();
        self.slot.arm(ScheduledTask::after(self.delay, write(generation)));
    }

    /// Drops the pending write. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.slot.cancel()
    }

    /// Claims the pending write for the waking task.
    pub fn fire(&mut self, generation: u64) -> bool {
        self.slot.fire(generation)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Sink {
        writes: Vec<u32>,
    }

    struct Harness {
        writer: DebouncedWriter,
        value: u32,
        sink: Sink,
    }

    fn change(harness: &Arc<Mutex<Harness>>, guard: &mut Harness, value: u32) {
        guard.value = value;
        let shared = Arc::clone(harness);
        guard.writer.schedule(move |generation| async move {
            let mut h = shared.lock().await;
            if h.writer.fire(generation) {
                let value = h.value;
                h.sink.writes.push(value);
            }
        });
    }

    fn harness(delay_ms: u64) -> Arc<Mutex<Harness>> {
        Arc::new(Mutex::new(Harness {
            writer: DebouncedWriter::new(Duration::from_millis(delay_ms)),
            value: 0,
            sink: Sink::default(),
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_changes_collapse_into_one_write_of_final_value() {
        let h = harness(800);
        {
            let mut guard = h.lock().await;
            for value in 1..=5 {
                change(&h, &mut guard, value);
            }
        }

        tokio::time::sleep(Duration::from_millis(900)).await;

        let guard = h.lock().await;
        assert_eq!(guard.sink.writes, vec![5]);
        assert!(!guard.writer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn each_change_resets_the_window() {
        let h = harness(800);
        for value in 1..=3 {
            {
                let mut guard = h.lock().await;
                change(&h, &mut guard, value);
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        assert!(h.lock().await.sink.writes.is_empty());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(h.lock().await.sink.writes, vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_windows_write_separately() {
        let h = harness(100);
        {
            let mut guard = h.lock().await;
            change(&h, &mut guard, 1);
        }
        tokio::time::sleep(Duration::from_millis(150)).await;
        {
            let mut guard = h.lock().await;
            change(&h, &mut guard, 2);
        }
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(h.lock().await.sink.writes, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_write() {
        let h = harness(800);
        {
            let mut guard = h.lock().await;
            change(&h, &mut guard, 7);
            assert!(guard.writer.is_pending());
            assert!(guard.writer.cancel());
        }

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(h.lock().await.sink.writes.is_empty());
    }
}

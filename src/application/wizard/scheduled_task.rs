//! Cancellable delayed tasks.
//!
//! `ScheduledTask` runs a future after a delay on the tokio runtime. Dropping
//! or cancelling the handle aborts the task if it has not finished.
//! `TimerSlot` holds at most one pending task of a class and a generation
//! counter, so a task that was superseded between waking and acquiring the
//! session lock can tell it is stale.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a future scheduled after a delay.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawns `task` to run once `delay` has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Aborts the task. No effect if it already ran.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Lets the task run to completion without holding it.
    ///
    /// A running task uses this on its own handle so that dropping the
    /// handle does not abort the task mid-flight.
    pub fn release(mut self) {
        self.handle.take();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// One pending task plus the generation it was armed with.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<ScheduledTask>,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever is pending and returns the generation a new task
    /// must carry.
    pub fn next_generation(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    /// Stores the task armed with the generation from [`next_generation`].
    ///
    /// [`next_generation`]: TimerSlot::next_generation
    pub fn arm(&mut self, task: ScheduledTask) {
        self.pending = Some(task);
    }

    /// Aborts the pending task and invalidates its generation.
    ///
    /// Returns true if a task was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        match self.pending.take() {
            Some(task) => {
                task.cancel();
                true
            }
            None => false,
        }
    }

    /// Claims the slot for a task that has woken up.
    ///
    /// Returns false if the task was superseded or cancelled. On success the
    /// slot is empty again and the task's own handle is released.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        if let Some(task) = self.pending.take() {
            task.release();
        }
        self.generation = self.generation.wrapping_add(1);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::after(Duration::from_millis(500), counting_task(&counter));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        drop(task);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task = ScheduledTask::after(Duration::from_millis(100), counting_task(&counter));

        task.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        drop(ScheduledTask::after(Duration::from_millis(100), counting_task(&counter)));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn released_task_still_runs() {
        let counter = Arc::new(AtomicUsize::new(0));
        ScheduledTask::after(Duration::from_millis(100), counting_task(&counter)).release();

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slot_rejects_stale_generation() {
        let mut slot = TimerSlot::new();

        let first = slot.next_generation();
        slot.arm(ScheduledTask::after(Duration::from_secs(1), async {}));
        let second = slot.next_generation();
        slot.arm(ScheduledTask::after(Duration::from_secs(1), async {}));

        assert_ne!(first, second);
        assert!(!slot.fire(first));
        assert!(slot.is_armed());
        assert!(slot.fire(second));
        assert!(!slot.is_armed());
        assert!(!slot.fire(second), "a generation fires at most once");
    }

    #[tokio::test(start_paused = true)]
    async fn slot_cancel_reports_pending() {
        let mut slot = TimerSlot::new();
        assert!(!slot.cancel());

        let generation = slot.next_generation();
        slot.arm(ScheduledTask::after(Duration::from_secs(1), async {}));

        assert!(slot.cancel());
        assert!(!slot.is_armed());
        assert!(!slot.fire(generation));
    }
}

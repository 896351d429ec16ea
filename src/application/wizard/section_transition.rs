//! SectionTransitionController - timers for the section interstitial.
//!
//! The phase machine decides *whether* a transition happens; this type owns
//! the two fixed timers that drive it: the announcement dwell and the exit
//! animation. Neither duration is configurable and the user cannot skip
//! them; only teardown cancels.

use std::future::Future;
use std::time::Duration;

use crate::domain::questionnaire::{SectionId, TransitionStage};

use super::scheduled_task::{ScheduledTask, TimerSlot};

/// How long the interstitial stays on screen.
pub const DWELL: Duration = Duration::from_millis(2000);

/// How long the interstitial takes to animate out.
pub const EXIT: Duration = Duration::from_millis(500);

/// Which transition timer is running, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTimer {
    Idle,
    Running {
        section: SectionId,
        stage: TransitionStage,
    },
}

/// Owns the dwell and exit timers of one wizard.
#[derive(Debug)]
pub struct SectionTransitionController {
    slot: TimerSlot,
    timer: TransitionTimer,
}

impl SectionTransitionController {
    pub fn new() -> Self {
        Self {
            slot: TimerSlot::new(),
            timer: TransitionTimer::Idle,
        }
    }

    /// Arms the dwell timer for `section`.
    pub fn announce<F, Fut>(&mut self, section: SectionId, on_elapsed: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.start(section, TransitionStage::Announcing, DWELL, on_elapsed);
    }

    /// Arms the exit timer for `section`.
    pub fn exit<F, Fut>(&mut self, section: SectionId, on_elapsed: F)
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.start(section, TransitionStage::Exiting, EXIT, on_elapsed);
    }

    fn start<F, Fut>(
        &mut self,
        section: SectionId,
        stage: TransitionStage,
        delay: Duration,
        on_elapsed: F,
    ) where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.slot.next_generation();
        self.slot.arm(ScheduledTask::after(delay, on_elapsed(generation)));
        self.timer = TransitionTimer::Running { section, stage };
        tracing::debug!(
            section = %section,
            stage = ?stage,
            delay_ms = delay.as_millis() as u64,
            "Transition timer armed"
        );
    }

    /// Claims the elapsed timer. False means it was cancelled or replaced.
    pub fn fire(&mut self, generation: u64) -> bool {
        if !self.slot.fire(generation) {
            return false;
        }
        self.timer = TransitionTimer::Idle;
        true
    }

    /// Clears any running timer so it can never commit.
    ///
    /// Returns true if a timer was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.slot.cancel();
        if was_running {
            tracing::debug!(timer = ?self.timer, "Transition timer cancelled");
        }
        self.timer = TransitionTimer::Idle;
        was_running
    }

    pub fn timer(&self) -> TransitionTimer {
        self.timer
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_armed()
    }
}

impl Default for SectionTransitionController {
    fn default() -> Self {
        Self::new()
    }
}

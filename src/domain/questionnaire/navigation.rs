//! NavigationEngine - finds the next or previous visible question.
//!
//! Visibility is re-evaluated against the answers passed to every call.
//! Nothing is cached: changing an earlier answer can hide or reveal later
//! questions, and the next scan must see that.

use std::ops::Range;

use super::answers::Answers;
use super::registry::QuestionRegistry;

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Result of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// A visible question.
    Question(usize),
    /// Forward scan ran past the last question.
    EndOfFlow,
    /// Backward scan ran past the first question.
    StartOfFlow,
}

/// Outcome of pressing "next" on a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current question is required and unanswered.
    Blocked { index: usize },
    Question(usize),
    Review,
}

/// Stateless navigation over a registry.
#[derive(Debug, Clone, Copy)]
pub struct NavigationEngine<'a> {
    registry: &'a QuestionRegistry,
}

impl<'a> NavigationEngine<'a> {
    pub fn new(registry: &'a QuestionRegistry) -> Self {
        Self { registry }
    }

    /// Whether question `index` is currently shown.
    pub fn is_visible(&self, index: usize, answers: &Answers) -> bool {
        self.registry
            .question(index)
            .map_or(false, |q| q.is_visible(answers))
    }

    /// Scans from `current ± 1` for the nearest visible question.
    ///
    /// `current` may be `total_questions()` (the review position) when
    /// scanning backward.
    pub fn next_valid_index(
        &self,
        current: usize,
        answers: &Answers,
        direction: Direction,
    ) -> NavTarget {
        match direction {
            Direction::Forward => self.scan_forward(current + 1, answers),
            Direction::Backward => match current.checked_sub(1) {
                Some(start) => self.scan_backward(start, answers),
                None => NavTarget::StartOfFlow,
            },
        }
    }

    /// Forward policy for the "next" action.
    ///
    /// A required, unanswered current question blocks. Otherwise the scan
    /// either lands on a question or exhausts the catalog into review.
    pub fn advance(&self, current: usize, answers: &Answers) -> Advance {
        if let Some(question) = self.registry.question(current) {
            if question.is_visible(answers) && question.blocks_progress(answers) {
                tracing::debug!(question = question.id, "Advance blocked by required question");
                return Advance::Blocked { index: current };
            }
        }
        match self.next_valid_index(current, answers, Direction::Forward) {
            NavTarget::Question(index) => Advance::Question(index),
            _ => Advance::Review,
        }
    }

    /// First visible question of the whole flow.
    pub fn first_visible(&self, answers: &Answers) -> Option<usize> {
        match self.scan_forward(0, answers) {
            NavTarget::Question(index) => Some(index),
            _ => None,
        }
    }

    /// Last visible question of the whole flow.
    pub fn last_visible(&self, answers: &Answers) -> Option<usize> {
        match self.next_valid_index(self.registry.total_questions(), answers, Direction::Backward) {
            NavTarget::Question(index) => Some(index),
            _ => None,
        }
    }

    /// First visible question within an index range.
    pub fn first_visible_in(&self, range: Range<usize>, answers: &Answers) -> Option<usize> {
        range
            .take_while(|&i| i < self.registry.total_questions())
            .find(|&i| self.is_visible(i, answers))
    }

    /// Maps a persisted index onto a question the user may sit on now.
    ///
    /// Returns the index itself if visible, else the nearest visible question
    /// after it, else the nearest before it. `None` means nothing is visible
    /// from here on and the flow belongs in review.
    pub fn resolve_resume_index(&self, index: usize, answers: &Answers) -> Option<usize> {
        let total = self.registry.total_questions();
        if index >= total {
            return None;
        }
        if self.is_visible(index, answers) {
            return Some(index);
        }
        match self.next_valid_index(index, answers, Direction::Forward) {
            NavTarget::Question(i) => Some(i),
            _ => match self.next_valid_index(index, answers, Direction::Backward) {
                NavTarget::Question(i) => Some(i),
                _ => None,
            },
        }
    }

    fn scan_forward(&self, start: usize, answers: &Answers) -> NavTarget {
        (start..self.registry.total_questions())
            .find(|&i| self.is_visible(i, answers))
            .map_or(NavTarget::EndOfFlow, NavTarget::Question)
    }

    fn scan_backward(&self, start: usize, answers: &Answers) -> NavTarget {
        let upper = start.min(self.registry.total_questions().saturating_sub(1));
        if self.registry.is_empty() {
            return NavTarget::StartOfFlow;
        }
        (0..=upper)
            .rev()
            .find(|&i| self.is_visible(i, answers))
            .map_or(NavTarget::StartOfFlow, NavTarget::Question)
    }
}

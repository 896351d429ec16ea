//! Pure transition function for the wizard phase machine.
//!
//! `reduce` maps `(phase, answers, command)` to the next phase plus the side
//! effects the caller must run (events, timers, immediate saves). It never
//! touches a clock or a store, so the whole flow is testable without timers.
//!
//! While a section transition is in flight, navigation commands return the
//! phase unchanged with no effects; only the timer commands and `Abandon`
//! move it on.

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

use super::answers::Answers;
use super::navigation::{Advance, Direction, NavTarget, NavigationEngine};
use super::phase::{TransitionStage, WizardPhase};
use super::registry::QuestionRegistry;
use super::section::SectionId;

/// Input to the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCommand {
    Start,
    Next,
    Back,
    JumpTo(SectionId),
    /// The announcement dwell elapsed.
    DwellElapsed,
    /// The exit animation elapsed.
    ExitElapsed,
    Finish,
    DismissCelebration,
    Abandon,
    /// An answer was written; the current question may have been hidden.
    AnswersChanged,
}

/// Work the caller performs after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    /// Required question unanswered; show validation feedback.
    Shake { question_id: &'static str },
    /// Show the interstitial and arm the dwell timer.
    Announce { section: SectionId },
    /// Start the exit animation and arm the exit timer.
    BeginExit { section: SectionId },
    /// A different section is now on screen.
    EnterSection { section: SectionId, index: usize },
    EnterReview,
    /// Write state now, bypassing the debounce.
    PersistNow,
    /// Leave the wizard.
    Exit,
}

/// Result of one reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowStep {
    pub phase: WizardPhase,
    pub effects: Vec<FlowEffect>,
}

impl FlowStep {
    fn stay(phase: WizardPhase) -> Self {
        Self {
            phase,
            effects: Vec::new(),
        }
    }

    fn with(phase: WizardPhase, effects: Vec<FlowEffect>) -> Self {
        Self { phase, effects }
    }

    pub fn has(&self, effect: &FlowEffect) -> bool {
        self.effects.contains(effect)
    }
}

/// Position recorded for a phase: the question index, the registry length
/// for review and beyond, or the origin index while a transition is pending.
pub fn committed_index(registry: &QuestionRegistry, phase: &WizardPhase) -> Option<usize> {
    match phase {
        WizardPhase::Question { index } => Some(*index),
        WizardPhase::SectionTransition { from, .. } => Some(*from),
        WizardPhase::Review | WizardPhase::Celebration | WizardPhase::Completed => {
            Some(registry.total_questions())
        }
        WizardPhase::Welcome | WizardPhase::Exited => None,
    }
}

/// Computes the next phase and its effects.
///
/// # Errors
///
/// - `InvalidStateTransition` when the command does not apply to `phase`
/// - `UnknownSection`, `SectionLocked`, `SectionEmpty` for rejected jumps
pub fn reduce(
    registry: &QuestionRegistry,
    phase: WizardPhase,
    answers: &Answers,
    command: FlowCommand,
) -> Result<FlowStep, DomainError> {
    let nav = NavigationEngine::new(registry);

    if phase.is_transitioning()
        && matches!(command, FlowCommand::Next | FlowCommand::Back | FlowCommand::JumpTo(_))
    {
        return Ok(FlowStep::stay(phase));
    }

    match (phase, command) {
        (WizardPhase::Welcome, FlowCommand::Start) | (WizardPhase::Welcome, FlowCommand::Next) => {
            match nav.first_visible(answers) {
                Some(index) => {
                    let section = registry.section_of(index).id;
                    let effects = vec![FlowEffect::EnterSection { section, index }];
                    step(phase, WizardPhase::Question { index }, effects)
                }
                None => enter_review(phase),
            }
        }

        (WizardPhase::Question { index: current }, FlowCommand::Next) => {
            match nav.advance(current, answers) {
                Advance::Blocked { index } => {
                    let question_id = registry.question(index).map_or("", |q| q.id);
                    Ok(FlowStep::with(phase, vec![FlowEffect::Shake { question_id }]))
                }
                Advance::Review => enter_review(phase),
                Advance::Question(to) => {
                    let section = registry.section_of(to).id;
                    if registry.is_first_of_section(to) && !section.is_review() {
                        let next = WizardPhase::SectionTransition {
                            from: current,
                            to,
                            section,
                            stage: TransitionStage::Announcing,
                        };
                        step(phase, next, vec![FlowEffect::Announce { section }])
                    } else {
                        land(registry, phase, current, to)
                    }
                }
            }
        }

        (WizardPhase::Question { index: current }, FlowCommand::Back) => {
            match nav.next_valid_index(current, answers, Direction::Backward) {
                NavTarget::Question(to) => land(registry, phase, current, to),
                _ => step(phase, WizardPhase::Exited, vec![FlowEffect::Exit]),
            }
        }

        (WizardPhase::Review, FlowCommand::Back) => match nav.last_visible(answers) {
            Some(index) => {
                let section = registry.section_of(index).id;
                step(
                    phase,
                    WizardPhase::Question { index },
                    vec![FlowEffect::EnterSection { section, index }, FlowEffect::PersistNow],
                )
            }
            None => step(phase, WizardPhase::Exited, vec![FlowEffect::Exit]),
        },

        (WizardPhase::Welcome, FlowCommand::Back) => {
            step(phase, WizardPhase::Exited, vec![FlowEffect::Exit])
        }

        (WizardPhase::Question { .. }, FlowCommand::JumpTo(target))
        | (WizardPhase::Review, FlowCommand::JumpTo(target)) => {
            jump(registry, &nav, phase, answers, target)
        }

        (
            WizardPhase::SectionTransition {
                from,
                to,
                section,
                stage: TransitionStage::Announcing,
            },
            FlowCommand::DwellElapsed,
        ) => {
            let next = WizardPhase::SectionTransition {
                from,
                to,
                section,
                stage: TransitionStage::Exiting,
            };
            step(phase, next, vec![FlowEffect::BeginExit { section }])
        }

        (
            WizardPhase::SectionTransition {
                from,
                stage: TransitionStage::Exiting,
                ..
            },
            FlowCommand::ExitElapsed,
        ) => commit_transition(registry, &nav, phase, answers, from),

        (WizardPhase::Question { index }, FlowCommand::AnswersChanged) => {
            if nav.is_visible(index, answers) {
                return Ok(FlowStep::stay(phase));
            }
            match nav.resolve_resume_index(index, answers) {
                Some(to) => land(registry, phase, index, to),
                None => enter_review(phase),
            }
        }

        (_, FlowCommand::AnswersChanged) => Ok(FlowStep::stay(phase)),

        (WizardPhase::Review, FlowCommand::Finish) => {
            step(phase, WizardPhase::Celebration, Vec::new())
        }

        (WizardPhase::Celebration, FlowCommand::DismissCelebration) => {
            step(phase, WizardPhase::Completed, Vec::new())
        }

        (_, FlowCommand::Abandon) if phase.is_active() => {
            step(phase, WizardPhase::Exited, vec![FlowEffect::Exit])
        }

        (phase, command) => Err(invalid(phase, &format!("{:?}", command))),
    }
}

/// Lands a finished transition.
///
/// The target is scanned again from the origin: answers may have changed
/// while the interstitial was on screen.
fn commit_transition(
    registry: &QuestionRegistry,
    nav: &NavigationEngine<'_>,
    phase: WizardPhase,
    answers: &Answers,
    from: usize,
) -> Result<FlowStep, DomainError> {
    match nav.next_valid_index(from, answers, Direction::Forward) {
        NavTarget::Question(index) => {
            let section = registry.section_of(index).id;
            step(
                phase,
                WizardPhase::Question { index },
                vec![FlowEffect::EnterSection { section, index }, FlowEffect::PersistNow],
            )
        }
        _ => enter_review(phase),
    }
}

/// Moves between two questions, persisting when the section changes.
fn land(
    registry: &QuestionRegistry,
    phase: WizardPhase,
    from: usize,
    to: usize,
) -> Result<FlowStep, DomainError> {
    let section = registry.section_of(to).id;
    let effects = if registry.section_of(from).id != section {
        vec![FlowEffect::EnterSection { section, index: to }, FlowEffect::PersistNow]
    } else {
        Vec::new()
    };
    step(phase, WizardPhase::Question { index: to }, effects)
}

fn jump(
    registry: &QuestionRegistry,
    nav: &NavigationEngine<'_>,
    phase: WizardPhase,
    answers: &Answers,
    target: SectionId,
) -> Result<FlowStep, DomainError> {
    let target_position = registry.section_position(target).ok_or_else(|| {
        DomainError::new(ErrorCode::UnknownSection, format!("Unknown section '{}'", target))
    })?;

    let current_section = match phase {
        WizardPhase::Question { index } => {
            let current_position = registry.section_map().position_of(index);
            if target_position > current_position {
                return Err(DomainError::new(
                    ErrorCode::SectionLocked,
                    format!("Section '{}' has not been reached yet", target),
                ));
            }
            Some(registry.section_of(index).id)
        }
        _ => None,
    };

    let span = registry.section_span(target).unwrap_or(0..0);
    let index = nav.first_visible_in(span, answers).ok_or_else(|| {
        DomainError::new(
            ErrorCode::SectionEmpty,
            format!("Section '{}' has no visible questions", target),
        )
    })?;

    if current_section == Some(target) {
        return step(phase, WizardPhase::Question { index }, Vec::new());
    }
    step(
        phase,
        WizardPhase::Question { index },
        vec![FlowEffect::EnterSection { section: target, index }, FlowEffect::PersistNow],
    )
}

fn enter_review(phase: WizardPhase) -> Result<FlowStep, DomainError> {
    step(
        phase,
        WizardPhase::Review,
        vec![FlowEffect::EnterReview, FlowEffect::PersistNow],
    )
}

fn step(
    from: WizardPhase,
    to: WizardPhase,
    effects: Vec<FlowEffect>,
) -> Result<FlowStep, DomainError> {
    let phase = from
        .transition_to(to)
        .map_err(|_| invalid(from, &to.to_string()))?;
    Ok(FlowStep::with(phase, effects))
}

fn invalid(phase: WizardPhase, attempted: &str) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("{} is not allowed from {}", attempted, phase),
    )
    .with_detail("phase", phase.to_string())
}

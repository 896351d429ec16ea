//! WizardController - drives one onboarding session end to end.
//!
//! Welcome -> Question(i) -> [SectionTransition] -> ... -> Review ->
//! Celebration -> Completed. Phase changes come from the pure reducer in
//! the domain; this type runs their effects: events, timers and writes.
//!
//! All session state sits behind one async mutex. Timer tasks hold only a
//! weak reference and re-check their generation after taking the lock, so a
//! cancelled or superseded timer never applies anything.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use serde::Serialize;
use tokio::sync::{broadcast, Mutex};

use crate::config::PersistenceConfig;
use crate::domain::foundation::{Percentage, Timestamp, WizardId};
use crate::domain::questionnaire::{
    committed_index, reduce, AnswerField, AnswerValue, Answers, FlowCommand, FlowEffect, FlowStep,
    NavigationEngine, Question, QuestionRegistry, ReviewSummary, ScoringEngine, SectionId,
    WizardEvent, WizardPhase, WizardState,
};
use crate::ports::{DerivedProfiles, ProfileDeriver, WizardStore, WizardStoreError};

use super::debounce::DebouncedWriter;
use super::error::WizardError;
use super::section_transition::SectionTransitionController;

const EVENT_CAPACITY: usize = 64;

type TimerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// What `open` found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Nothing saved yet; show the welcome screen.
    Welcome,
    /// Partial progress restored.
    Resumed { phase: WizardPhase },
    /// Already completed; the host should navigate away.
    Redirect { completed_at: Timestamp },
}

/// Result of a navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved { index: usize },
    /// Required question unanswered; a `ValidationShake` was emitted.
    Blocked { question_id: &'static str },
    /// Section interstitial started; `target` becomes current once it ends.
    Announcing { section: SectionId, target: usize },
    EnteredReview,
    Exited,
    /// A section transition is running; the command was ignored.
    TransitionPending,
    /// The phase did not move to a question, review or exit.
    Stayed { phase: WizardPhase },
}

impl NavOutcome {
    fn from_step(step: &FlowStep) -> Self {
        let shake = step.effects.iter().find_map(|effect| match effect {
            FlowEffect::Shake { question_id } => Some(*question_id),
            _ => None,
        });
        if let Some(question_id) = shake {
            return NavOutcome::Blocked { question_id };
        }
        match step.phase {
            WizardPhase::Question { index } => NavOutcome::Moved { index },
            WizardPhase::SectionTransition { to, section, .. } => NavOutcome::Announcing {
                section,
                target: to,
            },
            WizardPhase::Review => NavOutcome::EnteredReview,
            WizardPhase::Exited => NavOutcome::Exited,
            phase => NavOutcome::Stayed { phase },
        }
    }
}

/// Live progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current_index: usize,
    pub total_questions: usize,
    pub section: Option<SectionId>,
    pub clarity: Percentage,
}

/// Timers currently armed for this wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingTimers {
    pub write: bool,
    pub transition: bool,
}

impl PendingTimers {
    pub fn any(&self) -> bool {
        self.write || self.transition
    }
}

/// The finalized record produced by `complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub wizard_id: WizardId,
    pub completed_at: Timestamp,
    pub summary: ReviewSummary,
    /// `None` when the deriver failed; completion is not blocked by it.
    pub profiles: Option<DerivedProfiles>,
}

struct Session {
    state: WizardState,
    phase: WizardPhase,
    transition: SectionTransitionController,
    writer: DebouncedWriter,
}

struct Inner {
    id: WizardId,
    registry: Arc<QuestionRegistry>,
    store: Arc<dyn WizardStore>,
    deriver: Arc<dyn ProfileDeriver>,
    events: broadcast::Sender<WizardEvent>,
    session: Mutex<Session>,
}

impl Inner {
    fn emit(&self, event: WizardEvent) {
        tracing::debug!(wizard_id = %self.id, event = event.event_type(), "Wizard event");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Writes the current state. A failure is reported as `SaveFailed` and
    /// leaves the in-memory state untouched.
    async fn persist(&self, session: &mut Session) -> Result<(), WizardStoreError> {
        let saved_at = Timestamp::now();
        let mut snapshot = session.state.clone();
        snapshot.saved_at = Some(saved_at);

        match self.store.save_state(self.id, &snapshot).await {
            Ok(()) => {
                session.state.saved_at = Some(saved_at);
                tracing::debug!(
                    wizard_id = %self.id,
                    current_index = snapshot.current_index,
                    "Wizard state saved"
                );
                self.emit(WizardEvent::Saved {
                    current_index: snapshot.current_index,
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(wizard_id = %self.id, error = %err, "Failed to save wizard state");
                self.emit(WizardEvent::SaveFailed {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Immediate write; supersedes a pending debounced one.
    async fn persist_now(&self, session: &mut Session) -> Result<(), WizardStoreError> {
        session.writer.cancel();
        self.persist(session).await
    }

    async fn apply(self: &Arc<Self>, session: &mut Session, step: FlowStep) {
        session.phase = step.phase;
        if let Some(index) = committed_index(&self.registry, &step.phase) {
            session.state.current_index = index;
        }

        for effect in step.effects {
            match effect {
                FlowEffect::Shake { question_id } => {
                    self.emit(WizardEvent::ValidationShake { question_id });
                }
                FlowEffect::Announce { section } => {
                    self.arm_transition(session, section, FlowCommand::DwellElapsed);
                    let title = self
                        .registry
                        .section_map()
                        .get(section)
                        .map_or("", |s| s.title);
                    self.emit(WizardEvent::SectionAnnounced { section, title });
                }
                FlowEffect::BeginExit { section } => {
                    self.arm_transition(session, section, FlowCommand::ExitElapsed);
                }
                FlowEffect::EnterSection { section, index } => {
                    self.emit(WizardEvent::SectionEntered { section, index });
                }
                FlowEffect::EnterReview => self.emit(WizardEvent::EnteredReview),
                FlowEffect::PersistNow => {
                    // Reported through SaveFailed; navigation proceeds.
                    let _ = self.persist_now(session).await;
                }
                FlowEffect::Exit => {
                    session.transition.cancel();
                    self.emit(WizardEvent::Exited);
                }
            }
        }
    }

    fn arm_transition(
        self: &Arc<Self>,
        session: &mut Session,
        section: SectionId,
        command: FlowCommand,
    ) {
        let weak = Arc::downgrade(self);
        let on_elapsed = move |generation| Self::transition_elapsed(weak, generation, command);
        match command {
            FlowCommand::DwellElapsed => session.transition.announce(section, on_elapsed),
            _ => session.transition.exit(section, on_elapsed),
        }
    }

    fn transition_elapsed(inner: Weak<Self>, generation: u64, command: FlowCommand) -> TimerFuture {
        Box::pin(async move {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let mut session = inner.session.lock().await;
            if !session.transition.fire(generation) {
                tracing::debug!(wizard_id = %inner.id, "Stale transition timer ignored");
                return;
            }
            match reduce(&inner.registry, session.phase, &session.state.answers, command) {
                Ok(step) => inner.apply(&mut session, step).await,
                Err(err) => {
                    tracing::warn!(
                        wizard_id = %inner.id,
                        error = %err,
                        "Transition timer rejected"
                    );
                }
            }
        })
    }

    fn schedule_write(self: &Arc<Self>, session: &mut Session) {
        let weak = Arc::downgrade(self);
        session.writer.schedule(move |generation| async move {
            if let Some(inner) = weak.upgrade() {
                inner.flush_debounced(generation).await;
            }
        });
    }

    async fn flush_debounced(&self, generation: u64) {
        let mut session = self.session.lock().await;
        if !session.writer.fire(generation) || session.state.is_completed() {
            return;
        }
        // Reported through SaveFailed; the next change retries.
        let _ = self.persist(&mut session).await;
    }
}

/// User-facing controller for one wizard instance.
///
/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct WizardController {
    inner: Arc<Inner>,
}

impl WizardController {
    pub fn new(
        id: WizardId,
        registry: Arc<QuestionRegistry>,
        store: Arc<dyn WizardStore>,
        deriver: Arc<dyn ProfileDeriver>,
        persistence: &PersistenceConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let session = Session {
            state: WizardState::default(),
            phase: WizardPhase::Welcome,
            transition: SectionTransitionController::new(),
            writer: DebouncedWriter::new(persistence.debounce()),
        };
        Self {
            inner: Arc::new(Inner {
                id,
                registry,
                store,
                deriver,
                events,
                session: Mutex::new(session),
            }),
        }
    }

    pub fn id(&self) -> WizardId {
        self.inner.id
    }

    pub fn registry(&self) -> Arc<QuestionRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.inner.events.subscribe()
    }

    /// Loads persisted state and decides where to land.
    ///
    /// A completed wizard is never resumed. A stale index is moved to the
    /// nearest visible question. An unreadable store starts fresh after
    /// emitting `LoadFailed`.
    pub async fn open(&self) -> Result<OpenOutcome, WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        if session.phase != WizardPhase::Welcome || !session.state.is_fresh() {
            return Err(WizardError::InvalidPhase {
                operation: "open",
                phase: session.phase,
            });
        }

        let loaded = match inner.store.load_state(inner.id).await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(
                    wizard_id = %inner.id,
                    error = %err,
                    "Failed to load wizard state, starting fresh"
                );
                inner.emit(WizardEvent::LoadFailed {
                    reason: err.to_string(),
                });
                None
            }
        };
        let Some(state) = loaded else {
            return Ok(OpenOutcome::Welcome);
        };

        if let Some(completed_at) = state.completed_at {
            session.state = state;
            session.phase = WizardPhase::Completed;
            tracing::info!(wizard_id = %inner.id, "Completed wizard reopened, redirecting");
            inner.emit(WizardEvent::Redirected { completed_at });
            return Ok(OpenOutcome::Redirect { completed_at });
        }
        if state.is_fresh() {
            session.state = state;
            return Ok(OpenOutcome::Welcome);
        }

        let nav = NavigationEngine::new(&inner.registry);
        let phase = match nav.resolve_resume_index(state.current_index, &state.answers) {
            Some(index) => WizardPhase::Question { index },
            None => WizardPhase::Review,
        };
        let stored_index = state.current_index;
        session.state = state;
        session.state.current_index =
            committed_index(&inner.registry, &phase).unwrap_or(stored_index);
        session.phase = phase;

        tracing::info!(
            wizard_id = %inner.id,
            stored_index,
            resumed = %phase,
            "Wizard resumed"
        );
        Ok(OpenOutcome::Resumed { phase })
    }

    /// Welcome -> first visible question.
    pub async fn start(&self) -> Result<NavOutcome, WizardError> {
        self.navigate("start", FlowCommand::Start, None).await
    }

    pub async fn go_next(&self) -> Result<NavOutcome, WizardError> {
        self.navigate("next", FlowCommand::Next, None).await
    }

    pub async fn go_back(&self) -> Result<NavOutcome, WizardError> {
        self.navigate("back", FlowCommand::Back, None).await
    }

    /// Jumps to the first visible question of `section`.
    ///
    /// Only the current section or an earlier one may be targeted, except
    /// from review where every section is open.
    pub async fn jump_to_section(&self, section: SectionId) -> Result<NavOutcome, WizardError> {
        self.navigate("jump_to_section", FlowCommand::JumpTo(section), Some(section))
            .await
    }

    async fn navigate(
        &self,
        operation: &'static str,
        command: FlowCommand,
        target: Option<SectionId>,
    ) -> Result<NavOutcome, WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        let phase = session.phase;

        if phase.is_transitioning()
            && matches!(command, FlowCommand::Next | FlowCommand::Back | FlowCommand::JumpTo(_))
        {
            tracing::debug!(wizard_id = %inner.id, operation, "Ignored during section transition");
            return Ok(NavOutcome::TransitionPending);
        }

        let step = reduce(&inner.registry, phase, &session.state.answers, command)
            .map_err(|err| WizardError::from_flow(err, operation, phase, target))?;
        let outcome = NavOutcome::from_step(&step);
        tracing::debug!(
            wizard_id = %inner.id,
            operation,
            from = %phase,
            to = %step.phase,
            "Wizard navigated"
        );

        inner.apply(&mut session, step).await;
        Ok(outcome)
    }

    /// Records an answer and schedules a debounced write.
    ///
    /// If the answer hides the question on screen, the wizard moves to the
    /// nearest visible question (or review) and writes immediately.
    pub async fn set_answer(
        &self,
        field: AnswerField,
        value: AnswerValue,
    ) -> Result<(), WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        if session.state.is_completed() || session.phase.is_frozen() {
            return Err(WizardError::Frozen);
        }
        if session.phase == WizardPhase::Exited {
            return Err(WizardError::InvalidPhase {
                operation: "set_answer",
                phase: session.phase,
            });
        }

        session.state.answers.set(field, value)?;
        tracing::trace!(wizard_id = %inner.id, field = %field, "Answer recorded");

        let phase = session.phase;
        let answers = &session.state.answers;
        let step = reduce(&inner.registry, phase, answers, FlowCommand::AnswersChanged)
            .map_err(|err| WizardError::from_flow(err, "set_answer", phase, None))?;
        if step.phase != phase {
            tracing::debug!(
                wizard_id = %inner.id,
                field = %field,
                from = %phase,
                to = %step.phase,
                "Current question hidden by answer"
            );
        }
        let persisted = step.has(&FlowEffect::PersistNow);
        inner.apply(&mut session, step).await;
        if !persisted {
            inner.schedule_write(&mut session);
        }
        Ok(())
    }

    /// Finalizes the wizard from review.
    ///
    /// Stamps `completed_at`, scores once, and writes immediately. If the
    /// write fails the stamp is rolled back so the user can retry. Profile
    /// derivation runs after the write; its failure is logged only.
    pub async fn complete(&self) -> Result<CompletionRecord, WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        if session.state.is_completed() {
            return Err(WizardError::Frozen);
        }
        let phase = session.phase;
        let step = reduce(&inner.registry, phase, &session.state.answers, FlowCommand::Finish)
            .map_err(|err| WizardError::from_flow(err, "complete", phase, None))?;

        session.transition.cancel();
        session.writer.cancel();

        let completed_at = Timestamp::now();
        session.state.completed_at = Some(completed_at);
        session.state.current_index = inner.registry.total_questions();
        let summary = ScoringEngine::review_summary(&inner.registry, &session.state.answers);

        if let Err(err) = inner.persist(&mut session).await {
            session.state.completed_at = None;
            return Err(err.into());
        }
        session.phase = step.phase;
        let answers = session.state.answers.clone();
        drop(session);

        let profiles = match inner.deriver.derive(&answers).await {
            Ok(profiles) => Some(profiles),
            Err(err) => {
                tracing::warn!(wizard_id = %inner.id, error = %err, "Profile derivation failed");
                None
            }
        };

        tracing::info!(
            wizard_id = %inner.id,
            clarity = summary.clarity.value(),
            missing_required = summary.missing_required.len(),
            "Wizard completed"
        );
        inner.emit(WizardEvent::Completed {
            clarity: summary.clarity,
        });

        Ok(CompletionRecord {
            wizard_id: inner.id,
            completed_at,
            summary,
            profiles,
        })
    }

    /// Celebration -> Completed.
    pub async fn dismiss_celebration(&self) -> Result<(), WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        let phase = session.phase;
        let answers = &session.state.answers;
        let step = reduce(&inner.registry, phase, answers, FlowCommand::DismissCelebration)
            .map_err(|err| WizardError::from_flow(err, "dismiss_celebration", phase, None))?;
        inner.apply(&mut session, step).await;
        Ok(())
    }

    /// Explicit save, bypassing the debounce.
    pub async fn save_now(&self) -> Result<(), WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        if session.state.is_completed() {
            return Err(WizardError::Frozen);
        }
        inner.persist_now(&mut session).await?;
        Ok(())
    }

    /// Tears the wizard down.
    ///
    /// Cancels the section transition so its target index is never applied,
    /// and replaces a pending debounced write with one immediate write.
    pub async fn abandon(&self) -> Result<(), WizardError> {
        let inner = &self.inner;
        let mut session = inner.session.lock().await;
        let write_pending = session.writer.cancel();
        let transition_pending = session.transition.cancel();
        let phase = session.phase;

        if phase.is_active() {
            let step = reduce(&inner.registry, phase, &session.state.answers, FlowCommand::Abandon)
                .map_err(|err| WizardError::from_flow(err, "abandon", phase, None))?;
            inner.apply(&mut session, step).await;
        }

        tracing::info!(
            wizard_id = %inner.id,
            from = %phase,
            write_pending,
            transition_pending,
            "Wizard abandoned"
        );

        if write_pending && !session.state.is_completed() {
            inner.persist(&mut session).await?;
        }
        Ok(())
    }

    pub async fn phase(&self) -> WizardPhase {
        self.inner.session.lock().await.phase
    }

    pub async fn state(&self) -> WizardState {
        self.inner.session.lock().await.state.clone()
    }

    pub async fn answers(&self) -> Answers {
        self.inner.session.lock().await.state.answers.clone()
    }

    /// The question on screen, if the wizard is on one.
    pub async fn current_question(&self) -> Option<Question> {
        let session = self.inner.session.lock().await;
        session
            .phase
            .question_index()
            .and_then(|index| self.inner.registry.question(index).cloned())
    }

    pub async fn clarity_score(&self) -> Percentage {
        let session = self.inner.session.lock().await;
        ScoringEngine::clarity_score(&self.inner.registry, &session.state.answers)
    }

    pub async fn review_summary(&self) -> ReviewSummary {
        let session = self.inner.session.lock().await;
        ScoringEngine::review_summary(&self.inner.registry, &session.state.answers)
    }

    pub async fn progress(&self) -> Progress {
        let session = self.inner.session.lock().await;
        let registry = &self.inner.registry;
        let current_index = session.state.current_index;
        let on_question = !matches!(session.phase, WizardPhase::Welcome | WizardPhase::Exited)
            && current_index < registry.total_questions();
        Progress {
            current_index,
            total_questions: registry.total_questions(),
            section: on_question.then(|| registry.section_of(current_index).id),
            clarity: ScoringEngine::clarity_score(registry, &session.state.answers),
        }
    }

    pub async fn pending_timers(&self) -> PendingTimers {
        let session = self.inner.session.lock().await;
        PendingTimers {
            write: session.writer.is_pending(),
            transition: session.transition.is_pending(),
        }
    }
}

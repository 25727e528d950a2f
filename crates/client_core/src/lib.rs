use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{SessionState, Tier, Turn},
    error::SubmitRejection,
    protocol::{StepRequest, StepResponse},
};
use tracing::{debug, warn};

pub mod offline;

/// Fixed transcript text for a failed step round trip.
pub const STEP_FAILURE_TEXT: &str = "Error connecting to the tutor. Is the backend running?";
/// Introductory assistant turn appended when a session starts.
pub const SESSION_INTRO_TEXT: &str = "Starting your adaptive tutoring session...";

/// Seam to the tutoring step endpoint. The session controller only ever
/// talks to the backend through this trait, so tests can script responses
/// without a network.
#[async_trait]
pub trait TutorBackend: Send + Sync {
    /// One tutoring step. `None` requests the first step of a session.
    async fn step(&self, answer: Option<&str>) -> Result<StepResponse>;
    /// Wipes the backend-side learner state.
    async fn reset(&self) -> Result<()>;
}

/// HTTP implementation of [`TutorBackend`] against the tutor API.
pub struct TutorClient {
    http: Client,
    server_url: String,
}

impl TutorClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into(),
        }
    }
}

#[async_trait]
impl TutorBackend for TutorClient {
    async fn step(&self, answer: Option<&str>) -> Result<StepResponse> {
        let step = self
            .http
            .post(format!("{}/api/tutor", self.server_url))
            .json(&StepRequest {
                answer: answer.map(str::to_string),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(step)
    }

    async fn reset(&self) -> Result<()> {
        self.http
            .post(format!("{}/api/reset", self.server_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Session lifecycle. `AwaitingStep` is the only phase in which submissions
/// are rejected; it always falls back to `Idle` whether the backend call
/// succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    AwaitingStep,
    Idle,
}

/// Result of one backend round trip. Transport, HTTP, and decode errors are
/// all collapsed into `Failed`; the distinction only matters in the logs.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Step(StepResponse),
    Failed,
}

/// Tier resolution order: the `tier` field wins, `persona` is the fallback,
/// and an absent (or empty) pair leaves the current tier untouched.
pub fn resolved_tier_label(step: &StepResponse) -> Option<&str> {
    step.tier
        .as_deref()
        .filter(|label| !label.is_empty())
        .or_else(|| step.persona.as_deref().filter(|label| !label.is_empty()))
}

/// Builds the assistant turn text for one step: explanation first, then the
/// question under a bold label, then any multiple-choice options as bullets.
/// A step with none of those composes to the empty string.
pub fn compose_assistant_text(step: &StepResponse) -> String {
    let mut text = String::new();
    if let Some(explanation) = &step.explanation {
        text.push_str(explanation);
        text.push_str("\n\n");
    }
    if let Some(question) = &step.question {
        text.push_str("**Question:**\n");
        text.push_str(question);
    }
    if let Some(options) = &step.options {
        for option in options {
            text.push_str("\n- ");
            text.push_str(option);
        }
    }
    text
}

/// Owns the conversation: the ordered transcript, the tier/intent metadata,
/// and the request lifecycle against the backend. Rendering is the caller's
/// job, projected from [`SessionController::transcript`] and
/// [`SessionController::state`].
pub struct SessionController {
    backend: Arc<dyn TutorBackend>,
    transcript: Vec<Turn>,
    state: SessionState,
    phase: SessionPhase,
}

impl SessionController {
    pub fn new(backend: Arc<dyn TutorBackend>) -> Self {
        Self {
            backend,
            transcript: Vec::new(),
            state: SessionState::default(),
            phase: SessionPhase::NotStarted,
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Starts the session: one introductory assistant turn, then exactly one
    /// first-step round trip. A second call is a no-op.
    pub async fn start_session(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            debug!("start_session ignored: session already started");
            return;
        }
        self.transcript.push(Turn::assistant(SESSION_INTRO_TEXT));
        self.phase = SessionPhase::AwaitingStep;
        let outcome = self.request_step(None).await;
        self.apply_step(outcome);
        self.phase = SessionPhase::Idle;
    }

    /// Validates and forwards one learner submission. On acceptance the
    /// trimmed text is appended as a user turn before the round trip, and a
    /// backend failure is absorbed into the transcript rather than returned;
    /// `Ok` means the cycle ran, not that the backend succeeded.
    pub async fn submit_user_input(&mut self, text: &str) -> Result<(), SubmitRejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitRejection::EmptyInput);
        }
        match self.phase {
            SessionPhase::NotStarted => return Err(SubmitRejection::NotStarted),
            SessionPhase::AwaitingStep => return Err(SubmitRejection::StepInFlight),
            SessionPhase::Idle => {}
        }

        let answer = trimmed.to_string();
        self.transcript.push(Turn::user(answer.clone()));
        self.phase = SessionPhase::AwaitingStep;
        let outcome = self.request_step(Some(&answer)).await;
        self.apply_step(outcome);
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// One backend call, no retry, no state mutation.
    pub async fn request_step(&self, answer: Option<&str>) -> StepOutcome {
        match self.backend.step(answer).await {
            Ok(step) => StepOutcome::Step(step),
            Err(err) => {
                warn!(error = %err, "tutor step request failed");
                StepOutcome::Failed
            }
        }
    }

    /// Folds one step outcome into the session. A failure appends the fixed
    /// error turn and leaves the metadata untouched. A success updates tier
    /// and intent field by field, then appends the composed assistant turn,
    /// empty or not: an empty step still occupies its slot in the transcript.
    pub fn apply_step(&mut self, outcome: StepOutcome) {
        let step = match outcome {
            StepOutcome::Step(step) => step,
            StepOutcome::Failed => {
                self.transcript.push(Turn::assistant(STEP_FAILURE_TEXT));
                return;
            }
        };

        if let Some(label) = resolved_tier_label(&step) {
            self.state.tier = Some(Tier::from_label(label));
        }
        if let Some(intent) = step.intent.as_deref().filter(|intent| !intent.is_empty()) {
            self.state.intent = Some(intent.to_string());
        }
        debug!(
            topic = step.topic.as_deref().unwrap_or("-"),
            subtopic = step.subtopic.as_deref().unwrap_or("-"),
            score = step.score,
            "tutor step applied"
        );

        let text = compose_assistant_text(&step);
        self.transcript.push(Turn::assistant(text));
    }

    /// Resets the backend learner state, then wipes the local session. The
    /// backend call is fire-and-forget: a failed reset still wipes locally.
    pub async fn reset_session(&mut self) {
        if let Err(err) = self.backend.reset().await {
            warn!(error = %err, "tutor reset request failed");
        }
        self.transcript.clear();
        self.state = SessionState::default();
        self.phase = SessionPhase::NotStarted;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

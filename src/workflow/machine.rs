//! Workflow state machine
//!
//! Owns the draft for one session. Operations take `&self`; the session
//! state sits behind a mutex that is never held across an await, so a
//! second call made while an upload is outstanding sees it and is rejected.

use crate::draft::{Draft, FieldUpdate};
use crate::error::{Error, Result, StateFault, TransportFault, ValidationFault};
use crate::gateway::BlogGateway;
use crate::types::{DocumentFile, ReviewOutcome, SubmissionMetadata, UploadResult};
use crate::workflow::{NoopProgress, ProgressCallback, ReviewDelays, WorkflowState, guard};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[cfg(feature = "review-gate")]
use crate::workflow::run_review;

/// Timing knobs for the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTiming {
    /// Bound on each upload or publish call
    pub upload_timeout: Duration,
    /// How long Publish stays visible before the automatic reset
    pub reset_delay: Duration,
    /// Simulated review delays
    pub review: ReviewDelays,
}

impl Default for WorkflowTiming {
    fn default() -> Self {
        Self {
            upload_timeout: Duration::from_secs(15),
            reset_delay: Duration::from_secs(5),
            review: ReviewDelays::default(),
        }
    }
}

/// Point-in-time view of a session, for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current stage
    pub state: WorkflowState,
    /// Draft contents
    pub draft: Draft,
    /// An upload is outstanding
    pub loading: bool,
    /// Message to show next to the form, if the last operation failed
    pub notice: Option<String>,
    /// Result of the review stage, once it finished
    pub review: Option<ReviewOutcome>,
}

/// Submission workflow for a single session
///
/// Dropping the workflow cancels any scheduled reset.
pub struct Workflow {
    shared: Arc<Shared>,
}

struct Shared {
    gateway: Arc<dyn BlogGateway>,
    progress: Arc<dyn ProgressCallback>,
    timing: WorkflowTiming,
    session: Mutex<Session>,
}

struct Session {
    state: WorkflowState,
    /// Publishes every state change to `Workflow::wait_while`
    state_tx: watch::Sender<WorkflowState>,
    draft: Draft,
    loading: bool,
    notice: Option<String>,
    review: Option<ReviewOutcome>,
    /// Bumped every time the draft is cleared; late results from an
    /// earlier cycle are dropped
    cycle: u64,
    reset_task: Option<JoinHandle<()>>,
    review_task: Option<JoinHandle<()>>,
    disposed: bool,
}

impl Session {
    fn new() -> Self {
        let state = WorkflowState::default();
        let (state_tx, _) = watch::channel(state);
        Self {
            state,
            state_tx,
            draft: Draft::default(),
            loading: false,
            notice: None,
            review: None,
            cycle: 0,
            reset_task: None,
            review_task: None,
            disposed: false,
        }
    }

    fn set_state(&mut self, state: WorkflowState) {
        self.state = state;
        self.state_tx.send_replace(state);
    }

    fn ensure_state(&self, expected: WorkflowState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::State(StateFault::WrongState {
                expected,
                actual: self.state,
            }))
        }
    }

    fn prepare_upload(&mut self) -> Result<(DocumentFile, SubmissionMetadata, u64)> {
        self.ensure_state(WorkflowState::Submit)?;
        if self.loading {
            return Err(StateFault::UploadInProgress.into());
        }
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationFault::MissingFields(missing).into());
        }
        let file = self.draft.file.clone().ok_or(ValidationFault::MissingFile)?;
        let metadata = self
            .draft
            .metadata()
            .ok_or_else(|| Error::Internal("metadata incomplete after validation".to_string()))?;

        self.loading = true;
        self.notice = None;
        Ok((file, metadata, self.cycle))
    }

    fn reset_to_submit(&mut self) {
        self.set_state(WorkflowState::Submit);
        self.draft.reset();
        self.loading = false;
        self.notice = None;
        self.review = None;
        self.cycle += 1;
    }

    fn take_tasks(&mut self) -> Vec<JoinHandle<()>> {
        [self.reset_task.take(), self.review_task.take()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            draft: self.draft.clone(),
            loading: self.loading,
            notice: self.notice.clone(),
            review: self.review,
        }
    }
}

impl Workflow {
    /// Create a workflow that reports no progress
    pub fn new(gateway: Arc<dyn BlogGateway>, timing: WorkflowTiming) -> Self {
        Self::with_progress(gateway, timing, Arc::new(NoopProgress))
    }

    /// Create a workflow that reports progress to `progress`
    pub fn with_progress(
        gateway: Arc<dyn BlogGateway>,
        timing: WorkflowTiming,
        progress: Arc<dyn ProgressCallback>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                gateway,
                progress,
                timing,
                session: Mutex::new(Session::new()),
            }),
        }
    }

    /// Current stage
    pub fn state(&self) -> WorkflowState {
        self.shared.lock().state
    }

    /// Copy of the current draft
    pub fn draft(&self) -> Draft {
        self.shared.lock().draft.clone()
    }

    /// Everything a front end needs to render the session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().snapshot()
    }

    /// Wait until the workflow leaves `state`, returning the new stage
    ///
    /// Returns at once when the workflow is already elsewhere.
    pub async fn wait_while(&self, state: WorkflowState) -> WorkflowState {
        let mut rx = self.shared.lock().state_tx.subscribe();
        match rx.wait_for(|current| *current != state).await {
            Ok(current) => *current,
            Err(_) => self.state(),
        }
    }

    /// Apply a user edit to the draft
    ///
    /// Only allowed in Submit. The document cannot be swapped while it is
    /// being uploaded.
    pub fn set_field(&self, update: FieldUpdate) -> Result<()> {
        let mut session = self.shared.lock();
        let allowed = session.ensure_state(WorkflowState::Submit).and_then(|()| {
            if session.loading && matches!(update, FieldUpdate::File(_)) {
                Err(StateFault::UploadInProgress.into())
            } else {
                Ok(())
            }
        });
        match allowed {
            Ok(()) => {
                session.draft.set_field(update);
                Ok(())
            }
            Err(e) => {
                session.notice = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Send the draft's document to the service for analysis
    ///
    /// Fails without touching the network when a required field or the
    /// document is missing, or when another upload is still outstanding.
    pub async fn upload(&self) -> Result<UploadResult> {
        let prepared = {
            let mut session = self.shared.lock();
            let prepared = session.prepare_upload();
            if let Err(e) = &prepared {
                session.notice = Some(e.user_message());
            }
            prepared
        };
        let (file, metadata, cycle) = match prepared {
            Ok(p) => p,
            Err(e) => return Err(self.shared.report(e).await),
        };

        let mut in_flight = InFlightUpload {
            shared: &self.shared,
            cycle,
            armed: true,
        };

        info!(file = %file.file_name, title = %metadata.title, "uploading draft");
        self.shared.progress.on_upload_started(&file).await;

        let outcome = self
            .shared
            .bounded(self.shared.gateway.upload(&file, &metadata))
            .await;
        in_flight.armed = false;

        let outcome = {
            let mut session = self.shared.lock();
            if session.disposed || session.cycle != cycle {
                debug!("dropping upload result for a cleared draft");
                Err(StateFault::DraftReset.into())
            } else {
                session.loading = false;
                match &outcome {
                    Ok(result) => {
                        session.draft.apply_upload_result(result);
                        session.notice = None;
                    }
                    Err(e) => session.notice = Some(e.user_message()),
                }
                outcome
            }
        };

        match outcome {
            Ok(result) => {
                info!(
                    blog_id = %result.blog_id,
                    word_count = result.word_count,
                    plagiarized = result.is_plagiarized,
                    "upload analyzed"
                );
                self.shared.progress.on_upload_finished(&result).await;
                Ok(result)
            }
            Err(e) => Err(self.shared.report(e).await),
        }
    }

    /// Confirm the submission and publish it
    ///
    /// Moves straight to Publish when the server already published the
    /// document during upload. On any guard failure the workflow stays in
    /// Submit and the fault is returned.
    #[cfg(not(feature = "review-gate"))]
    pub async fn confirm(&self) -> Result<WorkflowState> {
        let checked = {
            let mut session = self.shared.lock();
            let checked = session
                .ensure_state(WorkflowState::Submit)
                .and_then(|()| guard::check_publish(&session.draft, session.loading));
            match checked {
                Ok(()) => {
                    session.set_state(WorkflowState::Publish);
                    session.notice = None;
                    Ok(session.draft.public_url.clone().unwrap_or_default())
                }
                Err(e) => {
                    session.notice = Some(e.user_message());
                    Err(e)
                }
            }
        };

        match checked {
            Ok(url) => {
                info!(%url, "blog published");
                self.shared.progress.on_state(WorkflowState::Publish).await;
                self.shared.progress.on_published(&url).await;
                Shared::schedule_reset(&self.shared);
                Ok(WorkflowState::Publish)
            }
            Err(e) => Err(self.shared.report(e).await),
        }
    }

    /// Confirm the submission and start the review stage
    ///
    /// The review runs in the background; once both checks resolved the
    /// workflow publishes (if they passed) and moves to Publish on its own.
    #[cfg(feature = "review-gate")]
    pub async fn confirm(&self) -> Result<WorkflowState> {
        let checked = {
            let mut session = self.shared.lock();
            let checked = session
                .ensure_state(WorkflowState::Submit)
                .and_then(|()| guard::check_review(&session.draft, session.loading));
            match checked {
                Ok(()) => {
                    session.set_state(WorkflowState::Review);
                    session.notice = None;
                    session.review = None;
                    Ok(ReviewInput {
                        word_count: session.draft.word_count,
                        is_plagiarized: session.draft.is_plagiarized,
                        blog_id: session.draft.blog_id.clone().unwrap_or_default(),
                        cycle: session.cycle,
                    })
                }
                Err(e) => {
                    session.notice = Some(e.user_message());
                    Err(e)
                }
            }
        };

        match checked {
            Ok(input) => {
                info!(blog_id = %input.blog_id, "review started");
                self.shared.progress.on_state(WorkflowState::Review).await;
                Shared::start_review(&self.shared, input);
                Ok(WorkflowState::Review)
            }
            Err(e) => Err(self.shared.report(e).await),
        }
    }

    /// Give up on the current draft and start over
    pub async fn abandon(&self) {
        {
            let mut session = self.shared.lock();
            for task in session.take_tasks() {
                task.abort();
            }
            session.reset_to_submit();
        }
        info!("draft abandoned");
        self.shared.progress.on_state(WorkflowState::Submit).await;
    }

    /// Tear the session down, cancelling any scheduled work
    pub fn dispose(&self) {
        let mut session = self.shared.lock();
        session.disposed = true;
        for task in session.take_tasks() {
            task.abort();
        }
    }
}

impl Drop for Workflow {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Clears `loading` if an upload future is dropped before it finished
struct InFlightUpload<'a> {
    shared: &'a Shared,
    cycle: u64,
    armed: bool,
}

impl Drop for InFlightUpload<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.shared.lock();
        if session.cycle == self.cycle {
            debug!("upload cancelled before completion");
            session.loading = false;
        }
    }
}

#[cfg(feature = "review-gate")]
struct ReviewInput {
    word_count: u64,
    is_plagiarized: bool,
    blog_id: String,
    cycle: u64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log and forward a fault, handing it back to the caller
    async fn report(&self, err: Error) -> Error {
        warn!(kind = ?err.kind(), "{err}");
        self.progress.on_error(&err).await;
        err
    }

    /// Apply the upload timeout to a gateway call
    async fn bounded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.timing.upload_timeout, call)
            .await
            .unwrap_or_else(|_| Err(TransportFault::Timeout.into()))
    }

    /// Schedule the one-shot Publish → Submit reset
    ///
    /// Replaces any reset already scheduled. The task only holds a weak
    /// reference, so a dropped session is never touched.
    fn schedule_reset(this: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(this);
        let delay = this.timing.reset_delay;

        let mut session = this.lock();
        if session.disposed {
            return;
        }
        let cycle = session.cycle;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.complete_cycle(cycle).await;
            }
        });
        if let Some(previous) = session.reset_task.replace(handle) {
            previous.abort();
        }
        debug!(?delay, "reset scheduled");
    }

    async fn complete_cycle(&self, cycle: u64) {
        {
            let mut session = self.lock();
            if session.disposed
                || session.cycle != cycle
                || session.state != WorkflowState::Publish
            {
                return;
            }
            session.reset_to_submit();
            session.reset_task = None;
        }
        info!("workflow reset");
        self.progress.on_reset().await;
        self.progress.on_state(WorkflowState::Submit).await;
    }

    #[cfg(feature = "review-gate")]
    fn start_review(this: &Arc<Self>, input: ReviewInput) {
        let weak: Weak<Self> = Arc::downgrade(this);
        let delays = this.timing.review;
        let progress = Arc::clone(&this.progress);

        let mut session = this.lock();
        if session.disposed {
            return;
        }
        let handle = tokio::spawn(async move {
            let outcome = run_review(
                input.word_count,
                input.is_plagiarized,
                delays,
                progress.as_ref(),
            )
            .await;
            if let Some(shared) = weak.upgrade() {
                Self::finish_review(&shared, input, outcome).await;
            }
        });
        if let Some(previous) = session.review_task.replace(handle) {
            previous.abort();
        }
    }

    #[cfg(feature = "review-gate")]
    async fn finish_review(this: &Arc<Self>, input: ReviewInput, outcome: ReviewOutcome) {
        let published = if outcome.passed {
            this.bounded(this.gateway.publish(&input.blog_id))
                .await
                .map(Some)
        } else {
            Ok(None)
        };
        let rejection = guard::outcome_fault(&outcome, input.word_count);

        let published = {
            let mut session = this.lock();
            if session.disposed
                || session.cycle != input.cycle
                || session.state != WorkflowState::Review
            {
                return;
            }
            session.set_state(WorkflowState::Publish);
            session.review_task = None;
            match &published {
                Ok(Some(url)) => session.draft.apply_published_url(url.clone()),
                Ok(None) => session.notice = rejection.as_ref().map(ToString::to_string),
                Err(e) => session.notice = Some(e.user_message()),
            }
            // a failed publish leaves the submission unpublished
            let outcome = ReviewOutcome {
                passed: outcome.passed && published.is_ok(),
                ..outcome
            };
            session.review = Some(outcome);
            published
        };

        info!(passed = outcome.passed, published = published.is_ok(), "review finished");
        this.progress.on_state(WorkflowState::Publish).await;
        match published {
            Ok(Some(url)) => this.progress.on_published(&url).await,
            Ok(None) => {
                if let Some(fault) = rejection {
                    this.report(fault.into()).await;
                }
            }
            Err(e) => {
                this.report(e).await;
            }
        }
        Self::schedule_reset(this);
    }
}

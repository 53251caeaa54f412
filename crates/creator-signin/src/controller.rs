use std::collections::BTreeMap;
use std::sync::Arc;

use creator_core::{
    transition, validate, Credentials, Field, NormalizedCredentials, SubmissionEvent,
    SubmissionState, ValidationResult,
};
use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Result, SubmissionError};
use crate::port::{NavigationPort, SubmissionPort};

/// What a view needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub values: Credentials,
    pub field_errors: BTreeMap<Field, String>,
    pub form_error: Option<String>,
    pub submission_state: SubmissionState,
}

struct PendingSubmission {
    attempt: u64,
    email: String,
    cancel: CancellationToken,
    handle: JoinHandle<Option<Result<()>>>,
}

/// Owns the sign-in form: field values, the submission state machine and the
/// in-flight authentication task.
///
/// `submit` spawns the port call on the ambient tokio runtime. The outcome is
/// applied only when the owner calls [`FormController::settle`] or
/// [`FormController::poll_completion`], so every state change happens on the
/// owner's thread. Dropping the controller cancels the in-flight call and the
/// navigation port is never invoked afterwards.
pub struct FormController<N: NavigationPort> {
    values: Credentials,
    state: SubmissionState,
    port: Arc<dyn SubmissionPort>,
    navigation: N,
    destination: String,
    attempts: u64,
    pending: Option<PendingSubmission>,
    signed_in: Option<String>,
    redirected: bool,
}

impl<N: NavigationPort> FormController<N> {
    pub fn new(
        port: Arc<dyn SubmissionPort>,
        navigation: N,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            values: Credentials::default(),
            state: SubmissionState::Idle,
            port,
            navigation,
            destination: destination.into(),
            attempts: 0,
            pending: None,
            signed_in: None,
            redirected: false,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn can_submit(&self) -> bool {
        self.state.accepts_submit()
    }

    /// The normalized email that was authenticated, once the form succeeded.
    /// Edits made while submitting do not affect it.
    pub fn signed_in(&self) -> Option<&str> {
        self.signed_in.as_deref()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let (field_errors, form_error) = match self.state.errors() {
            Some(errors) => (errors.fields.clone(), errors.form.clone()),
            None => (BTreeMap::new(), None),
        };
        FormSnapshot {
            values: self.values.clone(),
            field_errors,
            form_error,
            submission_state: self.state.clone(),
        }
    }

    /// Validates the current values and, when they pass, starts the
    /// submission. Ignored while submitting and after success.
    pub fn submit(&mut self) {
        if !self.state.accepts_submit() {
            debug!(state = self.state.label(), "submit ignored");
            return;
        }

        self.apply(SubmissionEvent::SubmitRequested);
        match validate(&self.values) {
            ValidationResult::Invalid(violations) => {
                debug!(
                    fields = violations.iter().count(),
                    "credentials failed validation"
                );
                self.apply(SubmissionEvent::ValidationFailed(violations));
            }
            ValidationResult::Valid(credentials) => {
                self.apply(SubmissionEvent::ValidationPassed);
                self.spawn_submission(credentials);
            }
        }
    }

    /// Waits for the in-flight submission, if any, and applies its outcome.
    ///
    /// Cancel safe: if the returned future is dropped before the task
    /// finishes, the submission stays pending and can still be settled,
    /// polled or cancelled.
    pub async fn settle(&mut self) -> &SubmissionState {
        if let Some(pending) = self.pending.as_mut() {
            let outcome = (&mut pending.handle).await;
            if let Some(pending) = self.pending.take() {
                self.finish(pending, outcome);
            }
        }
        &self.state
    }

    /// Applies the outcome of a submission that has already completed.
    /// Returns `true` when the state changed.
    pub fn poll_completion(&mut self) -> bool {
        let finished = self
            .pending
            .as_ref()
            .map(|pending| pending.handle.is_finished())
            .unwrap_or(false);
        if !finished {
            return false;
        }
        let Some(mut pending) = self.pending.take() else {
            return false;
        };
        let outcome = (&mut pending.handle).now_or_never().unwrap_or_else(|| {
            Ok(Some(Err(SubmissionError::Unavailable(
                "submission task result unavailable".to_string(),
            ))))
        });
        self.finish(pending, outcome);
        true
    }

    /// Abandons the in-flight submission; a late result is discarded.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(attempt = pending.attempt, "cancelling submission");
            pending.cancel.cancel();
            pending.handle.abort();
            self.apply(SubmissionEvent::Cancelled);
        }
    }

    fn spawn_submission(&mut self, credentials: NormalizedCredentials) {
        self.attempts += 1;
        let attempt = self.attempts;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let port = Arc::clone(&self.port);
        let email = credentials.email().to_string();

        debug!(attempt, "submitting credentials");
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                result = port.authenticate(credentials) => Some(result),
            }
        });

        self.pending = Some(PendingSubmission {
            attempt,
            email,
            cancel,
            handle,
        });
    }

    fn finish(
        &mut self,
        pending: PendingSubmission,
        outcome: std::result::Result<Option<Result<()>>, JoinError>,
    ) {
        let attempt = pending.attempt;
        let result = match outcome {
            Ok(Some(result)) => result,
            Ok(None) => {
                debug!(attempt, "discarding cancelled submission");
                return;
            }
            Err(err) if err.is_cancelled() => {
                debug!(attempt, "discarding aborted submission");
                return;
            }
            Err(err) => Err(SubmissionError::Unavailable(err.to_string())),
        };

        match result {
            Ok(()) => {
                self.apply(SubmissionEvent::SubmissionSucceeded);
                if self.state == SubmissionState::Succeeded && !self.redirected {
                    self.redirected = true;
                    self.signed_in = Some(pending.email);
                    info!(attempt, destination = %self.destination, "signed in, redirecting");
                    self.navigation.redirect(&self.destination);
                }
            }
            Err(err) => {
                warn!(attempt, error = %err, "submission failed");
                self.apply(SubmissionEvent::SubmissionFailed(err.to_string()));
            }
        }
    }

    fn apply(&mut self, event: SubmissionEvent) {
        let from = self.state.label();
        self.state = transition(std::mem::take(&mut self.state), event);
        debug!(from, to = self.state.label(), "submission state changed");
    }
}

impl<N: NavigationPort> Drop for FormController<N> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            pending.handle.abort();
        }
    }
}

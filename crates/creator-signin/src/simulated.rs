use std::time::Duration;

use async_trait::async_trait;
use creator_core::NormalizedCredentials;
use tracing::debug;

use crate::error::{Result, SubmissionError};
use crate::port::SubmissionPort;

const REJECTED_MESSAGE: &str = "invalid email or password";

/// Stand-in for a real authentication backend: waits for `delay`, then
/// accepts every email except the ones listed in `reject_emails`.
#[derive(Debug, Clone)]
pub struct SimulatedSubmission {
    delay: Duration,
    reject_emails: Vec<String>,
}

impl SimulatedSubmission {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            reject_emails: Vec::new(),
        }
    }

    /// Emails are compared against the normalized form, so pass normalized values.
    pub fn rejecting<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reject_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl SubmissionPort for SimulatedSubmission {
    async fn authenticate(&self, credentials: NormalizedCredentials) -> Result<()> {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulating authentication");
        tokio::time::sleep(self.delay).await;
        if self
            .reject_emails
            .iter()
            .any(|email| email == credentials.email())
        {
            return Err(SubmissionError::Rejected(REJECTED_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SimulatedSubmission;
    use crate::error::SubmissionError;
    use crate::port::SubmissionPort;
    use creator_core::{validate, Credentials, NormalizedCredentials, ValidationResult};
    use std::time::Duration;

    fn normalized(email: &str) -> NormalizedCredentials {
        match validate(&Credentials::new(email, "Abcdef1!")) {
            ValidationResult::Valid(credentials) => credentials,
            ValidationResult::Invalid(map) => panic!("invalid credentials: {:?}", map),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_delay_then_succeeds() {
        let port = SimulatedSubmission::new(Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        port.authenticate(normalized("ada@example.com"))
            .await
            .expect("authenticated");
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_listed_emails() {
        let port = SimulatedSubmission::new(Duration::from_millis(10))
            .rejecting(["blocked@example.com"]);
        let err = port
            .authenticate(normalized(" Blocked@Example.com "))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected(_)));
    }
}

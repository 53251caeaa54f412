use async_trait::async_trait;
use creator_core::NormalizedCredentials;

use crate::error::Result;

/// Performs the actual authentication call for validated credentials.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn authenticate(&self, credentials: NormalizedCredentials) -> Result<()>;
}

/// Moves the user to the authenticated area. Fire and forget.
pub trait NavigationPort {
    fn redirect(&mut self, path: &str);
}

impl<F> NavigationPort for F
where
    F: FnMut(&str),
{
    fn redirect(&mut self, path: &str) {
        self(path)
    }
}

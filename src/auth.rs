//! Credential handling
//!
//! The pipeline never acquires or refreshes tokens itself. The caller owns
//! the credential lifecycle (the reference deployment refreshes roughly
//! every 50 minutes) and hands this core a possibly-stale snapshot per
//! call. Expired credentials surface as `EnhancerError::Authentication`
//! from the service so the caller can trigger a refresh.

use crate::error::Result;

/// Snapshot of the credentials needed for one Vertex AI call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub project_id: String,
    pub region: String,
}

/// Caller-owned credential source.
///
/// The accessor is synchronous and must be cheap; any network exchange
/// belongs to the collaborator behind it. Failures propagate untouched —
/// this core never catches or retries them.
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Fixed credentials, for tests and short-lived batch runs.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

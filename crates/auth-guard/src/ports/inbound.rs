//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the authorization subsystem, consumed by the HTTP
//! gateway.

use crate::domain::capability::Feature;
use crate::domain::entities::{Admitted, SignedRequest};
use crate::domain::errors::AuthError;

/// Primary authorization API.
///
/// Implementations must be thread-safe (`Send + Sync`); the gateway calls
/// this from many request tasks at once.
#[async_trait::async_trait]
pub trait AuthorizationApi: Send + Sync {
    /// Run the full pipeline for a signed request:
    /// canonicalize, verify the signature, check freshness, check replay.
    ///
    /// Stages before the replay check are pure; a request rejected early
    /// leaves no trace in the replay store and the same signature remains
    /// submittable after the caller fixes the actual problem.
    async fn authorize_request(&self, request: &SignedRequest) -> Result<Admitted, AuthError>;

    /// Authorize a capability-gated operation (no signature, no per-caller
    /// identity): static admin key plus feature flag.
    fn authorize_capability(
        &self,
        provided_key: Option<&str>,
        feature: Feature,
    ) -> Result<(), AuthError>;
}

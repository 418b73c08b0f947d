//! # Capability Gate
//!
//! An orthogonal, simpler mechanism than the signature pipeline: certain
//! operations (file upload, administrative reads) are gated by a static
//! shared secret plus a process-wide feature flag. The gate is stateless
//! and carries no per-caller identity.

use crate::domain::errors::AuthError;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Operations governed by the capability gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feature {
    /// Platform-wide file uploads
    Uploads,
    /// Exposing unpublished configuration to administrators
    AdminReads,
}

/// Static admin capability: shared secret plus feature flags. Read-only
/// after process start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminCapability {
    /// Shared secret compared against the inbound key header.
    /// `None` means the capability is not provisioned; the gate then denies
    /// everything rather than waving requests through.
    pub admin_key: Option<String>,
    pub uploads_enabled: bool,
    pub admin_reads_enabled: bool,
}

impl Default for AdminCapability {
    fn default() -> Self {
        Self {
            admin_key: None,
            uploads_enabled: true,
            admin_reads_enabled: true,
        }
    }
}

impl AdminCapability {
    /// Authorize one capability-gated operation.
    ///
    /// The feature flag is checked first and independently of the key: with
    /// the flag off, even a correct key yields `FeatureDisabled`. Key
    /// comparison is constant-time.
    pub fn authorize(&self, provided_key: Option<&str>, feature: Feature) -> Result<(), AuthError> {
        let enabled = match feature {
            Feature::Uploads => self.uploads_enabled,
            Feature::AdminReads => self.admin_reads_enabled,
        };
        if !enabled {
            return Err(AuthError::FeatureDisabled { feature });
        }

        let expected = self
            .admin_key
            .as_deref()
            .ok_or(AuthError::CapabilityDenied)?;
        let provided = provided_key.ok_or(AuthError::CapabilityDenied)?;

        if constant_time_compare(provided, expected) {
            Ok(())
        } else {
            Err(AuthError::CapabilityDenied)
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Both inputs are padded to the longer length before comparing, so neither
/// content nor length mismatches short-circuit.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let max_len = std::cmp::max(a.len(), b.len());

    // Different pad bytes guarantee a mismatch when lengths differ
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

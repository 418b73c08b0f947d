//! Full pipeline flows through `AuthorizationService`, with genuine
//! client-side signatures produced by the support fixtures.

#[cfg(test)]
mod tests {
    use crate::support::{generate_signer, signed_legacy, signed_typed};
    use auth_guard::{
        AuthConfig, AuthError, AuthorizationApi, AuthorizationService, Feature,
        MemoryReplayStore, OperationPayload,
    };
    use shared_types::Address;
    use std::sync::Arc;

    const NOW: i64 = 1_700_000_000_000;

    fn service() -> AuthorizationService<MemoryReplayStore> {
        AuthorizationService::new(AuthConfig::default(), MemoryReplayStore::new())
    }

    fn register_payload(artist: Address) -> OperationPayload {
        OperationPayload::RegisterSong {
            id: "song-1".to_string(),
            artist_address: artist,
            ipfs_hash: "Qm1".to_string(),
            payment_model: "pay_per_stream".to_string(),
        }
    }

    /// The reference scenario: a signed registration is admitted once,
    /// rejected as a replay on resubmission, and a fresh signature over a
    /// 400s-old timestamp is expired against the default 300s window.
    #[tokio::test]
    async fn test_register_admit_replay_expire() {
        let svc = service();
        let (key, artist) = generate_signer();

        let request = signed_legacy(register_payload(artist), NOW, &key, artist);
        let admitted = svc.authorize_request_at(&request, NOW).await.unwrap();
        assert_eq!(admitted.signer, artist);

        // Byte-identical resubmission
        assert_eq!(
            svc.authorize_request_at(&request, NOW).await,
            Err(AuthError::Replayed)
        );

        // Fresh signature, stale timestamp
        let stale = signed_legacy(register_payload(artist), NOW - 400_000, &key, artist);
        match svc.authorize_request_at(&stale, NOW).await {
            Err(AuthError::Expired { ts_diff_ms }) => assert_eq!(ts_diff_ms, 400_000),
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    /// Same signature raced from many tasks: exactly one admission.
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_duplicate_submission_admitted_once() {
        let svc = Arc::new(service());
        let (key, artist) = generate_signer();
        let request = signed_legacy(register_payload(artist), NOW, &key, artist);

        let mut handles = Vec::new();
        for _ in 0..32 {
            let svc = Arc::clone(&svc);
            let request = request.clone();
            handles.push(tokio::spawn(async move {
                svc.authorize_request_at(&request, NOW).await
            }));
        }

        let mut admitted = 0;
        let mut replayed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(AuthError::Replayed) => replayed += 1,
                Err(other) => panic!("unexpected rejection: {:?}", other),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(replayed, 31);
    }

    /// A typed-data signature is bound to the configured domain; the same
    /// payload signed against a different chain id does not verify.
    #[tokio::test]
    async fn test_typed_signature_bound_to_domain() {
        let svc = service();
        let (key, artist) = generate_signer();

        let domain = svc.config().domain.clone();
        let good = signed_typed(register_payload(artist), NOW, "n-1", &domain, &key, artist);
        assert!(svc.authorize_request_at(&good, NOW).await.is_ok());

        let mut foreign = domain.clone();
        foreign.chain_id += 1;
        let bad = signed_typed(register_payload(artist), NOW, "n-2", &foreign, &key, artist);
        assert_eq!(
            svc.authorize_request_at(&bad, NOW).await,
            Err(AuthError::InvalidSignature)
        );
    }

    /// Legacy and typed signatures over the same payload are independent
    /// replay-wise: each gets its own fingerprint.
    #[tokio::test]
    async fn test_legacy_and_typed_fingerprints_independent() {
        let svc = service();
        let (key, artist) = generate_signer();
        let domain = svc.config().domain.clone();

        let legacy = signed_legacy(register_payload(artist), NOW, &key, artist);
        let typed = signed_typed(register_payload(artist), NOW, "n-1", &domain, &key, artist);

        let a = svc.authorize_request_at(&legacy, NOW).await.unwrap();
        let b = svc.authorize_request_at(&typed, NOW).await.unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    /// The capability gate and the signature pipeline are independent: a
    /// signed request is admitted even while capability checks deny.
    #[tokio::test]
    async fn test_capability_gate_independent_of_signatures() {
        let svc = service();
        let (key, artist) = generate_signer();

        // No admin key configured: capability checks fail closed
        assert_eq!(
            svc.authorize_capability(Some("anything"), Feature::AdminReads),
            Err(AuthError::CapabilityDenied)
        );

        let request = signed_legacy(register_payload(artist), NOW, &key, artist);
        assert!(svc.authorize_request_at(&request, NOW).await.is_ok());
    }
}

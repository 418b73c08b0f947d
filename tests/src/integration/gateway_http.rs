//! Full HTTP round trips through the gateway router via `tower::oneshot`.
//!
//! Requests here carry real signatures over the same canonical forms the
//! handlers rebuild, so the suite exercises the wire contract end to end:
//! status codes, stable reason strings, and the expired delta field.

#[cfg(test)]
mod tests {
    use crate::support::{generate_signer, signature_hex, signed_legacy, test_app};
    use auth_guard::{now_ms, AuthConfig, OperationPayload};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use shared_types::Address;
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        api_key: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// A signed registration body as a client would submit it.
    fn register_body(
        id: &str,
        key: &k256::ecdsa::SigningKey,
        artist: Address,
        timestamp_ms: i64,
    ) -> Value {
        let payload = OperationPayload::RegisterSong {
            id: id.to_string(),
            artist_address: artist,
            ipfs_hash: "QmTestHash".to_string(),
            payment_model: "pay_per_stream".to_string(),
        };
        let request = signed_legacy(payload, timestamp_ms, key, artist);
        json!({
            "id": id,
            "title": "First Song",
            "artistAddress": artist.to_string(),
            "ipfsHash": "QmTestHash",
            "paymentModel": "pay_per_stream",
            "signer": artist.to_string(),
            "signature": signature_hex(&request.signature),
            "timestamp": timestamp_ms,
        })
    }

    fn play_body(
        song_id: &str,
        key: &k256::ecdsa::SigningKey,
        listener: Address,
        timestamp_ms: i64,
    ) -> Value {
        let payload = OperationPayload::LogPlay {
            song_id: song_id.to_string(),
            listener_address: listener,
            amount: "0.01".to_string(),
            payment_type: "stream".to_string(),
        };
        let request = signed_legacy(payload, timestamp_ms, key, listener);
        json!({
            "listenerAddress": listener.to_string(),
            "amount": "0.01",
            "paymentType": "stream",
            "signer": listener.to_string(),
            "signature": signature_hex(&request.signature),
            "timestamp": timestamp_ms,
        })
    }

    #[tokio::test]
    async fn test_register_then_replay() {
        let (app, _) = test_app(AuthConfig::default());
        let (key, artist) = generate_signer();
        let body = register_body("song-1", &key, artist, now_ms());

        let (status, value) = send(&app, "POST", "/api/songs", Some(body.clone()), None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(value["id"], "song-1");
        assert_eq!(value["plays"], 0);

        // Same signed body again
        let (status, value) = send(&app, "POST", "/api/songs", Some(body), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["reason"], "replayed");
    }

    #[tokio::test]
    async fn test_stale_request_expired_with_delta() {
        let (app, _) = test_app(AuthConfig::default());
        let (key, artist) = generate_signer();
        // 400s in the past against a 300s window
        let body = register_body("song-1", &key, artist, now_ms() - 400_000);

        let (status, value) = send(&app, "POST", "/api/songs", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["reason"], "expired");
        assert!(value["ts_diff_ms"].as_i64().unwrap() >= 400_000);
    }

    #[tokio::test]
    async fn test_play_flow_and_unknown_song() {
        let (app, _) = test_app(AuthConfig::default());
        let (key, artist) = generate_signer();
        let (listener_key, listener) = generate_signer();

        let (status, _) = send(
            &app,
            "POST",
            "/api/songs",
            Some(register_body("song-1", &key, artist, now_ms())),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, value) = send(
            &app,
            "POST",
            "/api/songs/song-1/play",
            Some(play_body("song-1", &listener_key, listener, now_ms())),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["plays"], 1);

        let (status, value) = send(
            &app,
            "POST",
            "/api/songs/ghost/play",
            Some(play_body("ghost", &listener_key, listener, now_ms())),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value["reason"], "not_found");
    }

    #[tokio::test]
    async fn test_malformed_address_and_bad_signature() {
        let (app, _) = test_app(AuthConfig::default());
        let (key, artist) = generate_signer();

        let mut body = register_body("song-1", &key, artist, now_ms());
        body["artistAddress"] = json!("not-an-address");
        let (status, value) = send(&app, "POST", "/api/songs", Some(body), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value["reason"], "malformed");

        // Undecodable signature bytes are an authorization failure
        let mut body = register_body("song-2", &key, artist, now_ms());
        body["signature"] = json!("0xdeadbeef");
        let (status, value) = send(&app, "POST", "/api/songs", Some(body), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["reason"], "invalid_signature");
    }

    #[tokio::test]
    async fn test_capability_gated_routes() {
        let mut config = AuthConfig::default();
        config.capability.admin_key = Some("secret-key".to_string());
        let (app, _) = test_app(config);

        // Missing and wrong keys are both denied
        let (status, value) = send(&app, "POST", "/api/upload", None, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value["reason"], "forbidden");

        let (status, _) = send(&app, "POST", "/api/upload", None, Some("wrong")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, value) = send(&app, "POST", "/api/upload", None, Some("secret-key")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "accepted");

        let (status, value) =
            send(&app, "GET", "/api/admin/config", None, Some("secret-key")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["ttlMs"], 300_000);
    }

    #[tokio::test]
    async fn test_disabled_feature_beats_correct_key() {
        let mut config = AuthConfig::default();
        config.capability.admin_key = Some("secret-key".to_string());
        config.capability.uploads_enabled = false;
        let (app, _) = test_app(config);

        let (status, value) = send(&app, "POST", "/api/upload", None, Some("secret-key")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(value["reason"], "uploads_disabled");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app(AuthConfig::default());
        let (status, value) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["status"], "ok");
        assert_eq!(value["replayRecords"], 0);
    }
}

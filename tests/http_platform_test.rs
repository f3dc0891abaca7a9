use drawgen::core::readiness::ReadinessState;
use drawgen::domain::model::ChatOptions;
use drawgen::domain::ports::{AiService, AuthService};
use drawgen::{
    AiResponse, DrawError, DrawingFormat, DrawingSession, GenerationRequest, HttpPlatform,
    LocalStorage, Readiness, SessionConfig,
};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn platform(server: &MockServer, token: Option<&str>) -> HttpPlatform {
    HttpPlatform::new(
        &server.base_url(),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_generate_export_and_save() {
    let server = MockServer::start_async().await;
    let temp_dir = TempDir::new().unwrap();

    let health = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200);
        })
        .await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/ai/chat")
                .header("Authorization", "Bearer tok-1")
                .json_body_partial(r#"{"model":"claude-sonnet-4-5"}"#)
                .body_contains("Description: circle radius 5mm");
            then.status(200)
                .header("Content-Type", "text/plain")
                .body("```dxf\n0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n0\nENDSEC\n0\nEOF\n```");
        })
        .await;
    let user = server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/user");
            then.status(200)
                .json_body(serde_json::json!({"username": "ada"}));
        })
        .await;
    let write = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/fs/write")
                .body_contains("\"path\":\"/models/model_")
                .body_contains("CIRCLE");
            then.status(200);
        })
        .await;
    let kv = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/kv/set")
                .body_contains("\"key\":\"model:model_")
                .body_contains("\"type\":\"2d\"")
                .body_contains("\"prompt\":\"circle radius 5mm\"");
            then.status(200);
        })
        .await;

    let platform = platform(&server, Some("tok-1"));
    let readiness = Readiness::initialize(Arc::new(platform.clone()), Duration::from_secs(2));
    let session = DrawingSession::new(platform, readiness, SessionConfig::default());

    let signed_in = session.refresh_user().await.unwrap();
    assert_eq!(signed_in.display_name(), "ada");

    let result = session
        .generate(GenerationRequest::new("circle radius 5mm", DrawingFormat::Dxf))
        .await
        .unwrap();
    assert!(result.text.starts_with("0\nSECTION"));
    assert!(!result.text.contains("```"));

    let artifact = session.export().await.unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let path = storage.write_artifact(&artifact).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), result.text);

    let saved = session.save().await.unwrap();
    assert!(saved.path.starts_with("/models/model_"));

    health.assert_async().await;
    chat.assert_async().await;
    user.assert_async().await;
    write.assert_async().await;
    kv.assert_async().await;
}

#[tokio::test]
async fn test_structured_chat_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ai/chat");
            then.status(200).json_body(serde_json::json!({
                "message": {"content": [{"type": "text", "text": "```svg\n<svg viewBox=\"0 0 48 48\"/>\n```"}]}
            }));
        })
        .await;

    let platform = platform(&server, None);
    let session = DrawingSession::new(platform, Readiness::ready(), SessionConfig::default());

    let result = session
        .generate(GenerationRequest::new("settings icon", DrawingFormat::Svg))
        .await
        .unwrap();
    assert_eq!(result.text, "<svg viewBox=\"0 0 48 48\"/>");
}

#[tokio::test]
async fn test_chat_reply_shapes_are_preserved() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ai/chat");
            then.status(200).json_body(serde_json::json!("LINE"));
        })
        .await;

    let reply = platform(&server, None)
        .chat(
            "prompt",
            &ChatOptions {
                model: "gpt-5".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(reply, AiResponse::Text("LINE".to_string()));
}

#[tokio::test]
async fn test_chat_server_error_is_generation_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ai/chat");
            then.status(503).body("model overloaded");
        })
        .await;

    let session = DrawingSession::new(
        platform(&server, None),
        Readiness::ready(),
        SessionConfig::default(),
    );
    let result = session
        .generate(GenerationRequest::new("anything", DrawingFormat::Dxf))
        .await;

    match result {
        Err(DrawError::GenerationFailed { message }) => {
            assert!(message.contains("503"));
            assert!(message.contains("model overloaded"));
        }
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn test_failing_health_check_marks_service_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(500);
        })
        .await;
    let chat = server
        .mock_async(|when, then| {
            when.method(POST).path("/ai/chat");
            then.status(200).body("LINE");
        })
        .await;

    let platform = platform(&server, None);
    let readiness = Readiness::initialize(Arc::new(platform.clone()), Duration::from_secs(2));
    let session = DrawingSession::new(platform, readiness.clone(), SessionConfig::default());

    let result = session
        .generate(GenerationRequest::new("anything", DrawingFormat::Dxf))
        .await;

    assert!(matches!(result, Err(DrawError::ServiceUnavailable { .. })));
    assert!(matches!(readiness.state(), ReadinessState::Unavailable(_)));
    assert_eq!(chat.hits_async().await, 0);
}

#[tokio::test]
async fn test_sign_in_without_token_is_cancelled() {
    let server = MockServer::start_async().await;
    let platform = platform(&server, None);

    assert!(matches!(
        platform.sign_in().await,
        Err(DrawError::AuthCancelled)
    ));
    assert_eq!(platform.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn test_rejected_sign_in_is_cancelled() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/sign-in");
            then.status(401);
        })
        .await;

    let platform = platform(&server, Some("expired"));
    assert!(matches!(
        platform.sign_in().await,
        Err(DrawError::AuthCancelled)
    ));
}

#[tokio::test]
async fn test_storage_failure_is_persistence_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ai/chat");
            then.status(200).body("<svg/>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/user");
            then.status(200).json_body(serde_json::json!({"email": "a@b.c"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/fs/write");
            then.status(507);
        })
        .await;

    let session = DrawingSession::new(
        platform(&server, Some("tok")),
        Readiness::ready(),
        SessionConfig::default(),
    );
    session.refresh_user().await;
    session
        .generate(GenerationRequest::new("dot", DrawingFormat::Svg))
        .await
        .unwrap();

    let result = session.save().await;
    assert!(matches!(result, Err(DrawError::PersistenceFailed { .. })));
    assert_eq!(
        session.snapshot().await.last_error.as_deref(),
        Some("Failed to save. Please try again.")
    );
}

#[tokio::test]
async fn test_auth_server_fault_is_service_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/user");
            then.status(500).body("database down");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/sign-in");
            then.status(502);
        })
        .await;

    let platform = platform(&server, Some("tok"));

    match platform.current_user().await {
        Err(DrawError::ServiceUnavailable { reason }) => {
            assert!(reason.contains("500"));
            assert!(reason.contains("database down"));
        }
        other => panic!("expected ServiceUnavailable, got {:?}", other),
    }
    let err = platform.sign_in().await.unwrap_err();
    assert!(matches!(err, DrawError::ServiceUnavailable { .. }));
    assert_ne!(err.severity(), drawgen::utils::error::ErrorSeverity::Critical);
}

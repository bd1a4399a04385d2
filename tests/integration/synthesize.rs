//! Integration tests for the synthesis call.

use crate::integration::mock_server::{unreachable_client, MockServerFixture};
use polly_speech::telemetry::noop_sink;
use polly_speech::{Error, SpeechOptions};

#[tokio::test]
async fn test_audio_matches_response_body() {
    let fixture = MockServerFixture::new().await;
    let audio: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    let mock = fixture.mock_speech(&audio, "19").await;

    let client = fixture.create_test_client().unwrap();
    let result = client
        .synthesize_speech(&SpeechOptions::new("Hello this is Polly"))
        .await
        .expect("synthesis should succeed");

    mock.assert_async().await;
    assert_eq!(result.audio, audio);
    assert_eq!(result.content_type, "audio/mpeg");
    assert_eq!(result.request_id, "19");
    assert_eq!(result.characters_processed(), Some(19));
}

#[tokio::test]
async fn test_request_body_and_signature() {
    let fixture = MockServerFixture::new().await;
    let mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/v1/speech")
            .match_header("content-type", "application/json")
            .match_header("x-amz-date", mockito::Matcher::Regex(r"^\d{8}T\d{6}Z$".into()))
            .match_header(
                "authorization",
                mockito::Matcher::Regex(
                    r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-west-2/polly/aws4_request, SignedHeaders=.*content-type.*, Signature=[0-9a-f]{64}$"
                        .into(),
                ),
            )
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "OutputFormat": "ogg_vorbis",
                "Text": "Guten Tag",
                "VoiceId": "Hans"
            })))
            .with_status(200)
            .with_header("content-type", "audio/ogg")
            .with_header("x-amzn-RequestCharacters", "9")
            .with_body("OggS")
            .create_async()
            .await
    };

    let client = fixture.create_test_client().unwrap();
    let options = SpeechOptions::new("Guten Tag")
        .with_voice_id("Hans")
        .with_output_format("ogg_vorbis");
    let result = client.synthesize_speech(&options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.audio, b"OggS");
    assert_eq!(result.content_type, "audio/ogg");
}

#[tokio::test]
async fn test_options_round_trip_through_echo() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_speech_echo().await;

    let client = fixture.create_test_client().unwrap();
    let options = SpeechOptions::new("round trip \"quoted\" ünïcode").with_voice_id("Amy");
    let result = client.synthesize_speech(&options).await.unwrap();

    let echoed: SpeechOptions = serde_json::from_slice(&result.audio).unwrap();
    assert_eq!(echoed, options);
}

#[tokio::test]
async fn test_missing_characters_header_is_malformed() {
    let fixture = MockServerFixture::new().await;
    let _mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/v1/speech")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body([1u8, 2, 3])
            .create_async()
            .await
    };

    let client = fixture.create_test_client().unwrap();
    let err = client
        .synthesize_speech(&SpeechOptions::new("hi"))
        .await
        .unwrap_err();

    match &err {
        Error::MalformedResponse { context, .. } => {
            assert_eq!(context.field_path.as_deref(), Some("x-amzn-RequestCharacters"));
        }
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_content_type_is_malformed() {
    let fixture = MockServerFixture::new().await;
    let _mock = {
        let mut server = fixture.server.lock().await;
        server
            .mock("POST", "/v1/speech")
            .with_status(200)
            .with_header("x-amzn-RequestCharacters", "2")
            .with_body([1u8, 2, 3])
            .create_async()
            .await
    };

    let client = fixture.create_test_client().unwrap();
    let err = client
        .synthesize_speech(&SpeechOptions::new("hi"))
        .await
        .unwrap_err();

    match &err {
        Error::MalformedResponse { context, .. } => {
            assert_eq!(context.field_path.as_deref(), Some("content-type"));
            assert_eq!(context.source.as_deref(), Some("synthesize_speech"));
        }
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_200_is_remote_error() {
    for (status, reason) in [(403usize, "Forbidden"), (500, "Internal Server Error")] {
        let fixture = MockServerFixture::new().await;
        let body = r#"{"message":"The security token included in the request is invalid."}"#;
        let _mock = fixture
            .mock_error_response("POST", "/v1/speech", status, body)
            .await;

        let client = fixture.create_test_client().unwrap();
        let err = client
            .synthesize_speech(&SpeechOptions::new("hi"))
            .await
            .unwrap_err();

        match err {
            Error::Remote {
                status: got,
                reason: got_reason,
                body: got_body,
            } => {
                assert_eq!(got as usize, status);
                assert_eq!(got_reason, reason);
                assert_eq!(got_body, body);
            }
            other => panic!("expected Remote for {}, got {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_text_too_long_is_left_to_service() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            "POST",
            "/v1/speech",
            400,
            r#"{"message":"Maximum text length has been exceeded"}"#,
        )
        .await;

    let client = fixture.create_test_client().unwrap();
    let long_text = "a".repeat(10_000);
    let err = client
        .synthesize_speech(&SpeechOptions::new(long_text))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = unreachable_client(noop_sink());
    let err = client
        .synthesize_speech(&SpeechOptions::new("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {:?}", err);
}

//! Call sink events emitted by the client.

use crate::integration::mock_server::{unreachable_client, MockServerFixture};
use polly_speech::telemetry::{InMemoryCallSink, Operation, Outcome};
use polly_speech::SpeechOptions;
use std::sync::Arc;

#[tokio::test]
async fn test_success_and_failure_events() {
    let fixture = MockServerFixture::new().await;
    let _speech = fixture.mock_speech(b"ID3audio", "5").await;
    let _voices = fixture
        .mock_error_response("GET", "/v1/voices", 500, r#"{"message":"boom"}"#)
        .await;

    let sink = Arc::new(InMemoryCallSink::new(16));
    let client = fixture.create_test_client_with_sink(sink.clone()).unwrap();

    client
        .synthesize_speech(&SpeechOptions::new("hello"))
        .await
        .unwrap();
    client.describe_voices(None).await.unwrap_err();

    let events = sink.get_events();
    assert_eq!(events.len(), 2);

    let speech = &events[0];
    assert_eq!(speech.operation, Operation::SynthesizeSpeech);
    assert_eq!(speech.outcome, Outcome::Success);
    assert_eq!(speech.status, Some(200));
    assert_eq!(speech.bytes, Some(8));

    let voices = &events[1];
    assert_eq!(voices.operation, Operation::DescribeVoices);
    assert_eq!(voices.outcome, Outcome::Failure);
    assert_eq!(voices.status, Some(500));
    assert_eq!(voices.error_kind.as_deref(), Some("remote"));
}

#[tokio::test]
async fn test_voices_event_reports_body_size() {
    let fixture = MockServerFixture::new().await;
    let body = r#"{"NextToken":"","Voices":[{"Gender":"Female","Id":"Joanna","LanguageCode":"en-US","LanguageName":"US English","Name":"Joanna"}]}"#;
    let _voices = fixture.mock_voices(body).await;

    let sink = Arc::new(InMemoryCallSink::new(4));
    let client = fixture.create_test_client_with_sink(sink.clone()).unwrap();

    let result = client.describe_voices(None).await.unwrap();
    assert_eq!(result.voices.len(), 1);

    let events = sink.get_events_by_operation(Operation::DescribeVoices);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, Outcome::Success);
    assert_eq!(events[0].status, Some(200));
    assert_eq!(events[0].bytes, Some(body.len()));
}

#[tokio::test]
async fn test_transport_failure_event_has_no_status() {
    let sink = Arc::new(InMemoryCallSink::new(4));
    let client = unreachable_client(sink.clone());

    client.describe_voices(None).await.unwrap_err();

    let events = sink.get_events_by_operation(Operation::DescribeVoices);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, None);
    assert_eq!(events[0].error_kind.as_deref(), Some("transport"));
}

use std::time::Duration;

use super::*;

fn prompt(user: &str) -> Prompt {
    Prompt::new("You are a sommelier.", user)
}

#[tokio::test]
async fn test_mock_replying_records_prompts() {
    let model = MockLanguageModel::replying("2, 4");
    let reply = model
        .complete(&prompt("pick two"), CompletionOptions::SELECTION)
        .await
        .unwrap();

    assert_eq!(reply, "2, 4");
    assert_eq!(model.call_count(), 1);
    assert_eq!(model.last_prompt().unwrap().user, "pick two");
}

#[tokio::test]
async fn test_mock_failing() {
    let model = MockLanguageModel::failing();
    let err = model
        .complete(&prompt("x"), CompletionOptions::PAIRING)
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RequestFailed { .. }));
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn test_mock_responder_sees_prompt() {
    let model = MockLanguageModel::with_responder(|p| Ok(format!("echo: {}", p.user)));
    let reply = model
        .complete(&prompt("hello"), CompletionOptions::TASTING_NOTE)
        .await
        .unwrap();
    assert_eq!(reply, "echo: hello");
}

#[tokio::test]
async fn test_mock_delay_can_be_timed_out() {
    let model = MockLanguageModel::replying("late").delay(Duration::from_millis(200));
    let result = tokio::time::timeout(
        Duration::from_millis(20),
        model.complete(&prompt("x"), CompletionOptions::SELECTION),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_backend_dispatches_to_mock() {
    let backend = ChatBackend::Mock(MockLanguageModel::replying("ok"));
    let reply = backend
        .complete(&prompt("x"), CompletionOptions::PAIRING)
        .await
        .unwrap();
    assert_eq!(reply, "ok");
}

#[test]
fn test_completion_presets() {
    assert_eq!(CompletionOptions::SELECTION.max_tokens, 50);
    assert!(CompletionOptions::SELECTION.temperature < CompletionOptions::TASTING_NOTE.temperature);
}

#[test]
fn test_genai_model_debug_hides_client() {
    let model = GenaiModel::new("grok-3", Duration::from_secs(1));
    let debug_str = format!("{:?}", model);
    assert!(debug_str.contains("grok-3"));
    assert_eq!(model.model(), "grok-3");
}

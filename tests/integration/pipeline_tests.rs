/*!
 * End-to-end pipeline tests: known translations through the full
 * dispatcher, and file-level runs through the controller.
 */

use std::sync::Arc;
use std::time::Duration;

use lintra::file_utils::FileManager;
use lintra::pipeline::{BackoffPolicy, OrderedDispatcher, PipelineConfig, RetryPolicy};

use crate::common::mock_translators::MockTranslator;
use crate::common::{create_temp_dir, create_test_file, numbered_lines};

fn fast_config(max_concurrency: usize, max_retries: u32) -> PipelineConfig {
    PipelineConfig {
        max_concurrency,
        retry: RetryPolicy {
            max_retries,
            backoff: BackoffPolicy::Fixed(Duration::ZERO),
        },
        call_cooldown: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_known_translations_come_back_in_input_order() {
    let translator = Arc::new(
        MockTranslator::random_delay(10)
            .with_dictionary(&[("Hello", "Bonjour"), ("World", "Monde")]),
    );
    let dispatcher = OrderedDispatcher::new(translator, fast_config(5, 3));

    let lines = vec!["Hello".to_string(), "World".to_string()];
    let output = dispatcher.run(&lines, "en", "fr", |_, _| {}).await.unwrap();

    assert_eq!(output, vec!["Hello | Bonjour\n", "World | Monde\n"]);
}

#[tokio::test]
async fn test_persistent_failure_spends_the_full_attempt_budget() {
    let translator = Arc::new(MockTranslator::failing_with("quota"));
    let dispatcher = OrderedDispatcher::new(Arc::clone(&translator), fast_config(5, 3));

    let lines = vec!["X".to_string()];
    let output = dispatcher.run(&lines, "en", "fr", |_, _| {}).await.unwrap();

    assert_eq!(output, vec!["X | TRANSLATION_ERROR: quota\n"]);
    assert_eq!(translator.call_count(), 3);
}

#[tokio::test]
async fn test_mixed_blank_and_text_lines_stay_aligned() {
    let translator = Arc::new(MockTranslator::working());
    let dispatcher = OrderedDispatcher::new(Arc::clone(&translator), fast_config(4, 2));

    let lines = vec![
        "Hello".to_string(),
        String::new(),
        "World".to_string(),
    ];
    let output = dispatcher.run(&lines, "en", "de", |_, _| {}).await.unwrap();

    assert_eq!(
        output,
        vec!["Hello | [de] Hello\n", " | \n", "World | [de] World\n"]
    );
    // The blank line never reached the provider
    assert_eq!(translator.call_count(), 2);
}

#[tokio::test]
async fn test_transient_failures_do_not_leak_into_output() {
    let translator = Arc::new(MockTranslator::fail_first(2));
    let dispatcher = OrderedDispatcher::new(translator, fast_config(1, 3));

    let lines = vec!["Hello".to_string()];
    let output = dispatcher.run(&lines, "en", "fr", |_, _| {}).await.unwrap();

    assert_eq!(output, vec!["Hello | [fr] Hello\n"]);
}

#[tokio::test]
async fn test_large_run_preserves_order_and_reports_full_progress() {
    let translator = Arc::new(MockTranslator::random_delay(5));
    let dispatcher = OrderedDispatcher::new(Arc::clone(&translator), fast_config(8, 2));

    let lines = numbered_lines(100);
    let last = Arc::new(std::sync::Mutex::new((0usize, 0usize)));
    let recorder = Arc::clone(&last);

    let output = dispatcher
        .run(&lines, "en", "it", move |completed, total| {
            *recorder.lock().unwrap() = (completed, total);
        })
        .await
        .unwrap();

    assert_eq!(output.len(), 100);
    for (i, line) in output.iter().enumerate() {
        assert!(line.starts_with(&format!("line number {} | ", i)));
    }
    assert_eq!(*last.lock().unwrap(), (100, 100));
    assert_eq!(translator.call_count(), 100);
}

#[tokio::test]
async fn test_file_run_writes_the_expected_output_file() {
    let dir = create_temp_dir().unwrap();
    let input = create_test_file(dir.path(), "input.txt", "Hello\nWorld\n").unwrap();
    let out_dir = dir.path().join("out");

    let translator = Arc::new(
        MockTranslator::working().with_dictionary(&[("Hello", "Bonjour"), ("World", "Monde")]),
    );
    let dispatcher = OrderedDispatcher::new(translator, fast_config(5, 3));

    let lines = FileManager::read_lines(&input).unwrap();
    let output = dispatcher.run(&lines, "en", "fr", |_, _| {}).await.unwrap();

    let output_path = FileManager::generate_output_path(&out_dir, "fr");
    FileManager::write_lines(&output_path, &output).unwrap();

    assert!(output_path.ends_with("Translated_To_FR.txt"));
    let content = FileManager::read_to_string(&output_path).unwrap();
    assert_eq!(content, "Hello | Bonjour\nWorld | Monde\n");
}

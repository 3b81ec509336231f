/*!
 * Tests for single-task retry behavior and backoff policies.
 */

use std::sync::Arc;
use std::time::Duration;

use lintra::pipeline::rate_limit::RateLimiter;
use lintra::pipeline::retry::{self, BackoffPolicy, RetryPolicy, Task};

use crate::common::mock_translators::MockTranslator;

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        backoff: BackoffPolicy::Fixed(Duration::ZERO),
    }
}

fn limiter() -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(5, Duration::ZERO))
}

#[tokio::test]
async fn test_success_on_first_attempt_makes_exactly_one_call() {
    let translator = MockTranslator::working();
    let task = Task::new(0, "Hello", "en", "fr");

    let result = retry::run_task(&task, &translator, &limiter(), &fast_policy(3)).await;

    assert_eq!(result.index, 0);
    assert_eq!(result.line, "Hello | [fr] Hello\n");
    assert_eq!(translator.call_count(), 1);
}

#[tokio::test]
async fn test_recovers_after_transient_failures() {
    let translator = MockTranslator::fail_first(2);
    let task = Task::new(4, "Hello", "en", "de");

    let result = retry::run_task(&task, &translator, &limiter(), &fast_policy(3)).await;

    assert_eq!(result.line, "Hello | [de] Hello\n");
    assert_eq!(translator.call_count(), 3);
}

#[tokio::test]
async fn test_exhausted_retries_produce_a_failure_line() {
    let translator = MockTranslator::failing_with("quota");
    let task = Task::new(7, "X", "en", "fr");

    let result = retry::run_task(&task, &translator, &limiter(), &fast_policy(3)).await;

    assert_eq!(result.index, 7);
    assert_eq!(result.line, "X | TRANSLATION_ERROR: quota\n");
    assert_eq!(translator.call_count(), 3);
}

#[tokio::test]
async fn test_blank_line_skips_the_provider_entirely() {
    let translator = MockTranslator::working();
    let task = Task::new(2, "   ", "en", "fr");

    let result = retry::run_task(&task, &translator, &limiter(), &fast_policy(3)).await;

    assert_eq!(result.line, " | \n");
    assert_eq!(translator.call_count(), 0);
}

#[tokio::test]
async fn test_input_whitespace_is_trimmed_before_translation() {
    let translator = MockTranslator::working();
    let task = Task::new(0, "  Hello \n", "en", "fr");

    let result = retry::run_task(&task, &translator, &limiter(), &fast_policy(1)).await;

    assert_eq!(result.line, "Hello | [fr] Hello\n");
}

#[tokio::test(start_paused = true)]
async fn test_fixed_backoff_waits_between_attempts() {
    let translator = MockTranslator::failing();
    let task = Task::new(0, "Hi", "en", "fr");
    let policy = RetryPolicy {
        max_retries: 3,
        backoff: BackoffPolicy::Fixed(Duration::from_secs(1)),
    };

    let start = tokio::time::Instant::now();
    retry::run_task(&task, &translator, &limiter(), &policy).await;

    // Two sleeps between three attempts; no sleep after the last one
    assert_eq!(start.elapsed(), Duration::from_secs(2));
    assert_eq!(translator.call_count(), 3);
}

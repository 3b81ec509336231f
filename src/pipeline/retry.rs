/*!
 * Per-line retry execution.
 *
 * One task is one input line. A task runs against the translator under the
 * shared rate limiter with a bounded attempt budget; when the budget is
 * exhausted the last error is folded into a failure output line rather than
 * propagated, so a single bad line never takes down the run.
 */

use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::errors::ProviderError;
use crate::providers::Translator;

use super::formatting;
use super::rate_limit::RateLimiter;

/// One line's unit of translation work, addressed by its input position.
///
/// Immutable once created; owned by the worker executing it.
#[derive(Debug, Clone)]
pub struct Task {
    /// Zero-based input position, unique and dense over a run
    pub index: usize,
    /// The line to translate
    pub source_text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl Task {
    pub fn new(
        index: usize,
        source_text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            index,
            source_text: source_text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// The formatted output line for one task, tagged with its input position
#[derive(Debug, Clone)]
pub struct LineResult {
    pub index: usize,
    pub line: String,
}

/// Delay shape between retry attempts
#[derive(Debug, Clone, Copy)]
pub enum BackoffPolicy {
    /// Same delay before every retry
    Fixed(Duration),
    /// Delay grows by the base amount on each retry
    Linear(Duration),
    /// Delay doubles on each retry
    Exponential(Duration),
}

impl BackoffPolicy {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(base) => *base,
            Self::Linear(base) => base.saturating_mul(attempt),
            Self::Exponential(base) => base.saturating_mul(1u32 << (attempt - 1).min(16)),
        }
    }
}

/// Attempt budget and backoff for one task
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per task, including the first
    pub max_retries: u32,
    /// Delay shape between attempts
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffPolicy::Fixed(Duration::from_secs(1)),
        }
    }
}

/// Execute one task to completion.
///
/// Always yields a result line: a success line on the first successful
/// attempt, or a failure line carrying the last error once the attempt
/// budget is spent. The rate limiter permit is held only for the remote
/// call itself, never across a backoff sleep.
pub async fn run_task<T: Translator + ?Sized>(
    task: &Task,
    translator: &T,
    limiter: &RateLimiter,
    policy: &RetryPolicy,
) -> LineResult {
    let trimmed = task.source_text.trim();

    // Translating a blank line is a valid no-op; skip the remote call
    if trimmed.is_empty() {
        debug!("line {}: blank, skipping remote call", task.index);
        return LineResult {
            index: task.index,
            line: formatting::format_success_line(&task.source_text, ""),
        };
    }

    let mut last_error: Option<ProviderError> = None;

    for attempt in 1..=policy.max_retries {
        let permit = limiter.acquire().await;
        let outcome = translator
            .translate(trimmed, &task.source_language, &task.target_language)
            .await;
        drop(permit);

        match outcome {
            Ok(translated) => {
                debug!(
                    "line {}: attempt {}/{} succeeded",
                    task.index, attempt, policy.max_retries
                );
                return LineResult {
                    index: task.index,
                    line: formatting::format_success_line(&task.source_text, &translated),
                };
            }
            Err(e) => {
                warn!(
                    "line {}: attempt {}/{} failed: {}",
                    task.index, attempt, policy.max_retries, e
                );
                last_error = Some(e);
                if attempt < policy.max_retries {
                    sleep(policy.backoff.delay(attempt)).await;
                }
            }
        }
    }

    let message = last_error
        .map(|e| e.brief())
        .unwrap_or_else(|| "no attempts were made".to_string());

    LineResult {
        index: task.index,
        line: formatting::format_failure_line(&task.source_text, &message),
    }
}

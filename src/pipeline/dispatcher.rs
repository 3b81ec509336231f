/*!
 * Order-preserving fan-out over the worker pool.
 *
 * The dispatcher turns an ordered sequence of input lines into the same
 * number of output lines in the same order, while the underlying remote
 * calls complete in whatever order latency dictates. Order is restored by
 * an index-addressed results buffer, not by sorting: each completion writes
 * its own slot, and the run finishes only when every slot is filled.
 */

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::stream::{self, StreamExt};
use log::{debug, error, info};

use crate::errors::PipelineError;
use crate::providers::Translator;

use super::formatting;
use super::rate_limit::RateLimiter;
use super::retry::{self, RetryPolicy, Task};

/// Configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker pool size; also the rate limiter permit count
    pub max_concurrency: usize,
    /// Attempt budget and backoff per line
    pub retry: RetryPolicy,
    /// Minimum spacing between two calls on the same permit slot
    pub call_cooldown: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 5,
            retry: RetryPolicy::default(),
            call_cooldown: Duration::from_secs(1),
        }
    }
}

impl PipelineConfig {
    /// Reject configurations that cannot produce a well-formed run
    fn validate(&self, total_lines: usize) -> Result<(), PipelineError> {
        if self.max_concurrency == 0 {
            return Err(PipelineError::Config(
                "worker pool size must be at least 1".to_string(),
            ));
        }
        if self.retry.max_retries == 0 {
            return Err(PipelineError::Config(
                "attempt budget must be at least 1".to_string(),
            ));
        }
        if total_lines == 0 {
            return Err(PipelineError::Config("input is empty".to_string()));
        }
        Ok(())
    }
}

/// Per-run state: the index-addressed results buffer, the completion
/// counter shared with the progress callback, and the rate limiter all
/// workers contend on. Created fresh for every run; a restart never reuses
/// a previous run's state.
struct PipelineRun {
    slots: Vec<Option<String>>,
    completed: Arc<AtomicUsize>,
    limiter: Arc<RateLimiter>,
}

impl PipelineRun {
    fn new(total_lines: usize, max_concurrency: usize, call_cooldown: Duration) -> Self {
        Self {
            slots: vec![None; total_lines],
            completed: Arc::new(AtomicUsize::new(0)),
            limiter: Arc::new(RateLimiter::new(max_concurrency, call_cooldown)),
        }
    }
}

/// Fans tasks out to the worker pool and reassembles results in input order
pub struct OrderedDispatcher<T: Translator + 'static> {
    translator: Arc<T>,
    config: PipelineConfig,
}

impl<T: Translator + 'static> OrderedDispatcher<T> {
    /// Create a dispatcher over the given translator
    pub fn new(translator: Arc<T>, config: PipelineConfig) -> Self {
        Self { translator, config }
    }

    /// Translate all lines, returning one output line per input line in
    /// input order.
    ///
    /// `progress` is called with `(completed, total)` after every
    /// completion, from the collector rather than the workers, so a slow
    /// reporter cannot stall the pool. Per-line failures are folded into
    /// failure lines; only configuration problems surface as errors.
    pub async fn run(
        &self,
        lines: &[String],
        source_language: &str,
        target_language: &str,
        progress: impl Fn(usize, usize),
    ) -> Result<Vec<String>, PipelineError> {
        self.config.validate(lines.len())?;

        let total = lines.len();
        let mut run = PipelineRun::new(total, self.config.max_concurrency, self.config.call_cooldown);

        debug!(
            "dispatching {} lines across {} workers ({} -> {})",
            total, self.config.max_concurrency, source_language, target_language
        );

        let tasks: Vec<Task> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| Task::new(index, line.clone(), source_language, target_language))
            .collect();

        let limiter = Arc::clone(&run.limiter);
        let mut completions = stream::iter(tasks)
            .map(|task| {
                let translator = Arc::clone(&self.translator);
                let limiter = Arc::clone(&limiter);
                let retry_policy = self.config.retry;

                async move {
                    let index = task.index;
                    let original = task.source_text.clone();

                    // A worker panic must not drop a result slot; it is
                    // downgraded to an anomaly-tagged failure line
                    let outcome = AssertUnwindSafe(retry::run_task(
                        &task,
                        translator.as_ref(),
                        &limiter,
                        &retry_policy,
                    ))
                    .catch_unwind()
                    .await;

                    match outcome {
                        Ok(result) => (index, result.line),
                        Err(panic) => {
                            let message = panic_message(panic);
                            error!("anomaly: worker for line {} panicked: {}", index, message);
                            (index, formatting::format_failure_line(&original, &message))
                        }
                    }
                }
            })
            .buffer_unordered(self.config.max_concurrency);

        while let Some((index, line)) = completions.next().await {
            run.slots[index] = Some(line);
            let done = run.completed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(done, total);
        }
        drop(completions);

        let mut output = Vec::with_capacity(total);
        for (index, slot) in run.slots.into_iter().enumerate() {
            match slot {
                Some(line) => output.push(line),
                None => {
                    return Err(PipelineError::Anomaly(format!(
                        "result slot {} was never filled",
                        index
                    )));
                }
            }
        }

        info!("pipeline run complete: {} lines translated", total);
        Ok(output)
    }
}

/// Extract a printable message from a panic payload
fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

/*!
 * The bounded-concurrency, order-preserving, retrying task pipeline.
 *
 * This module is the core of the application:
 * - `rate_limit`: caps in-flight remote calls and aggregate call rate
 * - `retry`: executes one line with a bounded attempt budget and backoff
 * - `formatting`: the success/failure output line shapes
 * - `dispatcher`: fans tasks out to the pool and reassembles results in
 *   input order
 */

pub mod dispatcher;
pub mod formatting;
pub mod rate_limit;
pub mod retry;

pub use dispatcher::{OrderedDispatcher, PipelineConfig};
pub use formatting::{TRANSLATION_ERROR_MARKER, format_failure_line, format_success_line};
pub use rate_limit::{RateLimiter, RatePermit};
pub use retry::{BackoffPolicy, LineResult, RetryPolicy, Task};

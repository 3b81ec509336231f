/*!
 * Provider implementations for remote translation services.
 *
 * The pipeline treats translation as an opaque, fallible remote capability
 * behind the `Translator` trait; the only shipped implementation talks to
 * Google's public translate endpoint.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// One call translates one piece of text. Implementations must be safe for
/// concurrent use: a single instance is shared by every pool worker.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error;
    ///   every error is treated as retryable by the pipeline
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the service is reachable
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod google;

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{BackoffKind, Config};
use crate::file_utils::FileManager;
use crate::language_utils::{HeuristicDetector, LanguageDetector};
use crate::pipeline::{BackoffPolicy, OrderedDispatcher, PipelineConfig, RetryPolicy};
use crate::providers::Translator;
use crate::providers::google::GoogleTranslate;

// @module: Application controller for line translation runs

/// Number of leading lines sampled for language detection
const DETECTION_SAMPLE_LINES: usize = 20;

/// Main application controller for file translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Access the controller's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the pipeline configuration from the settings
    pub fn pipeline_config(&self) -> PipelineConfig {
        let settings = &self.config.pipeline;
        let base = settings.retry_backoff();
        let backoff = match settings.backoff {
            BackoffKind::Fixed => BackoffPolicy::Fixed(base),
            BackoffKind::Linear => BackoffPolicy::Linear(base),
            BackoffKind::Exponential => BackoffPolicy::Exponential(base),
        };

        PipelineConfig {
            max_concurrency: settings.max_concurrency,
            retry: RetryPolicy {
                max_retries: settings.max_retries,
                backoff,
            },
            call_cooldown: settings.call_cooldown(),
        }
    }

    /// Guess the source language from the leading lines of the input.
    ///
    /// Returns `None` when detection has no signal; the caller decides how
    /// to fall back (interactive selection or a hard error).
    pub fn detect_source_language(&self, lines: &[String]) -> Option<String> {
        let sample: Vec<String> = lines.iter().take(DETECTION_SAMPLE_LINES).cloned().collect();
        match HeuristicDetector.detect(&sample) {
            Ok(code) => Some(code),
            Err(e) => {
                warn!("Language detection failed: {}", e);
                None
            }
        }
    }

    /// Translate one file and write the ordered output.
    ///
    /// Creates a fresh pipeline run; calling this again (e.g. on restart
    /// with a new target language) shares nothing with previous runs.
    pub async fn run_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        source_language: &str,
        target_language: &str,
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::ensure_dir(output_dir)?;

        let lines = FileManager::read_lines(input_file)?;
        info!(
            "Translating {} lines from {} to {}",
            lines.len(),
            source_language,
            target_language
        );

        let results = self
            .translate_lines(&lines, source_language, target_language)
            .await?;

        let output_path = FileManager::generate_output_path(output_dir, target_language);
        FileManager::write_lines(&output_path, &results)
            .context("Failed to write translated output")?;

        let elapsed = start_time.elapsed();
        info!(
            "Translation completed in {} and saved to {:?}",
            Self::format_duration(elapsed),
            output_path
        );

        if let Some(log_file) = &self.config.log_file {
            FileManager::append_to_log_file(
                log_file,
                &format!(
                    "translated {} lines ({} -> {}) into {:?} in {}",
                    lines.len(),
                    source_language,
                    target_language,
                    output_path,
                    Self::format_duration(elapsed)
                ),
            )?;
        }

        Ok(output_path)
    }

    /// Run the pipeline over in-memory lines with a progress bar
    pub async fn translate_lines(
        &self,
        lines: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>> {
        let translator = GoogleTranslate::new(
            &self.config.provider.endpoint,
            self.config.provider.timeout_secs,
        )?;
        debug!("Using endpoint {}", self.config.provider.endpoint);

        let dispatcher = OrderedDispatcher::new(Arc::new(translator), self.pipeline_config());

        let multi_progress = MultiProgress::new();
        let progress_bar = multi_progress.add(ProgressBar::new(lines.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} lines ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let results = self
            .pipeline_run(&dispatcher, lines, source_language, target_language, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await?;

        progress_bar.finish_and_clear();
        Ok(results)
    }

    /// Drive one dispatcher run, mapping pipeline errors into the
    /// application error context
    async fn pipeline_run<T: Translator + 'static>(
        &self,
        dispatcher: &OrderedDispatcher<T>,
        lines: &[String],
        source_language: &str,
        target_language: &str,
        progress: impl Fn(usize, usize),
    ) -> Result<Vec<String>> {
        dispatcher
            .run(lines, source_language, target_language, progress)
            .await
            .context("Translation pipeline failed to start")
    }

    /// Format a duration as a short human-readable string
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {:02}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:01}s", total_secs, duration.subsec_millis() / 100)
        }
    }
}

/*!
 * Output line shapes.
 *
 * Every input line produces exactly one output line, success or not, so a
 * run's output is always traceable back to its input position.
 */

/// Marker prefixed to the error description on an exhausted-retries line
pub const TRANSLATION_ERROR_MARKER: &str = "TRANSLATION_ERROR";

/// Format a successfully translated line.
///
/// The original text is trimmed before formatting; the translated text is
/// kept verbatim.
pub fn format_success_line(original: &str, translated: &str) -> String {
    format!("{} | {}\n", original.trim(), translated)
}

/// Format a line whose translation failed after all attempts
pub fn format_failure_line(original: &str, error_message: &str) -> String {
    format!(
        "{} | {}: {}\n",
        original.trim(),
        TRANSLATION_ERROR_MARKER,
        error_message
    )
}

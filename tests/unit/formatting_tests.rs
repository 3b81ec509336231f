/*!
 * Tests for output line formatting edge cases.
 */

use lintra::pipeline::formatting::{
    TRANSLATION_ERROR_MARKER, format_failure_line, format_success_line,
};

#[test]
fn test_blank_original_yields_a_bare_separator() {
    assert_eq!(format_success_line("   ", ""), " | \n");
}

#[test]
fn test_failure_line_carries_the_marker() {
    let line = format_failure_line("Hello", "quota");
    assert!(line.contains(TRANSLATION_ERROR_MARKER));
    assert!(line.ends_with('\n'));
}

#[test]
fn test_pipe_characters_in_input_are_preserved() {
    assert_eq!(format_success_line("a | b", "c | d"), "a | b | c | d\n");
}

#[test]
fn test_trailing_newline_in_original_is_trimmed() {
    assert_eq!(format_success_line("Hello\n", "Bonjour"), "Hello | Bonjour\n");
}

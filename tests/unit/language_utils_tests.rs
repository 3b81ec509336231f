/*!
 * Tests for the language table lookups and the heuristic detector.
 */

use lintra::language_utils::{
    HeuristicDetector, LanguageDetector, SUPPORTED_LANGUAGES, code_for_name, get_language_name,
    is_supported_code, name_for_code, validate_language_code,
};

#[test]
fn test_name_lookup_normalizes_case_and_whitespace() {
    assert_eq!(name_for_code("FR"), Some("French"));
    assert_eq!(name_for_code(" de "), Some("German"));
    assert_eq!(name_for_code("xx"), None);
}

#[test]
fn test_code_lookup_is_case_insensitive() {
    assert_eq!(code_for_name("french"), Some("fr"));
    assert_eq!(code_for_name("FRENCH"), Some("fr"));
    assert_eq!(code_for_name("Klingon"), None);
}

#[test]
fn test_every_table_entry_round_trips() {
    for (name, code) in SUPPORTED_LANGUAGES.iter() {
        assert!(is_supported_code(code));
        assert_eq!(name_for_code(code), Some(*name));
        assert_eq!(code_for_name(name), Some(*code));
    }
}

#[test]
fn test_validate_falls_back_to_iso_for_unlisted_codes() {
    // Japanese is not in the menu table but is a valid ISO 639-1 code
    assert!(!is_supported_code("ja"));
    assert_eq!(validate_language_code("ja").unwrap(), "ja");
    assert_eq!(validate_language_code(" EN ").unwrap(), "en");
}

#[test]
fn test_language_name_prefers_the_table() {
    assert_eq!(get_language_name("el").unwrap(), "Greek");
    assert_eq!(get_language_name("ja").unwrap(), "Japanese");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_detector_spots_french_prose() {
    let sample = vec![
        "le chat est dans la maison".to_string(),
        "une bonne journée pour tout le monde".to_string(),
        "il est temps de partir".to_string(),
    ];
    assert_eq!(HeuristicDetector.detect(&sample).unwrap(), "fr");
}

#[test]
fn test_detector_spots_greek_by_script() {
    let sample = vec!["καλημέρα σε όλους".to_string()];
    assert_eq!(HeuristicDetector.detect(&sample).unwrap(), "el");
}

#[test]
fn test_detector_ignores_blank_lines_in_the_sample() {
    let sample = vec![
        String::new(),
        "   ".to_string(),
        "the quick brown fox jumps over the lazy dog and it is fine".to_string(),
    ];
    assert_eq!(HeuristicDetector.detect(&sample).unwrap(), "en");
}

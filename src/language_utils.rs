/*!
 * Language utilities for the supported-language table and detection.
 *
 * This module owns the fixed enumeration of languages the tool offers as
 * translation targets, validation of ISO 639-1 codes, and a best-effort
 * language detector used to seed the source language from sample lines.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;

use crate::errors::DetectionError;

/// Display-name / ISO 639-1 code pairs, in menu order.
///
/// Constructed once at process start and exposed read-only. A few entries
/// ("mo", "cnr") predate their ISO assignments but are kept because the
/// remote service accepts them.
pub static SUPPORTED_LANGUAGES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("Bulgarian", "bg"),
        ("Croatian", "hr"),
        ("Czech", "cs"),
        ("Danish", "da"),
        ("Dutch", "nl"),
        ("English", "en"),
        ("Finnish", "fi"),
        ("French", "fr"),
        ("German", "de"),
        ("Greek", "el"),
        ("Hungarian", "hu"),
        ("Italian", "it"),
        ("Polish", "pl"),
        ("Portuguese", "pt"),
        ("Romanian", "ro"),
        ("Slovak", "sk"),
        ("Spanish", "es"),
        ("Swedish", "sv"),
        ("Albanian", "sq"),
        ("Armenian", "hy"),
        ("Azerbaijani", "az"),
        ("Belarusian", "be"),
        ("Bosnian", "bs"),
        ("Catalan", "ca"),
        ("Estonian", "et"),
        ("Faroese", "fo"),
        ("Georgian", "ka"),
        ("Icelandic", "is"),
        ("Irish", "ga"),
        ("Kazakh", "kk"),
        ("Latvian", "lv"),
        ("Lithuanian", "lt"),
        ("Luxembourgish", "lb"),
        ("Macedonian", "mk"),
        ("Maltese", "mt"),
        ("Moldovan", "mo"),
        ("Montenegrin", "cnr"),
        ("Norwegian", "no"),
        ("Serbian", "sr"),
        ("Slovenian", "sl"),
        ("Turkish", "tr"),
        ("Ukrainian", "uk"),
        ("Welsh", "cy"),
    ]
});

/// Look up the display name for a supported language code
pub fn name_for_code(code: &str) -> Option<&'static str> {
    let normalized = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(_, c)| *c == normalized)
        .map(|(name, _)| *name)
}

/// Look up the code for a supported language display name (case-insensitive)
pub fn code_for_name(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(n, _)| n.to_lowercase() == normalized)
        .map(|(_, code)| *code)
}

/// Check whether a code is in the supported-language table
pub fn is_supported_code(code: &str) -> bool {
    name_for_code(code).is_some()
}

/// Validate a language code against the supported table, falling back to
/// ISO 639-1 for codes the table does not carry (e.g. a manually entered
/// source language)
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if is_supported_code(&normalized) {
        return Ok(normalized);
    }

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(normalized);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get a human-readable language name for a code
///
/// Prefers the supported table, then falls back to isolang for any other
/// valid ISO 639-1 code.
pub fn get_language_name(code: &str) -> Result<String> {
    if let Some(name) = name_for_code(code) {
        return Ok(name.to_string());
    }

    let normalized = code.trim().to_lowercase();
    Language::from_639_1(&normalized)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Best-effort language detection from a small sample of text lines.
///
/// Detection accuracy is explicitly not a goal; a failed or wrong guess
/// only costs the user a manual confirmation prompt.
pub trait LanguageDetector {
    /// Detect the dominant language of the sample, as an ISO 639-1 code
    fn detect(&self, sample: &[String]) -> Result<String, DetectionError>;
}

/// Heuristic detector combining Unicode script ranges with function-word
/// frequency scoring, taking a majority vote across the sample lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicDetector;

/// Function words per language, used for scoring Latin- and Cyrillic-script
/// lines. Small on purpose: the winner only needs a plurality.
static STOPWORDS: &[(&str, &[&str])] = &[
    ("en", &["the", "and", "is", "of", "to", "in", "that", "it", "with", "for"]),
    ("fr", &["le", "la", "les", "et", "est", "de", "un", "une", "que", "dans"]),
    ("de", &["der", "die", "das", "und", "ist", "von", "ein", "eine", "nicht", "mit"]),
    ("es", &["el", "la", "los", "las", "es", "de", "un", "una", "que", "por"]),
    ("it", &["il", "la", "gli", "che", "di", "un", "una", "per", "sono", "non"]),
    ("pt", &["o", "a", "os", "as", "de", "um", "uma", "que", "para", "com"]),
    ("nl", &["de", "het", "een", "en", "van", "is", "dat", "niet", "met", "voor"]),
    ("sv", &["och", "att", "det", "som", "en", "ett", "av", "inte", "den", "med"]),
    ("pl", &["i", "w", "nie", "jest", "na", "to", "się", "z", "do", "że"]),
    ("cs", &["a", "je", "se", "na", "to", "v", "že", "s", "pro", "jak"]),
    ("ro", &["și", "de", "la", "un", "o", "este", "în", "cu", "pe", "care"]),
    ("tr", &["ve", "bir", "bu", "için", "ile", "olarak", "da", "de", "ne", "gibi"]),
    ("uk", &["і", "в", "не", "на", "що", "це", "до", "як", "але", "він"]),
    ("sr", &["и", "је", "да", "се", "у", "на", "не", "са", "као", "за"]),
    ("bg", &["и", "е", "на", "да", "в", "не", "се", "за", "че", "то"]),
];

impl HeuristicDetector {
    /// Guess a single line's language, or None when there is no signal
    fn guess_line(line: &str) -> Option<&'static str> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Script ranges pin down the scriptally unambiguous languages
        let greek = trimmed.chars().filter(|c| ('\u{0370}'..='\u{03ff}').contains(c)).count();
        let armenian = trimmed.chars().filter(|c| ('\u{0530}'..='\u{058f}').contains(c)).count();
        let georgian = trimmed.chars().filter(|c| ('\u{10a0}'..='\u{10ff}').contains(c)).count();
        let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count().max(1);

        if greek * 2 > letters {
            return Some("el");
        }
        if armenian * 2 > letters {
            return Some("hy");
        }
        if georgian * 2 > letters {
            return Some("ka");
        }

        // Otherwise score by function words
        let words: Vec<String> = trimmed
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphabetic())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let mut best: Option<(&'static str, usize)> = None;
        for (code, stopwords) in STOPWORDS {
            let score = words.iter().filter(|w| stopwords.contains(&w.as_str())).count();
            if score > 0 && best.is_none_or(|(_, s)| score > s) {
                best = Some((code, score));
            }
        }

        best.map(|(code, _)| code)
    }
}

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, sample: &[String]) -> Result<String, DetectionError> {
        if sample.iter().all(|line| line.trim().is_empty()) {
            return Err(DetectionError::EmptySample);
        }

        let mut votes: Vec<(&'static str, usize)> = Vec::new();
        for line in sample {
            if let Some(code) = Self::guess_line(line) {
                match votes.iter_mut().find(|(c, _)| *c == code) {
                    Some((_, count)) => *count += 1,
                    None => votes.push((code, 1)),
                }
            }
        }

        votes
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(code, _)| code.to_string())
            .ok_or(DetectionError::Undetermined)
    }
}

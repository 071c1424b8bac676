//! The fixed table of languages a caller can pick from the keypad.
//!
//! Codes are the two-letter tags used in callback URLs and for localized
//! strings; locales and voices are the identifiers the telephony platform
//! understands for speech synthesis and recognition.

/// One keypad choice in the language menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    /// Keypad digit that selects this language.
    pub digit: &'static str,
    /// Two-letter language code (e.g. "hi").
    pub code: &'static str,
    /// Platform locale tag (e.g. "hi-IN").
    pub locale: &'static str,
    /// Synthesized voice identifier.
    pub voice: &'static str,
    /// Spoken after the caller picks this language.
    pub confirmation: &'static str,
}

/// Supported languages, in menu order. The first entry is the default.
pub static LANGUAGE_OPTIONS: [LanguageOption; 3] = [
    LanguageOption {
        digit: "1",
        code: "en",
        locale: "en-IN",
        voice: "Google.en-IN-Wavenet-D",
        confirmation: "You have selected English.",
    },
    LanguageOption {
        digit: "2",
        code: "hi",
        locale: "hi-IN",
        voice: "Google.hi-IN-Wavenet-C",
        confirmation: "आपने हिंदी चुनी है।",
    },
    LanguageOption {
        digit: "3",
        code: "kn",
        locale: "kn-IN",
        voice: "Google.kn-IN-Wavenet-A",
        confirmation: "ನೀವು ಕನ್ನಡ ಆಯ್ಕೆ ಮಾಡಿಕೊಂಡಿದ್ದೀರಿ.",
    },
];

/// The language used when the caller has not (validly) chosen one.
pub fn default_language() -> &'static LanguageOption {
    &LANGUAGE_OPTIONS[0]
}

/// Look up a keypad digit. Surrounding whitespace is ignored.
pub fn by_digit(digit: &str) -> Option<&'static LanguageOption> {
    let digit = digit.trim();
    LANGUAGE_OPTIONS.iter().find(|o| o.digit == digit)
}

/// Look up a two-letter language code (exact, case-sensitive).
pub fn by_code(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGE_OPTIONS.iter().find(|o| o.code == code)
}

/// Resolve an optional code from a query string, defaulting when absent or unknown.
pub fn resolve(code: Option<&str>) -> &'static LanguageOption {
    code.and_then(by_code).unwrap_or_else(default_language)
}

/// Whether `code` is one of the supported languages.
pub fn is_supported(code: &str) -> bool {
    by_code(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_map_to_codes() {
        assert_eq!(by_digit("1").map(|o| o.code), Some("en"));
        assert_eq!(by_digit("2").map(|o| o.code), Some("hi"));
        assert_eq!(by_digit("3").map(|o| o.code), Some("kn"));
        assert_eq!(by_digit(" 2 ").map(|o| o.code), Some("hi"));
    }

    #[test]
    fn test_unknown_digits_are_rejected() {
        for digit in ["0", "4", "9", "a", "", "12", "#"] {
            assert!(by_digit(digit).is_none(), "digit {digit:?} should not match");
        }
    }

    #[test]
    fn test_resolve_defaults_to_english() {
        assert_eq!(resolve(None).code, "en");
        assert_eq!(resolve(Some("fr")).code, "en");
        assert_eq!(resolve(Some("HI")).code, "en");
        assert_eq!(resolve(Some("kn")).code, "kn");
    }

    #[test]
    fn test_table_is_consistent() {
        for option in &LANGUAGE_OPTIONS {
            assert!(option.locale.starts_with(option.code));
            assert!(option.voice.contains(option.locale));
            assert!(!option.confirmation.is_empty());
        }
        assert!(is_supported("en"));
        assert!(!is_supported("ta"));
    }
}

//! Internationalization: localized strings spoken to callers.
//!
//! Uses a simple `t(key, lang)` function keyed by the two-letter language
//! code. Supported languages: English (`en`, fallback), Hindi (`hi`),
//! Kannada (`kn`).

/// Return a localized static string for `key` in the given `lang`.
/// Falls back to English for unsupported languages and `"???"` for unknown keys.
pub fn t(key: &str, lang: &str) -> &'static str {
    match key {
        // --- Language menu (each line is read in its own language) ---
        "menu_option" => match lang {
            "hi" => "हिंदी के लिए 2 दबाएं।",
            "kn" => "ಕನ್ನಡಕ್ಕಾಗಿ 3 ಒತ್ತಿರಿ.",
            _ => "Press 1 for English.",
        },
        "invalid_selection" => "Invalid selection. Please try again.",

        // --- Listening prompts ---
        "speak_now" => match lang {
            "hi" => "अब बोलें।",
            "kn" => "ಇದೀಗ ಮಾತನಾಡಿ.",
            _ => "You may speak now.",
        },
        "continue_speaking" => match lang {
            "hi" => "आप जारी रख सकते हैं।",
            "kn" => "ನೀವು ಮುಂದುವರಿಸಬಹುದು.",
            _ => "You may continue speaking.",
        },
        "didnt_catch" => match lang {
            "hi" => "मैंने सुना नहीं, कृपया पुनः प्रयास करें।",
            "kn" => "ನಾನು ಕೇಳಲಿಲ್ಲ, ದಯವಿಟ್ಟು ಪುನಃ ಪ್ರಯತ್ನಿಸಿ.",
            _ => "I didn't catch that. Please try again.",
        },

        // --- Model ---
        "system_prompt" => match lang {
            "en" => {
                "You are an AI that only responds in English, keeping responses short and precise."
            }
            "hi" => "आप केवल हिंदी में उत्तर देने वाले एआई हैं, संक्षिप्त और सटीक उत्तर दें।",
            "kn" => "ನೀವು ಕೇವಲ ಕನ್ನಡದಲ್ಲಿ ಉತ್ತರಿಸುವ ಎಐ, ಉತ್ತರಗಳನ್ನು ಸಂಕ್ಷಿಪ್ತವಾಗಿ ಮತ್ತು ಸ್ಪಷ್ಟವಾಗಿ ಇಡಿ.",
            _ => "You are a helpful assistant.",
        },
        "apology" => match lang {
            "hi" => "मुझे खेद है, मैं आपकी सहायता नहीं कर सकता।",
            "kn" => "ಕ್ಷಮಿಸಿ, ನಾನು ಸಹಾಯ ಮಾಡಲು ಸಾಧ್ಯವಿಲ್ಲ.",
            _ => "Sorry, I am unable to process your request.",
        },

        _ => "???",
    }
}

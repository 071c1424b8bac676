//! Call flow: maps each telephony callback to the next voice document.
//!
//! `Start → LanguageChosen → Listening → (reply) → Listening → …`; the
//! platform drives every transition by invoking the callback URL we hand
//! it, so nothing here keeps state between requests.

use crate::i18n::t;
use crate::responder::Responder;
use tracing::info;
use vaani_core::config::TelephonyConfig;
use vaani_core::language::{self, LanguageOption, LANGUAGE_OPTIONS};
use vaani_telephony::{Gather, Say, VoiceResponse};

pub const INCOMING_CALL_PATH: &str = "/incoming_call";
pub const SELECT_LANGUAGE_PATH: &str = "/select_language";
pub const PROCESS_SPEECH_PATH: &str = "/process_speech";

/// Callback for the next utterance in `lang`.
pub fn speech_callback(telephony: &TelephonyConfig, lang: &LanguageOption) -> String {
    telephony.callback_url(&format!("{PROCESS_SPEECH_PATH}?lang={}", lang.code))
}

/// A speech `Gather` for `lang` that plays the `prompt_key` line.
fn listen(telephony: &TelephonyConfig, lang: &LanguageOption, prompt_key: &str) -> Gather {
    Gather::speech(speech_callback(telephony, lang), lang.locale)
        .say(Say::in_language(t(prompt_key, lang.code), lang))
}

/// Greeting menu: one line per language, each in its own voice.
pub fn incoming_call(telephony: &TelephonyConfig) -> VoiceResponse {
    let gather = LANGUAGE_OPTIONS
        .iter()
        .fold(
            Gather::digits(telephony.callback_url(SELECT_LANGUAGE_PATH), 1),
            |gather, option| gather.say(Say::in_language(t("menu_option", option.code), option)),
        );
    VoiceResponse::new().gather(gather)
}

/// Confirm the chosen language and start listening, or reject the digit.
///
/// An unknown digit ends the interaction unless
/// `redirect_on_invalid_selection` sends the caller back to the menu.
pub fn select_language(telephony: &TelephonyConfig, digits: &str) -> VoiceResponse {
    let Some(option) = language::by_digit(digits) else {
        info!("invalid language selection {digits:?}");
        let response = VoiceResponse::new().say(
            Say::new(t("invalid_selection", language::default_language().code))
                .language(language::default_language().locale),
        );
        return if telephony.redirect_on_invalid_selection {
            response.redirect(telephony.callback_url(INCOMING_CALL_PATH))
        } else {
            response
        };
    };

    info!(lang = option.code, "language selected");
    VoiceResponse::new()
        .say(Say::in_language(option.confirmation, option))
        .gather(listen(telephony, option, "speak_now"))
}

/// Re-prompt after silence or an empty transcript.
pub fn no_speech(telephony: &TelephonyConfig, lang: &LanguageOption) -> VoiceResponse {
    VoiceResponse::new().gather(listen(telephony, lang, "didnt_catch"))
}

/// Speak `reply` and keep listening.
pub fn spoken_reply(
    telephony: &TelephonyConfig,
    lang: &LanguageOption,
    reply: &str,
) -> VoiceResponse {
    VoiceResponse::new()
        .say(Say::in_language(reply, lang))
        .gather(listen(telephony, lang, "continue_speaking"))
}

/// One conversational turn. `lang` is the raw query value.
pub async fn speech_turn(
    telephony: &TelephonyConfig,
    responder: &Responder,
    transcript: Option<&str>,
    lang: Option<&str>,
) -> VoiceResponse {
    let option = language::resolve(lang);
    match transcript.map(str::trim).filter(|t| !t.is_empty()) {
        None => {
            info!(lang = option.code, "no speech captured, re-prompting");
            no_speech(telephony, option)
        }
        Some(text) => {
            let reply = responder.respond(text, option.code).await;
            spoken_reply(telephony, option, &reply.text)
        }
    }
}

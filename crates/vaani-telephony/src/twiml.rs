//! Minimal TwiML document builder.
//!
//! Covers the verbs the IVR flow needs: `Say`, `Gather` (with nested
//! `Say` prompts) and `Redirect`. Text and attribute values are XML-escaped
//! on render.

use std::fmt;
use vaani_core::language::LanguageOption;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A spoken line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Say {
    pub text: String,
    pub language: Option<String>,
    pub voice: Option<String>,
}

impl Say {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            voice: None,
        }
    }

    /// A line spoken with a language's locale and voice.
    pub fn in_language(text: impl Into<String>, option: &LanguageOption) -> Self {
        Self::new(text).language(option.locale).voice(option.voice)
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<Say");
        push_attr(out, "language", self.language.as_deref());
        push_attr(out, "voice", self.voice.as_deref());
        out.push('>');
        out.push_str(&escape(&self.text));
        out.push_str("</Say>");
    }
}

/// What a `Gather` listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatherInput {
    Dtmf,
    Speech,
}

impl GatherInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dtmf => "dtmf",
            Self::Speech => "speech",
        }
    }
}

/// Collect keypad digits or speech, then POST the result to `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gather {
    pub action: String,
    pub input: GatherInput,
    pub num_digits: Option<u32>,
    pub language: Option<String>,
    /// Invoke `action` even when nothing was captured.
    pub action_on_empty_result: bool,
    /// Prompts played while listening.
    pub prompts: Vec<Say>,
}

impl Gather {
    /// Collect exactly `num_digits` keypad presses.
    pub fn digits(action: impl Into<String>, num_digits: u32) -> Self {
        Self {
            action: action.into(),
            input: GatherInput::Dtmf,
            num_digits: Some(num_digits),
            language: None,
            action_on_empty_result: false,
            prompts: Vec::new(),
        }
    }

    /// Collect one utterance in `locale`, calling back even on silence.
    pub fn speech(action: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            input: GatherInput::Speech,
            num_digits: None,
            language: Some(locale.into()),
            action_on_empty_result: true,
            prompts: Vec::new(),
        }
    }

    pub fn say(mut self, say: Say) -> Self {
        self.prompts.push(say);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<Gather");
        push_attr(out, "action", Some(&self.action));
        if self.action_on_empty_result {
            push_attr(out, "actionOnEmptyResult", Some("true"));
        }
        push_attr(out, "input", Some(self.input.as_str()));
        push_attr(out, "language", self.language.as_deref());
        let num_digits = self.num_digits.map(|n| n.to_string());
        push_attr(out, "numDigits", num_digits.as_deref());
        if self.prompts.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for say in &self.prompts {
            say.write_xml(out);
        }
        out.push_str("</Gather>");
    }
}

/// One top-level instruction in a response document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Say(Say),
    Gather(Gather),
    Redirect(String),
}

/// A complete `<Response>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, say: Say) -> Self {
        self.verbs.push(Verb::Say(say));
        self
    }

    pub fn gather(mut self, gather: Gather) -> Self {
        self.verbs.push(Verb::Gather(gather));
        self
    }

    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Redirect(url.into()));
        self
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The first `Gather`, if the document collects input.
    pub fn find_gather(&self) -> Option<&Gather> {
        self.verbs.iter().find_map(|v| match v {
            Verb::Gather(g) => Some(g),
            _ => None,
        })
    }

    /// Every spoken line, top-level and nested, in document order.
    pub fn spoken_lines(&self) -> Vec<&Say> {
        let mut lines = Vec::new();
        for verb in &self.verbs {
            match verb {
                Verb::Say(s) => lines.push(s),
                Verb::Gather(g) => lines.extend(g.prompts.iter()),
                Verb::Redirect(_) => {}
            }
        }
        lines
    }

    /// Whether the document hands control back to us via any callback.
    pub fn has_callback(&self) -> bool {
        self.verbs
            .iter()
            .any(|v| matches!(v, Verb::Gather(_) | Verb::Redirect(_)))
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(XML_DECLARATION);
        if self.verbs.is_empty() {
            out.push_str("<Response/>");
            return out;
        }
        out.push_str("<Response>");
        for verb in &self.verbs {
            match verb {
                Verb::Say(s) => s.write_xml(&mut out),
                Verb::Gather(g) => g.write_xml(&mut out),
                Verb::Redirect(url) => {
                    out.push_str("<Redirect>");
                    out.push_str(&escape(url));
                    out.push_str("</Redirect>");
                }
            }
        }
        out.push_str("</Response>");
        out
    }
}

impl fmt::Display for VoiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

fn push_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}

/// Escape the five XML special characters.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaani_core::language;

    #[test]
    fn test_empty_response() {
        assert_eq!(
            VoiceResponse::new().to_xml(),
            r#"<?xml version="1.0" encoding="UTF-8"?><Response/>"#
        );
    }

    #[test]
    fn test_say_with_language_and_voice() {
        let xml = VoiceResponse::new()
            .say(Say::new("Invalid selection. Please try again.").language("en"))
            .to_xml();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Say language="en">Invalid selection. Please try again.</Say></Response>"#
        );
    }

    #[test]
    fn test_digit_gather_with_prompts() {
        let xml = VoiceResponse::new()
            .gather(
                Gather::digits("/select_language", 1)
                    .say(Say::new("Press 1.").language("en-IN").voice("Google.en-IN-Wavenet-D")),
            )
            .to_xml();
        assert!(xml.contains(
            r#"<Gather action="/select_language" input="dtmf" numDigits="1"><Say language="en-IN" voice="Google.en-IN-Wavenet-D">Press 1.</Say></Gather>"#
        ));
    }

    #[test]
    fn test_speech_gather_attributes() {
        let hindi = language::by_code("hi").unwrap();
        let gather = Gather::speech("/process_speech?lang=hi", hindi.locale)
            .say(Say::in_language("अब बोलें।", hindi));
        let xml = VoiceResponse::new().gather(gather).to_xml();
        assert!(xml.contains(
            r#"<Gather action="/process_speech?lang=hi" actionOnEmptyResult="true" input="speech" language="hi-IN">"#
        ));
        assert!(xml.contains(r#"<Say language="hi-IN" voice="Google.hi-IN-Wavenet-C">अब बोलें।</Say>"#));
    }

    #[test]
    fn test_empty_gather_self_closes() {
        let xml = VoiceResponse::new()
            .gather(Gather::speech("/x", "en-IN"))
            .to_xml();
        assert!(xml.contains(r#"language="en-IN"/>"#));
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let xml = VoiceResponse::new()
            .say(Say::new(r#"Fish & chips < "cheap" > 'dear'"#))
            .redirect("/incoming_call?a=1&b=2")
            .to_xml();
        assert!(xml.contains("Fish &amp; chips &lt; &quot;cheap&quot; &gt; &apos;dear&apos;"));
        assert!(xml.contains("<Redirect>/incoming_call?a=1&amp;b=2</Redirect>"));
        assert!(!xml.contains("a=1&b"));
    }

    #[test]
    fn test_structure_accessors() {
        let response = VoiceResponse::new()
            .say(Say::new("one"))
            .gather(Gather::digits("/next", 1).say(Say::new("two")))
            .redirect("/again");
        assert_eq!(response.verbs().len(), 3);
        assert!(response.has_callback());
        assert_eq!(response.find_gather().map(|g| g.action.as_str()), Some("/next"));
        let lines = response.spoken_lines();
        let texts: Vec<&str> = lines.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert!(response.to_string().ends_with("<Redirect>/again</Redirect></Response>"));

        let dead_end = VoiceResponse::new().say(Say::new("bye"));
        assert!(!dead_end.has_callback());
        assert!(dead_end.find_gather().is_none());
    }
}

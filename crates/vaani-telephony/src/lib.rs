//! # vaani-telephony
//!
//! Voice-markup (TwiML) generation and inbound webhook payloads for the
//! Twilio-style telephony platform.

pub mod twiml;
pub mod webhook;

pub use twiml::{Gather, GatherInput, Say, Verb, VoiceResponse};
pub use webhook::VoiceWebhook;

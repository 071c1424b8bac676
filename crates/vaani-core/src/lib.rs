//! # vaani-core
//!
//! Core types, traits, configuration, and error handling for the Vaani IVR bridge.

pub mod config;
pub mod context;
pub mod error;
pub mod language;
pub mod reply;
pub mod traits;

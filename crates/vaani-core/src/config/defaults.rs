//! Default value functions for serde.

pub(super) fn default_name() -> String {
    "Vaani".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_host() -> String {
    "0.0.0.0".to_string()
}
pub(super) fn default_port() -> u16 {
    8000
}
pub(super) fn default_markup_content_type() -> String {
    "text/plain; charset=utf-8".to_string()
}
pub(super) fn default_max_body_bytes() -> usize {
    64 * 1024
}
pub(super) fn default_provider() -> String {
    "groq".to_string()
}
pub(super) fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
pub(super) fn default_timeout_secs() -> u64 {
    30
}

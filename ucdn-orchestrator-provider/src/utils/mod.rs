//! Utility modules.

/// Log sanitization utilities to prevent certificate and key exposure.
pub mod log_sanitizer;

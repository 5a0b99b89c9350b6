//! Logging infrastructure.
//!
//! Structured logging via `tracing`, plus scrubbing of key material from any
//! free text that reaches a log line. Secrets themselves are never logged;
//! scrubbing exists for text that merely *might* embed one, such as a helper
//! command carrying an inline token.

pub mod logger;
pub mod secret_scrubbing;

pub use logger::init_logging;
pub use secret_scrubbing::{scrub, SecretScrubber};

//! Speech synthesis engines.
//!
//! This module contains implementations of text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `bark` - Bark TTS (Python `bark` package required at runtime, enabled by default)

#[cfg(feature = "bark")]
pub mod bark;

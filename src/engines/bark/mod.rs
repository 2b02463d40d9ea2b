//! Bark text-to-speech engine implementation.
//!
//! This module exposes Suno's Bark model through the plugin interface of a
//! voice-assistant framework. Bark itself is not reimplemented: generation
//! runs through a [`BarkBackend`], and [`PythonBark`] drives the Python
//! `bark` package in a long-lived worker process.
//!
//! # System Requirements
//!
//! The default backend needs Python 3 with Bark installed:
//!
//! ```text
//! pip install suno-bark
//! ```
//!
//! Models are downloaded on first preload into `~/.cache/suno/bark_v0`
//! (or `$XDG_CACHE_HOME/suno/bark_v0`).
//!
//! # Configuration
//!
//! | Key | Default | Meaning |
//! |---|---|---|
//! | `use_cuda` | `false` | Let the model library see GPUs |
//! | `small_models` | `true` | Use the reduced-size checkpoints |
//! | `voice` | `"v2/en_speaker_6"` | Speaker prompt |
//! | `temperature` | `0.6` | Semantic sampling temperature |
//! | `min_eos_p` | `0.05` | End-of-speech probability threshold |
//! | `cache_dir` | unset | Weight cache directory |
//! | `python` | `python3` | Interpreter for [`PythonBark`] |
//!
//! `use_cuda` and `small_models` reach the model library as environment
//! toggles (`CUDA_VISIBLE_DEVICES`, `SUNO_USE_SMALL_MODELS`). Only one
//! combination can be active per process; see [`runtime`].
//!
//! # Voices
//!
//! Speaker prompts follow `v2/{lang}_speaker_{0..9}` for the 13 languages in
//! [`presets::PRESET_LANGUAGES`]. [`presets::plugin_config`] lists them with
//! their gender for registry UIs. The region-qualified voice archives in
//! [`catalog`] are looked up separately.
//!
//! # Examples
//!
//! ## Plugin
//!
//! ```rust,no_run
//! use bark_tts::engines::bark::{BarkPlugin, PythonBark};
//! use std::path::Path;
//!
//! let config = serde_json::json!({"voice": "v2/en_speaker_6", "use_cuda": false});
//! let mut plugin = BarkPlugin::from_value("en-us", config, PythonBark::new())?;
//! let (path, phonemes) = plugin.get_tts("hey mycroft", Path::new("hello.wav"), None)?;
//! assert!(phonemes.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Engine
//!
//! ```rust,no_run
//! use bark_tts::{SynthesisEngine, engines::bark::{BarkEngine, BarkInferenceParams, PythonBark}};
//! use std::path::PathBuf;
//!
//! let mut engine = BarkEngine::new(PythonBark::new());
//! engine.load_model()?;
//!
//! let params = BarkInferenceParams {
//!     voice: "v2/de_speaker_3".to_string(),
//!     temperature: 0.7,
//!     ..Default::default()
//! };
//!
//! engine.synthesize_to_file("Hallo Welt!", &PathBuf::from("out.wav"), Some(params))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod model;
pub mod plugin;
pub mod presets;
pub mod runtime;
pub mod worker;

pub use catalog::{url_for_voice, voices_for_language, VoiceEntry};
pub use config::{BarkConfig, BarkConfigBuilder};
pub use engine::{BarkEngine, BarkInferenceParams, BarkModelParams};
pub use model::{BarkBackend, BarkError, SAMPLE_RATE};
pub use plugin::BarkPlugin;
pub use presets::{speaker_presets_for, Gender, SpeakerPreset};
pub use runtime::DeviceConfig;
pub use worker::PythonBark;

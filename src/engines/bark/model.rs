use super::runtime::DeviceConfig;

/// Output sample rate of the Bark waveform decoder.
pub const SAMPLE_RATE: u32 = 24000;

#[derive(thiserror::Error, Debug)]
pub enum BarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Language '{0}' not found. Call languages() to see declared languages.")]
    LanguageNotFound(String),
    #[error("Voice '{0}' not found in the voice catalog.")]
    VoiceNotFound(String),
    #[error("No speaker presets for language '{0}'.")]
    UnsupportedPresetLanguage(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(
        "Device toggles already set to {active:?} for this process; cannot reconfigure to {requested:?}"
    )]
    ToggleConflict {
        active: DeviceConfig,
        requested: DeviceConfig,
    },
    #[error("Model initialization failed: {0}")]
    ModelInitialization(String),
    #[error("Generation failed: {0}")]
    Generation(String),
    #[error("Cannot synthesize empty text")]
    EmptyText,
    #[error("Model not loaded. Call load_model() first.")]
    ModelNotLoaded,
    #[error("Python interpreter '{0}' not found. Install Python 3 with `pip install suno-bark`.")]
    PythonNotFound(String),
    #[error("Bark worker error: {0}")]
    Worker(String),
}

impl BarkError {
    /// True for unknown language, voice, or preset-language lookups.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            BarkError::LanguageNotFound(_)
                | BarkError::VoiceNotFound(_)
                | BarkError::UnsupportedPresetLanguage(_)
        )
    }
}

/// The model library that does the actual work.
///
/// Text is turned into semantic tokens conditioned on a speaker prompt, and
/// the tokens are decoded into a waveform with the same prompt. Every call
/// blocks until the model answers.
pub trait BarkBackend {
    /// Download (if needed) and load every model into memory.
    ///
    /// Must run before any generation call. The device configuration is
    /// passed explicitly so backends can apply it to their own loader.
    fn preload_models(&mut self, device: &DeviceConfig) -> Result<(), BarkError>;

    /// Produce semantic tokens for `text`.
    fn generate_text_semantic(
        &mut self,
        text: &str,
        voice: &str,
        temperature: f32,
        min_eos_p: f32,
    ) -> Result<Vec<i64>, BarkError>;

    /// Decode semantic tokens into mono samples at `sample_rate()`.
    fn semantic_to_waveform(&mut self, tokens: &[i64], voice: &str) -> Result<Vec<f32>, BarkError>;

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    /// Free whatever `preload_models` acquired.
    fn release(&mut self) {}
}

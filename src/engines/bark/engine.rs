use std::time::Instant;

use crate::{SynthesisEngine, SynthesisResult};

use super::config::{DEFAULT_MIN_EOS_P, DEFAULT_TEMPERATURE, DEFAULT_VOICE};
use super::model::{BarkBackend, BarkError};
use super::runtime::DeviceConfig;

/// Parameters for configuring Bark model loading.
#[derive(Debug, Clone, Default)]
pub struct BarkModelParams {
    /// Device and model-size toggles handed to the backend's loader.
    pub device: DeviceConfig,
}

/// Parameters for configuring a Bark synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct BarkInferenceParams {
    /// Speaker prompt (e.g. `"v2/en_speaker_6"`, `"v2/ja_speaker_3"`).
    pub voice: String,
    /// Sampling temperature for semantic token generation.
    pub temperature: f32,
    /// End-of-speech probability threshold.
    pub min_eos_p: f32,
}

impl Default for BarkInferenceParams {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            min_eos_p: DEFAULT_MIN_EOS_P,
        }
    }
}

/// Bark text-to-speech engine.
///
/// Runs the two Bark stages through a [`BarkBackend`]: text to semantic
/// tokens, then semantic tokens to a waveform, both conditioned on the same
/// speaker prompt.
///
/// ```rust,no_run
/// use bark_tts::{SynthesisEngine, engines::bark::{BarkEngine, PythonBark}};
///
/// let mut engine = BarkEngine::new(PythonBark::new());
/// engine.load_model()?;
/// let result = engine.synthesize("Hello, world!", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BarkEngine<B: BarkBackend> {
    backend: B,
    loaded: Option<DeviceConfig>,
}

impl<B: BarkBackend> BarkEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            loaded: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn sample_rate(&self) -> u32 {
        self.backend.sample_rate()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Preload every model through the backend.
    pub fn load(&mut self, params: &BarkModelParams) -> Result<(), BarkError> {
        let start = Instant::now();
        log::info!(
            "Preloading Bark models (use_cuda={}, small_models={})",
            params.device.use_cuda,
            params.device.small_models
        );
        self.backend.preload_models(&params.device)?;
        self.loaded = Some(params.device);
        log::info!("Bark models ready in {:.2?}", start.elapsed());
        Ok(())
    }

    /// Run both generation stages and return the waveform.
    pub fn generate(
        &mut self,
        text: &str,
        params: &BarkInferenceParams,
    ) -> Result<SynthesisResult, BarkError> {
        if self.loaded.is_none() {
            return Err(BarkError::ModelNotLoaded);
        }
        if text.trim().is_empty() {
            return Err(BarkError::EmptyText);
        }

        let start = Instant::now();
        let tokens = self.backend.generate_text_semantic(
            text,
            &params.voice,
            params.temperature,
            params.min_eos_p,
        )?;
        log::debug!(
            "Generated {} semantic tokens with {} in {:.2?}",
            tokens.len(),
            params.voice,
            start.elapsed()
        );
        if tokens.is_empty() {
            return Err(BarkError::Generation(format!(
                "no semantic tokens produced for {text:?}"
            )));
        }

        let samples = self.backend.semantic_to_waveform(&tokens, &params.voice)?;
        if samples.is_empty() {
            return Err(BarkError::Generation(format!(
                "empty waveform for {text:?}"
            )));
        }

        let result = SynthesisResult {
            samples,
            sample_rate: self.backend.sample_rate(),
        };
        log::debug!(
            "Synthesized {:.2}s of audio in {:.2?}",
            result.duration_secs(),
            start.elapsed()
        );
        Ok(result)
    }
}

impl<B: BarkBackend> Drop for BarkEngine<B> {
    fn drop(&mut self) {
        self.unload_model();
    }
}

impl<B: BarkBackend> SynthesisEngine for BarkEngine<B> {
    type SynthesisParams = BarkInferenceParams;
    type ModelParams = BarkModelParams;

    fn load_model_with_params(
        &mut self,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.load(&params)?)
    }

    fn unload_model(&mut self) {
        if self.loaded.take().is_some() {
            self.backend.release();
        }
    }

    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
        let p = params.unwrap_or_default();
        Ok(self.generate(text, &p)?)
    }
}

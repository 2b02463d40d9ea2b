use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::engine::{BarkInferenceParams, BarkModelParams};
use super::model::BarkError;
use super::runtime::DeviceConfig;

pub const DEFAULT_VOICE: &str = "v2/en_speaker_6";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
/// How readily generation decides the utterance is over.
pub const DEFAULT_MIN_EOS_P: f32 = 0.05;

/// Plugin configuration as handed over by the host framework.
///
/// Every key is optional. Keys this plugin does not know are ignored, since
/// hosts put their own bookkeeping in the same map.
///
/// ```rust
/// use bark_tts::engines::bark::BarkConfigBuilder;
///
/// let config = BarkConfigBuilder::default()
///     .voice("v2/de_speaker_3")
///     .temperature(0.7)
///     .build()
///     .unwrap();
/// assert!(config.small_models);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
#[builder(default)]
pub struct BarkConfig {
    pub use_cuda: bool,
    pub small_models: bool,
    pub temperature: f32,
    pub min_eos_p: f32,
    /// Speaker prompt, e.g. `"v2/en_speaker_6"`.
    #[builder(setter(into))]
    pub voice: String,
    /// Where the model library keeps downloaded weights.
    #[builder(setter(into, strip_option))]
    pub cache_dir: Option<PathBuf>,
    /// Interpreter used by [`PythonBark`](super::PythonBark).
    #[builder(setter(into, strip_option))]
    pub python: Option<PathBuf>,
}

impl Default for BarkConfig {
    fn default() -> Self {
        Self {
            use_cuda: false,
            small_models: true,
            temperature: DEFAULT_TEMPERATURE,
            min_eos_p: DEFAULT_MIN_EOS_P,
            voice: DEFAULT_VOICE.to_string(),
            cache_dir: None,
            python: None,
        }
    }
}

impl BarkConfig {
    /// Read the host's key/value map.
    pub fn from_value(value: serde_json::Value) -> Result<Self, BarkError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| BarkError::Config(e.to_string()))
    }

    pub fn from_json_str(json: &str) -> Result<Self, BarkError> {
        serde_json::from_str(json).map_err(|e| BarkError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), BarkError> {
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(BarkError::Config(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.min_eos_p) {
            return Err(BarkError::Config(format!(
                "min_eos_p must be within [0, 1], got {}",
                self.min_eos_p
            )));
        }
        if self.voice.trim().is_empty() {
            return Err(BarkError::Config("voice must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn device(&self) -> DeviceConfig {
        DeviceConfig {
            use_cuda: self.use_cuda,
            small_models: self.small_models,
        }
    }

    pub fn model_params(&self) -> BarkModelParams {
        BarkModelParams {
            device: self.device(),
        }
    }

    pub fn inference_params(&self) -> BarkInferenceParams {
        BarkInferenceParams {
            voice: self.voice.clone(),
            temperature: self.temperature,
            min_eos_p: self.min_eos_p,
        }
    }
}

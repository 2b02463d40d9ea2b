//! # bark-tts
//!
//! A Rust library exposing the Bark text-to-speech model through the plugin
//! interface of a voice-assistant framework.
//!
//! ## Features
//!
//! - **Bark TTS**: Generative speech through the `bark` model library
//! - **Voice Catalog**: Static per-language voice tables and speaker presets
//! - **Plugin Adapter**: Construct once from a key/value config, then write one WAV per utterance
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bark-tts = { version = "2026.10", features = ["bark"] }
//! ```
//!
//! ```ignore
//! use std::path::Path;
//! use bark_tts::engines::bark::{BarkConfig, BarkPlugin, PythonBark};
//!
//! let mut plugin = BarkPlugin::new("en-us", BarkConfig::default(), PythonBark::new())?;
//! let (path, phonemes) = plugin.get_tts("Hello, world!", Path::new("output.wav"), None)?;
//! assert!(phonemes.is_none());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engines;

use std::path::Path;

/// The result of a synthesis (text-to-speech) operation.
///
/// Contains raw f32 audio samples and the sample rate of the output audio.
#[derive(Debug)]
pub struct SynthesisResult {
    /// Raw audio samples as f32 values
    pub samples: Vec<f32>,
    /// Sample rate of the audio (24000 for Bark)
    pub sample_rate: u32,
}

impl SynthesisResult {
    /// Write the audio to a 32-bit float WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Write the audio to a 16-bit integer PCM WAV file.
    ///
    /// Samples outside `[-1.0, 1.0]` are clamped.
    pub fn write_wav_pcm16(&self, path: &Path) -> Result<(), hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sample in &self.samples {
            let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
            writer.write_sample(scaled)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Common interface for text-to-speech synthesis engines.
///
/// This trait defines the standard operations that all synthesis engines must support.
/// Each engine may have different parameter types for model loading and inference configuration.
pub trait SynthesisEngine {
    /// Parameters for configuring inference behavior (voice, temperature, etc.)
    type SynthesisParams;
    /// Parameters for configuring model loading (device, model size, etc.)
    type ModelParams: Default;

    /// Load the model using default parameters.
    fn load_model(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.load_model_with_params(Self::ModelParams::default())
    }

    /// Load the model with custom parameters.
    fn load_model_with_params(
        &mut self,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Unload the currently loaded model and free associated resources.
    fn unload_model(&mut self);

    /// Synthesize speech from the given text.
    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<SynthesisResult, Box<dyn std::error::Error>>;

    /// Synthesize speech from the given text and write to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `SynthesisResult::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.synthesize(text, params)?.write_wav(wav_path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::SynthesisResult;

    #[test]
    fn duration_follows_sample_rate() {
        let result = SynthesisResult {
            samples: vec![0.0; 12_000],
            sample_rate: 24_000,
        };
        assert!((result.duration_secs() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn pcm16_output_clamps_out_of_range_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clamped.wav");
        let result = SynthesisResult {
            samples: vec![2.0, -2.0, 0.0],
            sample_rate: 24_000,
        };
        result.write_wav_pcm16(&path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX, 0]);
    }

    #[test]
    fn float_output_keeps_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let result = SynthesisResult {
            samples: vec![0.25, -0.5],
            sample_rate: 24_000,
        };
        result.write_wav(&path).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_format, hound::SampleFormat::Float);
        assert_eq!(reader.spec().sample_rate, 24_000);
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.25, -0.5]);
    }
}

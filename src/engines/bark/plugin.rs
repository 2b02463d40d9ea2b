use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::catalog::primary_language;
use super::config::BarkConfig;
use super::engine::{BarkEngine, BarkInferenceParams};
use super::model::{BarkBackend, BarkError};
use super::presets::{self, SpeakerPreset};
use super::runtime;

/// Bark as a voice-assistant TTS plugin.
///
/// Construction does all the slow work: it fixes the process device toggles,
/// preloads every model and captures the generation parameters. After that
/// each [`get_tts`](Self::get_tts) call turns one sentence into one WAV file.
///
/// Calls block and are not synchronised; give each thread its own plugin
/// and its own output paths.
pub struct BarkPlugin<B: BarkBackend> {
    lang: String,
    config: BarkConfig,
    params: BarkInferenceParams,
    engine: BarkEngine<B>,
}

impl<B: BarkBackend> BarkPlugin<B> {
    /// Validate `config`, set the device toggles and preload the models.
    ///
    /// Any failure while loading is returned as
    /// [`BarkError::ModelInitialization`]; there is no partially ready plugin.
    pub fn new(lang: impl Into<String>, config: BarkConfig, backend: B) -> Result<Self, BarkError> {
        config.validate()?;
        runtime::configure_process(config.device())?;

        let mut engine = BarkEngine::new(backend);
        engine.load(&config.model_params()).map_err(|e| match e {
            BarkError::ModelInitialization(_) => e,
            other => BarkError::ModelInitialization(other.to_string()),
        })?;

        let lang = lang.into();
        log::info!("Bark plugin ready for {lang} with voice {}", config.voice);
        Ok(Self {
            params: config.inference_params(),
            lang,
            config,
            engine,
        })
    }

    /// Build from the host's untyped configuration map.
    pub fn from_value(
        lang: impl Into<String>,
        config: serde_json::Value,
        backend: B,
    ) -> Result<Self, BarkError> {
        Self::new(lang, BarkConfig::from_value(config)?, backend)
    }

    /// Synthesize `sentence` into `wav_file`.
    ///
    /// `lang` overrides the plugin language for this call only; the voice and
    /// sampling parameters stay as configured. Returns `wav_file` and the
    /// phonemes, which Bark never produces, so the second value is always
    /// `None`.
    pub fn get_tts(
        &mut self,
        sentence: &str,
        wav_file: &Path,
        lang: Option<&str>,
    ) -> Result<(PathBuf, Option<String>), BarkError> {
        let lang = lang.unwrap_or(&self.lang);
        if !self.supports_language(lang) {
            log::warn!(
                "Language {lang} is not advertised by Bark; using voice {} anyway",
                self.params.voice
            );
        }

        let result = self.engine.generate(sentence, &self.params)?;
        result.write_wav(wav_file)?;
        log::debug!(
            "Wrote {:.2}s of {lang} audio to {}",
            result.duration_secs(),
            wav_file.display()
        );
        Ok((wav_file.to_path_buf(), None))
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn config(&self) -> &BarkConfig {
        &self.config
    }

    pub fn params(&self) -> &BarkInferenceParams {
        &self.params
    }

    pub fn sample_rate(&self) -> u32 {
        self.engine.sample_rate()
    }

    pub fn available_languages(&self) -> BTreeSet<&'static str> {
        presets::available_languages()
    }

    /// True if the primary subtag of `lang` is an advertised language.
    pub fn supports_language(&self, lang: &str) -> bool {
        presets::available_languages().contains(primary_language(lang).as_str())
    }

    /// Speaker presets for the plugin language.
    pub fn voice_presets(&self) -> Result<Vec<SpeakerPreset>, BarkError> {
        presets::speaker_presets_for(&primary_language(&self.lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::bark::engine::tests::ScriptedBark;
    use crate::engines::bark::presets::Gender;
    use crate::engines::bark::runtime::DeviceConfig;
    use serde_json::json;

    fn plugin() -> BarkPlugin<ScriptedBark> {
        BarkPlugin::from_value(
            "en-us",
            json!({"use_cuda": false, "voice": "v2/en_speaker_6"}),
            ScriptedBark::default(),
        )
        .unwrap()
    }

    #[test]
    fn writes_wav_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.wav");
        let mut plugin = plugin();

        let (path, phonemes) = plugin.get_tts("hello world", &out, None).unwrap();

        assert_eq!(path, out);
        assert!(phonemes.is_none());
        let reader = hound::WavReader::open(&out).unwrap();
        assert_eq!(reader.spec().sample_rate, plugin.sample_rate());
        assert_eq!(reader.spec().channels, 1);
        assert!(reader.len() > 0);
    }

    #[test]
    fn construction_preloads_with_configured_device() {
        let plugin = plugin();
        assert_eq!(
            plugin.engine.backend().preloaded_with,
            Some(DeviceConfig::default())
        );
        assert_eq!(plugin.lang(), "en-us");
        assert_eq!(plugin.params().voice, "v2/en_speaker_6");
    }

    #[test]
    fn toggles_are_exported_before_models_load() {
        let plugin = plugin();
        assert_eq!(
            plugin.engine.backend().env_at_preload,
            Some((Some(String::new()), Some("1".to_string())))
        );
    }

    #[test]
    fn preload_failure_aborts_construction() {
        let backend = ScriptedBark {
            fail_preload: true,
            ..Default::default()
        };
        let err = BarkPlugin::new("en-us", BarkConfig::default(), backend)
            .err()
            .unwrap();
        assert!(matches!(err, BarkError::ModelInitialization(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_loading() {
        let err = BarkPlugin::from_value(
            "en-us",
            json!({"min_eos_p": 3.0}),
            ScriptedBark::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, BarkError::Config(_)));
    }

    #[test]
    fn sequential_calls_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.wav");
        let second = dir.path().join("second.wav");
        let mut plugin = plugin();

        plugin.get_tts("hi", &first, None).unwrap();
        plugin.get_tts("good morning", &second, None).unwrap();

        let first_len = hound::WavReader::open(&first).unwrap().len();
        let second_len = hound::WavReader::open(&second).unwrap().len();
        assert_eq!(first_len, 2 * 240);
        assert_eq!(second_len, 12 * 240);

        let calls = &plugin.engine.backend().semantic_calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "hi");
        assert_eq!(calls[1].0, "good morning");
    }

    #[test]
    fn language_override_keeps_voice() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("de.wav");
        let mut plugin = plugin();
        plugin.get_tts("guten tag", &out, Some("de")).unwrap();
        assert_eq!(plugin.engine.backend().semantic_calls[0].1, "v2/en_speaker_6");
        assert_eq!(plugin.lang(), "en-us");
    }

    #[test]
    fn failed_call_leaves_plugin_usable() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("again.wav");
        let mut plugin = plugin();
        assert!(matches!(
            plugin.get_tts("", &out, None),
            Err(BarkError::EmptyText)
        ));
        assert!(plugin.get_tts("again", &out, None).is_ok());
    }

    #[test]
    fn language_support_uses_primary_subtag() {
        let plugin = plugin();
        assert!(plugin.supports_language("en-us"));
        assert!(plugin.supports_language("pt-BR"));
        assert!(!plugin.supports_language("ca"));
        assert_eq!(plugin.available_languages().len(), 13);
    }

    #[test]
    fn presets_follow_plugin_language() {
        let presets = plugin().voice_presets().unwrap();
        assert_eq!(presets.len(), 10);
        assert_eq!(presets[9].voice, "v2/en_speaker_9");
        assert_eq!(presets[9].gender, Gender::Female);
    }
}

//! Bark speaker presets for registry and configuration UIs.
//!
//! Bark ships ten history prompts per language, named
//! `v2/{lang}_speaker_{0..9}`. The gender of each prompt is not part of the
//! model; it comes from a hand-curated list of the female prompts, and every
//! other prompt is labelled male.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::model::BarkError;

/// Languages Bark has speaker prompts for.
pub const PRESET_LANGUAGES: [&str; 13] = [
    "en", "zh", "fr", "de", "hi", "it", "ja", "ko", "pl", "pt", "ru", "es", "tr",
];

/// Number of speaker prompts per language.
pub const SPEAKERS_PER_LANGUAGE: u8 = 10;

const FEMALE_SPEAKERS: &[&str] = &[
    "v2/en_speaker_9",
    "v2/pl_speaker_4",
    "v2/pl_speaker_6",
    "v2/pl_speaker_9",
    "v2/ru_speaker_5",
    "v2/ru_speaker_6",
    "v2/ru_speaker_9",
    "v2/es_speaker_8",
    "v2/es_speaker_9",
    "v2/tr_speaker_4",
    "v2/tr_speaker_5",
    "v2/it_speaker_2",
    "v2/it_speaker_7",
    "v2/it_speaker_9",
    "v2/de_speaker_3",
    "v2/de_speaker_8",
    "v2/ja_speaker_0",
    "v2/ja_speaker_1",
    "v2/ja_speaker_3",
    "v2/ja_speaker_4",
    "v2/ja_speaker_5",
    "v2/ja_speaker_7",
    "v2/ja_speaker_8",
    "v2/ja_speaker_9",
    "v2/fr_speaker_1",
    "v2/fr_speaker_3",
    "v2/fr_speaker_5",
    "v2/hi_speaker_1",
    "v2/hi_speaker_3",
    "v2/hi_speaker_4",
    "v2/hi_speaker_9",
    "v2/zh_speaker_4",
    "v2/zh_speaker_6",
    "v2/zh_speaker_7",
    "v2/zh_speaker_9",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// One selectable speaker prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SpeakerPreset {
    pub voice: String,
    pub gender: Gender,
    /// Bark runs locally once its models are cached.
    pub offline: bool,
}

/// Registry rows: each row maps a voice id to its preset.
pub type RegistryTable = BTreeMap<&'static str, Vec<BTreeMap<String, SpeakerPreset>>>;

/// `v2/{lang}_speaker_{index}`.
pub fn speaker_id(lang: &str, index: u8) -> String {
    format!("v2/{lang}_speaker_{index}")
}

/// Female if `voice` is on the curated list, male otherwise.
pub fn gender_of(voice: &str) -> Gender {
    if FEMALE_SPEAKERS.contains(&voice) {
        Gender::Female
    } else {
        Gender::Male
    }
}

/// The ten presets for `lang`, in ascending speaker index.
///
/// Only the bare codes in [`PRESET_LANGUAGES`] have presets; anything else,
/// including region-qualified tags like `"en-us"`, is rejected.
pub fn speaker_presets_for(lang: &str) -> Result<Vec<SpeakerPreset>, BarkError> {
    let lang = PRESET_LANGUAGES
        .iter()
        .find(|code| code.eq_ignore_ascii_case(lang))
        .ok_or_else(|| BarkError::UnsupportedPresetLanguage(lang.to_string()))?;

    Ok((0..SPEAKERS_PER_LANGUAGE)
        .map(|index| {
            let voice = speaker_id(lang, index);
            SpeakerPreset {
                gender: gender_of(&voice),
                voice,
                offline: true,
            }
        })
        .collect())
}

/// Coarse languages the plugin advertises to its host.
pub fn available_languages() -> BTreeSet<&'static str> {
    PRESET_LANGUAGES.into_iter().collect()
}

/// The full registry table: language -> `[{voice_id: preset}, ...]`.
pub fn plugin_config() -> RegistryTable {
    PRESET_LANGUAGES
        .iter()
        .map(|&lang| {
            let rows = speaker_presets_for(lang)
                .unwrap_or_default()
                .into_iter()
                .map(|preset| BTreeMap::from([(preset.voice.clone(), preset)]))
                .collect();
            (lang, rows)
        })
        .collect()
}

/// [`plugin_config`] as JSON, for hosts that consume the registry untyped.
pub fn registry_json() -> Result<serde_json::Value, BarkError> {
    Ok(serde_json::to_value(plugin_config())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ten_distinct_presets_per_language() {
        for lang in PRESET_LANGUAGES {
            let presets = speaker_presets_for(lang).unwrap();
            assert_eq!(presets.len(), 10, "{lang}");
            let ids: HashSet<_> = presets.iter().map(|p| p.voice.as_str()).collect();
            assert_eq!(ids.len(), 10, "{lang}");
            for (i, preset) in presets.iter().enumerate() {
                assert_eq!(preset.voice, format!("v2/{lang}_speaker_{i}"));
                assert!(preset.offline);
            }
        }
    }

    #[test]
    fn female_list_covers_only_preset_languages() {
        assert_eq!(FEMALE_SPEAKERS.len(), 35);
        let all: HashSet<String> = PRESET_LANGUAGES
            .iter()
            .flat_map(|lang| (0..SPEAKERS_PER_LANGUAGE).map(move |i| speaker_id(lang, i)))
            .collect();
        for voice in FEMALE_SPEAKERS {
            assert!(all.contains(*voice), "{voice} is not a well-formed preset");
        }
    }

    #[test]
    fn gender_is_total_and_deterministic() {
        assert_eq!(gender_of("v2/en_speaker_9"), Gender::Female);
        assert_eq!(gender_of("v2/en_speaker_6"), Gender::Male);
        assert_eq!(gender_of("v2/ko_speaker_0"), Gender::Male);
        assert_eq!(gender_of("v2/ja_speaker_0"), gender_of("v2/ja_speaker_0"));
        assert_eq!(gender_of("not-a-speaker"), Gender::Male);
    }

    #[test]
    fn korean_has_no_female_presets() {
        let presets = speaker_presets_for("ko").unwrap();
        assert!(presets.iter().all(|p| p.gender == Gender::Male));
    }

    #[test]
    fn japanese_female_count() {
        let female = speaker_presets_for("ja")
            .unwrap()
            .into_iter()
            .filter(|p| p.gender == Gender::Female)
            .count();
        assert_eq!(female, 8);
    }

    #[test]
    fn unknown_preset_language_fails_fast() {
        let err = speaker_presets_for("en-us").unwrap_err();
        assert!(matches!(err, BarkError::UnsupportedPresetLanguage(_)));
        assert!(speaker_presets_for("xx").is_err());
    }

    #[test]
    fn availability_matches_preset_languages() {
        let langs = available_languages();
        assert_eq!(langs.len(), 13);
        for lang in PRESET_LANGUAGES {
            assert!(langs.contains(lang));
        }
    }

    #[test]
    fn registry_json_shape() {
        let json = registry_json().unwrap();
        let en = json["en"].as_array().unwrap();
        assert_eq!(en.len(), 10);
        let row = &en[9]["v2/en_speaker_9"];
        assert_eq!(row["voice"], "v2/en_speaker_9");
        assert_eq!(row["gender"], "female");
        assert_eq!(row["offline"], true);
        assert_eq!(en[6]["v2/en_speaker_6"]["gender"], "male");
    }
}

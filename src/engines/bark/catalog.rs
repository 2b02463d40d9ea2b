//! Static voice tables.
//!
//! Two lookups are declared here: language tag to an ordered list of voice
//! ids (the first one is the default by convention), and voice id to the
//! release archive holding its assets. Nothing is created or mutated at
//! runtime.

use serde::Serialize;

use super::model::BarkError;

macro_rules! release_asset {
    ($file:literal) => {
        concat!(
            "https://github.com/rhasspy/bark/releases/download/v0.0.2/",
            $file
        )
    };
}

/// A declared voice and where its assets are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceEntry {
    pub voice_id: &'static str,
    pub download_url: &'static str,
}

static LANG_TO_VOICES: &[(&str, &[&str])] = &[
    ("ca", &["upc_ona-x-low", "upc_pau-x-low"]),
    ("da", &["nst_talesyntese-medium"]),
    (
        "de",
        &[
            "eva_k-x-low",
            "karlsson-low",
            "kerstin-low",
            "pavoque-low",
            "ramona-low",
            "thorsten-low",
        ],
    ),
    ("el-gr", &["rapunzelina-low"]),
    ("en-gb", &["alan-low", "southern_english_female-low"]),
    (
        "en-us",
        &[
            "amy-low",
            "danny-low",
            "kathleen-low",
            "lessac-low",
            "lessac-medium",
            "libritts-high",
            "ryan-high",
            "ryan-low",
            "ryan-medium",
            "lessac",
        ],
    ),
    (
        "es",
        &[
            "carlfm-x-low",
            "mls_10246-low",
            "mls_9972-low",
        ],
    ),
    ("fi", &["harri-low"]),
    (
        "fr",
        &[
            "gilles-low",
            "mls_1840-low",
            "siwis-low",
            "siwis-medium",
        ],
    ),
    ("it", &["riccardo_fasol-x-low"]),
    (
        "kk",
        &[
            "iseke-x-low",
            "issai-high",
            "raya-x-low",
        ],
    ),
    ("ne", &["google-medium", "google-x-low"]),
    (
        "nl",
        &[
            "mls_5809-low",
            "mls_7432-low",
            "nathalie-x-low",
            "rdh-medium",
            "rdh-x-low",
        ],
    ),
    ("no", &["talesyntese-medium"]),
    ("pl", &["mls_6892-low"]),
    ("pt-br", &["edresson-low"]),
    ("uk", &["lada-x-low"]),
    ("vi", &["25hours-single-low", "vos-x-low"]),
    ("zh-cn", &["huayan-x-low"]),
];

static VOICE_URLS: &[(&str, &str)] = &[
    ("25hours-single-low", release_asset!("voice-vi-25hours-single-low.tar.gz")),
    ("alan-low", release_asset!("voice-en-gb-alan-low.tar.gz")),
    ("amy-low", release_asset!("voice-en-us-amy-low.tar.gz")),
    ("carlfm-x-low", release_asset!("voice-es-carlfm-x-low.tar.gz")),
    ("danny-low", release_asset!("voice-en-us-danny-low.tar.gz")),
    ("edresson-low", release_asset!("voice-pt-br-edresson-low.tar.gz")),
    ("eva_k-x-low", release_asset!("voice-de-eva_k-x-low.tar.gz")),
    ("gilles-low", release_asset!("voice-fr-gilles-low.tar.gz")),
    ("google-medium", release_asset!("voice-ne-google-medium.tar.gz")),
    ("google-x-low", release_asset!("voice-ne-google-x-low.tar.gz")),
    ("harri-low", release_asset!("voice-fi-harri-low.tar.gz")),
    ("huayan-x-low", release_asset!("voice-zh-cn-huayan-x-low.tar.gz")),
    ("iseke-x-low", release_asset!("voice-kk-iseke-x-low.tar.gz")),
    ("issai-high", release_asset!("voice-kk-issai-high.tar.gz")),
    ("karlsson-low", release_asset!("voice-de-karlsson-low.tar.gz")),
    ("kathleen-low", release_asset!("voice-en-us-kathleen-low.tar.gz")),
    ("kerstin-low", release_asset!("voice-de-kerstin-low.tar.gz")),
    ("lada-x-low", release_asset!("voice-uk-lada-x-low.tar.gz")),
    ("lessac", release_asset!("voice-en-us_lessac.tar.gz")),
    ("lessac-low", release_asset!("voice-en-us-lessac-low.tar.gz")),
    ("lessac-medium", release_asset!("voice-en-us-lessac-medium.tar.gz")),
    ("libritts-high", release_asset!("voice-en-us-libritts-high.tar.gz")),
    ("mls_10246-low", release_asset!("voice-es-mls_10246-low.tar.gz")),
    ("mls_1840-low", release_asset!("voice-fr-mls_1840-low.tar.gz")),
    ("mls_5809-low", release_asset!("voice-nl-mls_5809-low.tar.gz")),
    ("mls_6892-low", release_asset!("voice-pl-mls_6892-low.tar.gz")),
    ("mls_7432-low", release_asset!("voice-nl-mls_7432-low.tar.gz")),
    ("mls_9972-low", release_asset!("voice-es-mls_9972-low.tar.gz")),
    ("nathalie-x-low", release_asset!("voice-nl-nathalie-x-low.tar.gz")),
    ("nst_talesyntese-medium", release_asset!("voice-da-nst_talesyntese-medium.tar.gz")),
    ("pavoque-low", release_asset!("voice-de-pavoque-low.tar.gz")),
    ("ramona-low", release_asset!("voice-de-ramona-low.tar.gz")),
    ("rapunzelina-low", release_asset!("voice-el-gr-rapunzelina-low.tar.gz")),
    ("raya-x-low", release_asset!("voice-kk-raya-x-low.tar.gz")),
    ("rdh-medium", release_asset!("voice-nl-rdh-medium.tar.gz")),
    ("rdh-x-low", release_asset!("voice-nl-rdh-x-low.tar.gz")),
    ("riccardo_fasol-x-low", release_asset!("voice-it-riccardo_fasol-x-low.tar.gz")),
    ("ryan-high", release_asset!("voice-en-us-ryan-high.tar.gz")),
    ("ryan-low", release_asset!("voice-en-us-ryan-low.tar.gz")),
    ("ryan-medium", release_asset!("voice-en-us-ryan-medium.tar.gz")),
    ("siwis-low", release_asset!("voice-fr-siwis-low.tar.gz")),
    ("siwis-medium", release_asset!("voice-fr-siwis-medium.tar.gz")),
    ("southern_english_female-low", release_asset!("voice-en-gb-southern_english_female-low.tar.gz")),
    ("talesyntese-medium", release_asset!("voice-no-talesyntese-medium.tar.gz")),
    ("thorsten-low", release_asset!("voice-de-thorsten-low.tar.gz")),
    ("upc_ona-x-low", release_asset!("voice-ca-upc_ona-x-low.tar.gz")),
    ("upc_pau-x-low", release_asset!("voice-ca-upc_pau-x-low.tar.gz")),
    ("vos-x-low", release_asset!("voice-vi-vivos-x-low.tar.gz")),
];

/// Languages with declared voices, in declaration order.
pub fn languages() -> impl Iterator<Item = &'static str> {
    LANG_TO_VOICES.iter().map(|(lang, _)| *lang)
}

/// The declared voices for `lang`, unchanged and in declaration order.
///
/// Tags are matched ASCII case-insensitively (`"EN-US"` finds `"en-us"`).
pub fn voices_for_language(lang: &str) -> Result<&'static [&'static str], BarkError> {
    LANG_TO_VOICES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(lang))
        .map(|(_, voices)| *voices)
        .ok_or_else(|| BarkError::LanguageNotFound(lang.to_string()))
}

/// The first declared voice for `lang`.
pub fn default_voice_for(lang: &str) -> Result<&'static str, BarkError> {
    voices_for_language(lang)?
        .first()
        .copied()
        .ok_or_else(|| BarkError::LanguageNotFound(lang.to_string()))
}

/// Look up a voice, ASCII case-insensitively. The entry carries the
/// declared spelling of the id.
pub fn voice_entry(voice_id: &str) -> Result<VoiceEntry, BarkError> {
    VOICE_URLS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(voice_id))
        .map(|&(voice_id, download_url)| VoiceEntry {
            voice_id,
            download_url,
        })
        .ok_or_else(|| BarkError::VoiceNotFound(voice_id.to_string()))
}

pub fn url_for_voice(voice_id: &str) -> Result<&'static str, BarkError> {
    voice_entry(voice_id).map(|entry| entry.download_url)
}

/// Reduce a catalog tag to its primary subtag (`"en-us"` -> `"en"`).
///
/// Catalog tags carry a region, while speaker presets and
/// [`available_languages`](super::presets::available_languages) use bare
/// language codes. This is the mapping between the two.
pub fn primary_language(tag: &str) -> String {
    tag.split(['-', '_'])
        .next()
        .unwrap_or(tag)
        .to_ascii_lowercase()
}

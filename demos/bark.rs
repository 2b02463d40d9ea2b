use std::path::PathBuf;
use std::time::Instant;

use bark_tts::engines::bark::{presets, BarkConfig, BarkPlugin, PythonBark};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let english = presets::speaker_presets_for("en")?;
    println!("English speakers:");
    for preset in &english {
        println!("  {} ({:?})", preset.voice, preset.gender);
    }

    let config = BarkConfig::from_value(serde_json::json!({
        "use_cuda": false,
        "small_models": true,
        "voice": "v2/en_speaker_6",
    }))?;

    let load_start = Instant::now();
    let mut plugin = BarkPlugin::new("en-us", config.clone(), PythonBark::from_config(&config))?;
    println!("Models loaded in {:.2?}", load_start.elapsed());

    let output = PathBuf::from("hello.wav");
    let synth_start = Instant::now();
    let (path, _phonemes) = plugin.get_tts("hey mycroft", &output, None)?;
    println!("Saved to {} in {:.2?}", path.display(), synth_start.elapsed());

    Ok(())
}

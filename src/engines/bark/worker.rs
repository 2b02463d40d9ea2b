//! [`BarkBackend`] backed by the Python `bark` package.
//!
//! A single `python3` process is started on preload. It imports `bark`,
//! loads every model once, and then serves one JSON request per line on
//! stdin with one JSON response per line on stdout. Keeping the process
//! alive avoids reloading several gigabytes of weights per utterance.
//!
//! If the worker dies (for instance when the OOM killer takes it) the failing
//! call returns [`BarkError::Generation`] and the next call starts a fresh
//! worker with the same device configuration.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};

use super::config::BarkConfig;
use super::model::{BarkBackend, BarkError, SAMPLE_RATE};
use super::runtime::DeviceConfig;

const WORKER_SCRIPT: &str = r#"
import json
import os
import sys

# Replies own the original stdout; fd 1 is pointed at stderr so that output
# from the model library, native code included, stays off the channel.
_replies = os.fdopen(os.dup(1), "w")
os.dup2(2, 1)
sys.stdout = sys.stderr

def reply(payload):
    _replies.write(json.dumps(payload) + "\n")
    _replies.flush()

try:
    import numpy as np
    from bark import SAMPLE_RATE
    from bark.api import semantic_to_waveform
    from bark.generation import generate_text_semantic, preload_models
    preload_models()
except Exception as e:
    reply({"ok": False, "error": "%s: %s" % (type(e).__name__, e)})
    sys.exit(1)

reply({"ok": True, "sample_rate": SAMPLE_RATE})

for line in sys.stdin:
    line = line.strip()
    if not line:
        continue
    try:
        req = json.loads(line)
        if req["op"] == "semantic":
            tokens = generate_text_semantic(
                req["text"],
                history_prompt=req["voice"],
                temp=req["temperature"],
                min_eos_p=req["min_eos_p"],
            )
            reply({"ok": True, "tokens": [int(t) for t in tokens]})
        elif req["op"] == "waveform":
            audio = semantic_to_waveform(
                np.array(req["tokens"], dtype=np.int64), history_prompt=req["voice"])
            reply({"ok": True, "samples": [float(s) for s in audio]})
        else:
            reply({"ok": False, "error": "unknown op %r" % req["op"]})
    except Exception as e:
        reply({"ok": False, "error": "%s: %s" % (type(e).__name__, e)})
"#;

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum WorkerRequest<'a> {
    Semantic {
        text: &'a str,
        voice: &'a str,
        temperature: f32,
        min_eos_p: f32,
    },
    Waveform {
        tokens: &'a [i64],
        voice: &'a str,
    },
}

#[derive(Debug, Deserialize)]
struct WorkerResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    sample_rate: Option<u32>,
    #[serde(default)]
    tokens: Option<Vec<i64>>,
    #[serde(default)]
    samples: Option<Vec<f32>>,
}

impl WorkerResponse {
    fn into_result(self) -> Result<Self, String> {
        if self.ok {
            Ok(self)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "worker reported failure".to_string()))
        }
    }
}

struct Worker {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Worker {
    fn send(&mut self, request: &WorkerRequest<'_>) -> Result<(), BarkError> {
        let mut line = serde_json::to_string(request)?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn receive(&mut self) -> Result<WorkerResponse, BarkError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            let status = self.child.wait()?;
            return Err(BarkError::Worker(format!(
                "bark worker exited unexpectedly ({status})"
            )));
        }
        Ok(serde_json::from_str(line.trim_end())?)
    }

    fn shutdown(mut self) {
        drop(self.stdin);
        if let Err(e) = self.child.kill() {
            log::debug!("Bark worker already stopped: {e}");
        }
        if let Err(e) = self.child.wait() {
            log::warn!("Failed to reap bark worker: {e}");
        }
    }
}

/// Bark through a persistent Python subprocess.
///
/// Needs `python3` with the `suno-bark` package installed. The interpreter
/// and weight cache directory can be overridden.
pub struct PythonBark {
    python: PathBuf,
    cache_dir: Option<PathBuf>,
    sample_rate: u32,
    /// Set once preloaded; used to restart a dead worker.
    device: Option<DeviceConfig>,
    worker: Option<Worker>,
}

impl Default for PythonBark {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonBark {
    /// Use `python3` from PATH.
    pub fn new() -> Self {
        Self {
            python: PathBuf::from("python3"),
            cache_dir: None,
            sample_rate: SAMPLE_RATE,
            device: None,
            worker: None,
        }
    }

    /// Take the interpreter and cache directory from the plugin config.
    pub fn from_config(config: &BarkConfig) -> Self {
        let mut bark = Self::new();
        if let Some(python) = &config.python {
            bark = bark.with_python(python);
        }
        if let Some(cache_dir) = &config.cache_dir {
            bark = bark.with_cache_dir(cache_dir);
        }
        bark
    }

    pub fn with_python(mut self, python: impl Into<PathBuf>) -> Self {
        self.python = python.into();
        self
    }

    /// Store downloaded weights under `cache_dir` instead of `~/.cache`.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    fn spawn(&self, device: &DeviceConfig) -> Result<Worker, BarkError> {
        let mut command = Command::new(&self.python);
        command
            .args(["-u", "-c", WORKER_SCRIPT])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        // Set on the child directly so the loader sees them regardless of
        // what this process's environment holds.
        for (key, value) in device.env_vars() {
            command.env(key, value);
        }
        if let Some(cache_dir) = &self.cache_dir {
            command.env("XDG_CACHE_HOME", cache_dir);
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BarkError::PythonNotFound(self.python.display().to_string())
            } else {
                BarkError::Io(e)
            }
        })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(BarkError::Worker(
                "bark worker pipes unavailable".to_string(),
            ));
        };

        Ok(Worker {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn request(&mut self, request: &WorkerRequest<'_>) -> Result<WorkerResponse, BarkError> {
        if self.worker.is_none() {
            let device = self.device.ok_or(BarkError::ModelNotLoaded)?;
            log::warn!("Bark worker is gone, starting a new one");
            self.start(&device)
                .map_err(|e| BarkError::Generation(format!("restarting bark worker: {e}")))?;
        }

        let worker = self.worker.as_mut().ok_or(BarkError::ModelNotLoaded)?;
        let exchanged = worker.send(request).and_then(|()| worker.receive());
        match exchanged {
            Ok(response) => response.into_result().map_err(BarkError::Generation),
            Err(e) => {
                // The channel is unusable after any transport failure.
                if let Some(dead) = self.worker.take() {
                    dead.shutdown();
                }
                Err(BarkError::Generation(format!("bark worker failed: {e}")))
            }
        }
    }

    fn start(&mut self, device: &DeviceConfig) -> Result<(), BarkError> {
        if let Some(old) = self.worker.take() {
            old.shutdown();
        }

        let mut worker = self.spawn(device)?;
        let ready = match worker.receive() {
            Ok(response) => response.into_result().map_err(BarkError::ModelInitialization),
            Err(e) => Err(BarkError::ModelInitialization(e.to_string())),
        };
        let ready = match ready {
            Ok(ready) => ready,
            Err(e) => {
                worker.shutdown();
                return Err(e);
            }
        };

        if let Some(rate) = ready.sample_rate {
            self.sample_rate = rate;
        }
        log::info!(
            "Bark worker ready (pid {}, {} Hz)",
            worker.child.id(),
            self.sample_rate
        );
        self.worker = Some(worker);
        Ok(())
    }
}

impl BarkBackend for PythonBark {
    fn preload_models(&mut self, device: &DeviceConfig) -> Result<(), BarkError> {
        self.start(device)?;
        self.device = Some(*device);
        Ok(())
    }

    fn generate_text_semantic(
        &mut self,
        text: &str,
        voice: &str,
        temperature: f32,
        min_eos_p: f32,
    ) -> Result<Vec<i64>, BarkError> {
        let response = self.request(&WorkerRequest::Semantic {
            text,
            voice,
            temperature,
            min_eos_p,
        })?;
        response
            .tokens
            .ok_or_else(|| BarkError::Worker("response without tokens".to_string()))
    }

    fn semantic_to_waveform(&mut self, tokens: &[i64], voice: &str) -> Result<Vec<f32>, BarkError> {
        let response = self.request(&WorkerRequest::Waveform { tokens, voice })?;
        response
            .samples
            .ok_or_else(|| BarkError::Worker("response without samples".to_string()))
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn release(&mut self) {
        self.device = None;
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}

impl Drop for PythonBark {
    fn drop(&mut self) {
        self.release();
    }
}

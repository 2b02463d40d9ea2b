//! Device and model-size toggles read by the `bark` model library.
//!
//! The library inspects two environment variables when it initialises, so
//! they must be set before its loader runs. Only one configuration can be in
//! force per process: [`configure_process`] latches the first one and rejects
//! a different one later.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::model::BarkError;

/// Hides every GPU from the model library when set to an empty string.
pub const CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";
/// Selects the reduced-size Bark checkpoints when set to `"1"`.
pub const SUNO_USE_SMALL_MODELS: &str = "SUNO_USE_SMALL_MODELS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub use_cuda: bool,
    pub small_models: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            use_cuda: false,
            small_models: true,
        }
    }
}

impl DeviceConfig {
    /// Environment variables to export for this configuration.
    ///
    /// A toggle left at the library's own default is not listed, so the
    /// inherited environment decides it.
    pub fn env_vars(&self) -> Vec<(&'static str, &'static str)> {
        let mut vars = Vec::with_capacity(2);
        if !self.use_cuda {
            vars.push((CUDA_VISIBLE_DEVICES, ""));
        }
        if self.small_models {
            vars.push((SUNO_USE_SMALL_MODELS, "1"));
        }
        vars
    }
}

/// Holds the first device configuration it is given.
#[derive(Debug, Default)]
pub struct ToggleLatch {
    active: OnceLock<DeviceConfig>,
}

impl ToggleLatch {
    pub const fn new() -> Self {
        Self {
            active: OnceLock::new(),
        }
    }

    /// Latch `device`.
    ///
    /// Returns `Ok(true)` on the first call, `Ok(false)` when the same
    /// configuration is already latched, and `ToggleConflict` otherwise.
    pub fn latch(&self, device: DeviceConfig) -> Result<bool, BarkError> {
        self.latch_with(device, |_| {})
    }

    /// Like [`latch`](Self::latch), running `apply` on the first call.
    ///
    /// `apply` finishes before any caller, concurrent ones included, sees the
    /// latched configuration.
    pub fn latch_with(
        &self,
        device: DeviceConfig,
        apply: impl FnOnce(&DeviceConfig),
    ) -> Result<bool, BarkError> {
        let mut first = false;
        let active = *self.active.get_or_init(|| {
            apply(&device);
            first = true;
            device
        });
        if active != device {
            return Err(BarkError::ToggleConflict {
                active,
                requested: device,
            });
        }
        Ok(first)
    }

    pub fn active(&self) -> Option<DeviceConfig> {
        self.active.get().copied()
    }
}

static PROCESS_TOGGLES: ToggleLatch = ToggleLatch::new();

/// Export the toggles for `device` into this process's environment.
///
/// Call before anything in the process loads the model library. Repeating
/// the same configuration is harmless; a conflicting one is an error and
/// leaves the environment untouched.
pub fn configure_process(device: DeviceConfig) -> Result<(), BarkError> {
    let exported = PROCESS_TOGGLES.latch_with(device, |device| {
        for (key, value) in device.env_vars() {
            std::env::set_var(key, value);
        }
    })?;
    if exported {
        log::info!(
            "Bark device toggles set: use_cuda={}, small_models={}",
            device.use_cuda,
            device.small_models
        );
    }
    Ok(())
}

/// The configuration latched by [`configure_process`], if any.
pub fn process_device() -> Option<DeviceConfig> {
    PROCESS_TOGGLES.active()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hides_gpu_and_uses_small_models() {
        assert_eq!(
            DeviceConfig::default().env_vars(),
            vec![(CUDA_VISIBLE_DEVICES, ""), (SUNO_USE_SMALL_MODELS, "1")]
        );
    }

    #[test]
    fn cuda_with_full_models_exports_nothing() {
        let device = DeviceConfig {
            use_cuda: true,
            small_models: false,
        };
        assert!(device.env_vars().is_empty());
    }

    #[test]
    fn latch_accepts_same_config_twice() {
        let latch = ToggleLatch::new();
        assert!(latch.latch(DeviceConfig::default()).unwrap());
        assert!(!latch.latch(DeviceConfig::default()).unwrap());
        assert_eq!(latch.active(), Some(DeviceConfig::default()));
    }

    #[test]
    fn latch_rejects_conflicting_config() {
        let latch = ToggleLatch::new();
        latch.latch(DeviceConfig::default()).unwrap();
        let err = latch
            .latch(DeviceConfig {
                use_cuda: true,
                small_models: true,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            BarkError::ToggleConflict { active, requested }
                if active == DeviceConfig::default() && requested.use_cuda
        ));
        assert_eq!(latch.active(), Some(DeviceConfig::default()));
    }

    #[test]
    fn concurrent_callers_wait_for_the_first_apply() {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let latch = Arc::new(ToggleLatch::new());
        let applied = Arc::new(AtomicBool::new(false));
        let runs = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (latch, applied, runs) = (latch.clone(), applied.clone(), runs.clone());
                thread::spawn(move || {
                    latch
                        .latch_with(DeviceConfig::default(), |_| {
                            runs.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(50));
                            applied.store(true, Ordering::SeqCst);
                        })
                        .unwrap();
                    assert!(applied.load(Ordering::SeqCst));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn process_configuration_exports_toggles() {
        configure_process(DeviceConfig::default()).unwrap();
        assert_eq!(std::env::var(CUDA_VISIBLE_DEVICES).unwrap(), "");
        assert_eq!(std::env::var(SUNO_USE_SMALL_MODELS).unwrap(), "1");
        assert_eq!(process_device(), Some(DeviceConfig::default()));
    }
}

//! Audio engine wrapping Kira's AudioManager
//!
//! Degrades gracefully when no audio device is available.

use kindle_core::{KindleError, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, DefaultBackend};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct EngineState {
    manager: Option<AudioManager<DefaultBackend>>,
    master_volume: f64,
}

/// Shared handle to the output device. Clones refer to the same engine.
#[derive(Clone)]
pub struct AudioEngine {
    state: Arc<Mutex<EngineState>>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    pub fn new() -> Self {
        // Try to create the audio manager; gracefully fail if no device
        let manager = AudioManager::<DefaultBackend>::new(kira::AudioManagerSettings::default())
            .map_err(|e| log::warn!("Audio: no device available ({e}), running silent"))
            .ok();
        if manager.is_some() {
            log::info!("Audio device opened");
        }
        Self::from_manager(manager)
    }

    /// An engine that never opens a device
    pub fn silent() -> Self {
        Self::from_manager(None)
    }

    fn from_manager(manager: Option<AudioManager<DefaultBackend>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                manager,
                master_volume: 1.0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether audio is actually available
    pub fn is_available(&self) -> bool {
        self.state().manager.is_some()
    }

    pub fn master_volume(&self) -> f64 {
        self.state().master_volume
    }

    /// Linear amplitude applied on top of every sound's own volume.
    /// Affects sounds started afterwards.
    pub fn set_master_volume(&self, amplitude: f64) {
        self.state().master_volume = amplitude.max(0.0);
    }

    /// Start playback. Returns `Ok(None)` when running silent.
    pub(crate) fn play(
        &self,
        data: StaticSoundData,
        amplitude: f64,
        name: &str,
    ) -> Result<Option<StaticSoundHandle>> {
        let mut state = self.state();
        let master = state.master_volume;
        let Some(manager) = &mut state.manager else {
            return Ok(None);
        };

        let handle = manager
            .play(data.volume(amplitude_to_db(amplitude * master)))
            .map_err(|e| KindleError::AudioError(format!("Failed to play '{name}': {e}")))?;
        Ok(Some(handle))
    }
}

/// Convert linear amplitude (0.0–2.0) to decibels
pub(crate) fn amplitude_to_db(amplitude: f64) -> kira::Decibels {
    if amplitude <= 0.0 {
        kira::Decibels(-60.0) // silence
    } else {
        kira::Decibels((20.0 * (amplitude as f32).log10()).max(-60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_engine() {
        let engine = AudioEngine::silent();
        assert!(!engine.is_available());
        assert_eq!(engine.master_volume(), 1.0);
    }

    #[test]
    fn test_new_never_panics() {
        // Works with or without a device
        let engine = AudioEngine::new();
        let _ = engine.is_available();
    }

    #[test]
    fn test_master_volume_clamped() {
        let engine = AudioEngine::silent();
        let clone = engine.clone();
        clone.set_master_volume(-3.0);
        assert_eq!(engine.master_volume(), 0.0);
        engine.set_master_volume(0.5);
        assert_eq!(clone.master_volume(), 0.5);
    }

    #[test]
    fn test_amplitude_to_db() {
        assert_eq!(amplitude_to_db(1.0).0, 0.0);
        assert_eq!(amplitude_to_db(0.0).0, -60.0);
        assert_eq!(amplitude_to_db(0.000001).0, -60.0);
        assert!((amplitude_to_db(2.0).0 - 6.0206).abs() < 0.01);
    }
}

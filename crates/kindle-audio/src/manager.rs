//! Fire-and-forget playback of buffered sounds

use crate::engine::AudioEngine;
use crate::sound::Sound;
use kindle_asset::{LoadReport, ResourceBuffer, SoundBuffer};

/// Owns the audio engine, the sound buffer, and every sound currently playing
pub struct SoundManager {
    engine: AudioEngine,
    buffer: SoundBuffer,
    active: Vec<Sound>,
}

impl SoundManager {
    pub fn new(engine: AudioEngine, buffer: SoundBuffer) -> Self {
        Self {
            engine,
            buffer,
            active: Vec::new(),
        }
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn buffer(&self) -> &SoundBuffer {
        &self.buffer
    }

    /// Preload every sound under the buffer root
    pub fn preload(&mut self) -> LoadReport {
        self.buffer.load_all()
    }

    /// Play a buffered sound. Errors are logged and the sound skipped.
    /// Returns whether playback started.
    pub fn play(&mut self, name: &str) -> bool {
        self.play_with_volume(name, 1.0)
    }

    pub fn play_with_volume(&mut self, name: &str, amplitude: f64) -> bool {
        let mut sound = match Sound::new(&self.engine, &self.buffer, name) {
            Ok(sound) => sound,
            Err(e) => {
                log::warn!("Cannot play sound: {e}");
                return false;
            }
        };
        sound.set_volume(amplitude);
        if let Err(e) = sound.play() {
            log::warn!("{e}");
            return false;
        }
        self.active.push(sound);
        true
    }

    /// Number of sounds started and not yet reaped
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Drop sounds that have finished playing. Call once per frame.
    pub fn cleanup_finished(&mut self) -> usize {
        let before = self.active.len();
        self.active.retain(|s| !s.is_done());
        before - self.active.len()
    }

    pub fn stop_all(&mut self) {
        if !self.active.is_empty() {
            log::debug!("Stopping {} sounds", self.active.len());
        }
        for sound in self.active.drain(..) {
            sound.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::tests::tiny_wav;

    fn manager() -> SoundManager {
        let mut buffer = SoundBuffer::default();
        buffer.insert("beep.wav", tiny_wav());
        SoundManager::new(AudioEngine::silent(), buffer)
    }

    #[test]
    fn test_play_unknown_is_skipped() {
        let mut sounds = manager();
        assert!(!sounds.play("missing.ogg"));
        assert_eq!(sounds.active_count(), 0);
    }

    #[test]
    fn test_silent_sounds_are_reaped() {
        let mut sounds = manager();
        assert!(sounds.play("beep.wav"));
        assert!(sounds.play_with_volume("beep.wav", 0.5));
        assert_eq!(sounds.active_count(), 2);

        assert_eq!(sounds.cleanup_finished(), 2);
        assert_eq!(sounds.active_count(), 0);
    }

    #[test]
    fn test_stop_all() {
        let mut sounds = manager();
        sounds.play("beep.wav");
        sounds.stop_all();
        assert_eq!(sounds.active_count(), 0);
        assert!(!sounds.engine().is_available());
        assert!(sounds.buffer().res_exists("beep.wav"));
    }
}

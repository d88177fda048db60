//! A single playable sound

use crate::engine::{amplitude_to_db, AudioEngine};
use kindle_asset::{ResourceBuffer, SoundBuffer};
use kindle_core::{KindleError, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::sound::PlaybackState;
use kira::Tween;
use std::io::Cursor;

/// A decoded sound that can be played through an [`AudioEngine`]
///
/// Dropping a `Sound` stops its playback.
pub struct Sound {
    name: String,
    engine: AudioEngine,
    data: StaticSoundData,
    volume: f64,
    handle: Option<StaticSoundHandle>,
}

impl Sound {
    /// Decode the bytes cached under `name` in `buffer`
    pub fn new(engine: &AudioEngine, buffer: &SoundBuffer, name: &str) -> Result<Self> {
        let bytes = buffer
            .get_res(name)
            .ok_or_else(|| KindleError::ResourceNotFound(format!("sound '{name}'")))?;
        let data = StaticSoundData::from_cursor(Cursor::new(bytes))
            .map_err(|e| KindleError::ResourceLoad(format!("Failed to decode '{name}': {e}")))?;

        Ok(Self {
            name: name.to_string(),
            engine: engine.clone(),
            data,
            volume: 1.0,
            handle: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Start playback from the beginning, restarting if already playing
    pub fn play(&mut self) -> Result<()> {
        self.halt();
        self.handle = self.engine.play(self.data.clone(), self.volume, &self.name)?;
        Ok(())
    }

    /// True once playback has finished, or if it never started
    pub fn is_done(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |h| h.state() == PlaybackState::Stopped)
    }

    /// Linear amplitude for this sound; applied immediately if playing
    pub fn set_volume(&mut self, amplitude: f64) {
        self.volume = amplitude.max(0.0);
        let master = self.engine.master_volume();
        if let Some(handle) = &mut self.handle {
            handle.set_volume(amplitude_to_db(self.volume * master), Tween::default());
        }
    }

    /// Stop playback and release the sound
    pub fn stop(mut self) {
        log::debug!("Stopping sound {}", self.name);
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween::default());
        }
    }
}

impl Drop for Sound {
    fn drop(&mut self) {
        self.halt();
    }
}

impl std::fmt::Debug for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .field("playing", &!self.is_done())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A short 16-bit mono PCM wav
    pub(crate) fn tiny_wav() -> Vec<u8> {
        let sample_rate: u32 = 8000;
        let samples: Vec<i16> = (0..800).map(|i| ((i % 40) * 400 - 8000) as i16).collect();
        let data_len = (samples.len() * 2) as u32;

        let mut wav = Vec::new();
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_len).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&1u16.to_le_bytes()); // mono
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        wav.extend_from_slice(&2u16.to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            wav.extend_from_slice(&s.to_le_bytes());
        }
        wav
    }

    fn buffer_with_beep() -> SoundBuffer {
        let mut buffer = SoundBuffer::default();
        buffer.insert("beep.wav", tiny_wav());
        buffer.insert("noise.wav", b"definitely not audio".to_vec());
        buffer
    }

    #[test]
    fn test_missing_sound() {
        let engine = AudioEngine::silent();
        let err = Sound::new(&engine, &buffer_with_beep(), "boom.wav").unwrap_err();
        assert!(matches!(err, KindleError::ResourceNotFound(_)));
    }

    #[test]
    fn test_undecodable_sound() {
        let engine = AudioEngine::silent();
        let err = Sound::new(&engine, &buffer_with_beep(), "noise.wav").unwrap_err();
        assert!(matches!(err, KindleError::ResourceLoad(_)));
    }

    #[test]
    fn test_silent_playback() {
        let engine = AudioEngine::silent();
        let mut sound = Sound::new(&engine, &buffer_with_beep(), "beep.wav").unwrap();
        assert_eq!(sound.name(), "beep.wav");
        assert!(sound.is_done());

        sound.play().unwrap();
        assert!(sound.is_done());

        sound.set_volume(0.25);
        assert_eq!(sound.volume(), 0.25);
        sound.stop();
    }

    #[test]
    fn test_play_with_default_engine() {
        let engine = AudioEngine::new();
        let mut sound = Sound::new(&engine, &buffer_with_beep(), "beep.wav").unwrap();
        sound.play().unwrap();
        if !engine.is_available() {
            assert!(sound.is_done());
        }
        // dropping stops any playback
        drop(sound);
    }
}

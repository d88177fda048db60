//! Kindle Audio - sound playback
//!
//! Sounds are decoded from the encoded bytes held in a
//! [`SoundBuffer`](kindle_asset::SoundBuffer) and played through Kira.
//! Without an audio device the engine runs silent and playback is a no-op.

mod engine;
mod manager;
mod sound;

pub use engine::AudioEngine;
pub use manager::SoundManager;
pub use sound::Sound;

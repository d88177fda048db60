//! Kindle Asset - resource buffers
//!
//! Resources live under [`RES_DIR`] and are preloaded into typed in-memory
//! buffers. Game code looks them up by their path relative to the buffer root.

mod buffer;
mod images;
mod sounds;

pub use buffer::{extension_supported, index_directory, LoadReport, ResourceBuffer, RES_DIR};
pub use images::ImageBuffer;
pub use sounds::SoundBuffer;

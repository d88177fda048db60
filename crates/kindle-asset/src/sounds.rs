//! Encoded sound cache

use crate::buffer::{extension_supported, resolve_resource, ResourceBuffer, RES_DIR};
use kindle_core::{KindleError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3", "flac"];

/// Encoded audio files kept in memory. Decoding happens when a sound is
/// created from the bytes.
pub struct SoundBuffer {
    root: PathBuf,
    sounds: HashMap<String, Arc<[u8]>>,
}

impl Default for SoundBuffer {
    fn default() -> Self {
        Self::new(Path::new(RES_DIR).join("sounds"))
    }
}

impl SoundBuffer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sounds: HashMap::new(),
        }
    }

    /// Cache bytes that did not come from disk
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.sounds.insert(name.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

impl ResourceBuffer for SoundBuffer {
    type Resource = Arc<[u8]>;

    fn kind(&self) -> &str {
        "sounds"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn supported_extensions(&self) -> &[&'static str] {
        SOUND_EXTENSIONS
    }

    fn load(&mut self, name: &str) -> Result<()> {
        if !extension_supported(SOUND_EXTENSIONS, name) {
            return Err(KindleError::UnsupportedFormat(name.to_string()));
        }
        let path = resolve_resource(&self.root, name)?;
        let bytes = fs::read(&path)?;
        if bytes.is_empty() {
            return Err(KindleError::ResourceLoad(format!("{name}: empty file")));
        }

        log::debug!("Cached sound {name} ({} bytes)", bytes.len());
        self.sounds.insert(name.to_string(), bytes.into());
        Ok(())
    }

    fn res_exists(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    fn get_res(&self, name: &str) -> Option<Arc<[u8]>> {
        self.sounds.get(name).cloned()
    }
}

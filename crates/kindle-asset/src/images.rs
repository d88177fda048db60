//! Decoded image cache

use crate::buffer::{extension_supported, resolve_resource, ResourceBuffer, RES_DIR};
use kindle_core::{Color, KindleError, Result, Size};
use kindle_render::Sprite;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Images decoded to RGBA sprites, keyed by name relative to the root
pub struct ImageBuffer {
    root: PathBuf,
    sprites: HashMap<String, Sprite>,
}

impl Default for ImageBuffer {
    fn default() -> Self {
        Self::new(Path::new(RES_DIR).join("images"))
    }
}

impl ImageBuffer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sprites: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Names of all cached images, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sprites.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ResourceBuffer for ImageBuffer {
    type Resource = Sprite;

    fn kind(&self) -> &str {
        "images"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn supported_extensions(&self) -> &[&'static str] {
        IMAGE_EXTENSIONS
    }

    fn load(&mut self, name: &str) -> Result<()> {
        if !extension_supported(IMAGE_EXTENSIONS, name) {
            return Err(KindleError::UnsupportedFormat(name.to_string()));
        }
        let path = resolve_resource(&self.root, name)?;

        let img = image::open(&path)
            .map_err(|e| KindleError::ResourceLoad(format!("{name}: {e}")))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let pixels: Vec<Color> = bytemuck::cast_slice(img.as_raw()).to_vec();

        log::debug!("Decoded image {name} ({width}x{height})");
        self.sprites
            .insert(name.to_string(), Sprite::new(Size::new(width, height), pixels));
        Ok(())
    }

    fn res_exists(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    fn get_res(&self, name: &str) -> Option<Sprite> {
        self.sprites.get(name).cloned()
    }
}

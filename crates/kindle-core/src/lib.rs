//! Kindle Core - Foundational types for the Kindle engine
//!
//! This crate provides the core types that all other Kindle crates depend on:
//! - `Color` - 8-bit RGBA color with alpha blending
//! - `Size`, `Rect` - Pixel-space geometry
//! - Error types and Result alias

mod error;
mod types;

pub use error::{KindleError, Result};
pub use types::{Color, Rect, Size};

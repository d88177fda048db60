//! Kindle Player - windowed host for the engine
//!
//! This crate provides the `PlayerApp` application handler, its
//! configuration, and a small demo scene.

mod config;
mod demo;
mod player_app;

pub use config::{AppConfig, AudioConfig, CliOverrides, RenderConfig, ResourceConfig, WindowConfig};
pub use demo::{BouncingBox, DemoScene};
pub use player_app::PlayerApp;

//! Player application implementing winit ApplicationHandler
//!
//! Owns the clock, input, compositor, resources and sound, and runs one
//! render pass per redraw.

use crate::config::AppConfig;
use crate::demo::DemoScene;
use anyhow::{Context, Result};
use kindle_asset::{ImageBuffer, ResourceBuffer, SoundBuffer};
use kindle_audio::{AudioEngine, SoundManager};
use kindle_core::Size;
use kindle_render::{LayerCompositor, Presenter};
use kindle_runtime::{FrameTimer, InputManager, ProgramClock};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Played when the demo button is clicked
const CLICK_SOUND: &str = "click.wav";

pub struct PlayerApp {
    config: AppConfig,

    // Systems
    pub clock: ProgramClock,
    pub input: InputManager,
    timer: FrameTimer,

    // Rendering
    compositor: LayerCompositor,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,

    // Resources
    images: ImageBuffer,
    sounds: SoundManager,
    demo: Option<DemoScene>,
    shown_paused: bool,
}

impl PlayerApp {
    pub fn new(config: AppConfig) -> Self {
        let clock = ProgramClock::new();
        let input = InputManager::new(clock.clone());
        let compositor = LayerCompositor::with_background(
            config.window_size(),
            config.render.layers,
            config.render.background,
        );

        let engine = if config.audio.enabled {
            AudioEngine::new()
        } else {
            log::info!("Audio disabled by config");
            AudioEngine::silent()
        };
        engine.set_master_volume(config.audio.master_volume);

        let images = ImageBuffer::new(config.resources.images_dir());
        let sounds = SoundManager::new(engine, SoundBuffer::new(config.resources.sounds_dir()));

        Self {
            config,
            clock,
            input,
            timer: FrameTimer::new(),
            compositor,
            window: None,
            presenter: None,
            images,
            sounds,
            demo: None,
            shown_paused: false,
        }
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.config.window.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let presenter = pollster::block_on(Presenter::new(window.clone()))
            .context("Failed to initialize presenter")?;
        self.presenter = Some(presenter);

        let size = window.inner_size();
        self.resize(size);

        self.images.load_all();
        self.sounds.preload();

        let demo = DemoScene::install(&self.compositor, &mut self.input, &self.clock, &self.images)
            .context("Failed to set up demo scene")?;
        self.demo = Some(demo);

        self.clock.setup();
        log::info!(
            "Player running: {} layers, {}",
            self.compositor.layer_count(),
            self.compositor.size()
        );
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let size = Size::new(size.width, size.height);
        if size.is_empty() {
            return;
        }
        self.compositor.resize(size);
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(size);
        }
    }

    fn tick(&mut self) {
        self.timer.tick(self.clock.time());

        while self.timer.should_fixed_update() {
            if let Some(demo) = &mut self.demo {
                demo.fixed_update();
            }
            self.timer.consume_fixed_step();
        }

        let clicks = self.demo.as_mut().map_or(0, DemoScene::take_clicks);
        for _ in 0..clicks {
            self.sounds.play(CLICK_SOUND);
        }
        self.sounds.cleanup_finished();

        self.update_title();
    }

    fn update_title(&mut self) {
        let paused = self.input.is_paused();
        if paused == self.shown_paused {
            return;
        }
        self.shown_paused = paused;
        if let Some(window) = &self.window {
            let title = &self.config.window.title;
            if paused {
                window.set_title(&format!("{title} (paused)"));
            } else {
                window.set_title(title);
            }
        }
    }

    fn render(&mut self) {
        self.compositor.render_pass();

        let Some(presenter) = &mut self.presenter else {
            return;
        };
        if let Err(e) = self.compositor.with_canvas(|canvas| presenter.present(canvas)) {
            log::error!("Present failed: {e}");
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            log::error!("{e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                self.sounds.stop_all();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.resize(*new_size);
            }

            WindowEvent::KeyboardInput { event: key, .. }
                if key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                if key.state == ElementState::Pressed && !key.repeat {
                    self.input.toggle_pause();
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
            }

            _ => {
                self.input.handle_window_event(&event);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.audio.enabled = false;
        config.render.layers = 4;
        config.window.width = 64;
        config.window.height = 32;
        config
    }

    #[test]
    fn test_new_app_uses_config() {
        let app = PlayerApp::new(headless_config());
        assert_eq!(app.compositor().layer_count(), 4);
        assert_eq!(app.compositor().size(), Size::new(64, 32));
        assert!(!app.clock.is_setup());
        assert!(!app.sounds.engine().is_available());
    }

    #[test]
    fn test_resize_ignores_minimized() {
        let mut app = PlayerApp::new(headless_config());
        app.resize(PhysicalSize::new(0, 0));
        assert_eq!(app.compositor().size(), Size::new(64, 32));
        app.resize(PhysicalSize::new(100, 50));
        assert_eq!(app.compositor().size(), Size::new(100, 50));
    }

    #[test]
    fn test_tick_and_render_without_window() {
        let mut app = PlayerApp::new(headless_config());
        app.clock.setup();
        app.tick();
        app.render();
        app.compositor()
            .with_canvas(|c| assert!(c.pixels().iter().all(|p| *p == app.config.render.background)));
    }
}

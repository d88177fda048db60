//! Demo scene shown by the player

use kindle_asset::{ImageBuffer, ResourceBuffer};
use kindle_core::{Color, Rect, Result, Size};
use kindle_gui::{attach, Bounds, Button, Panel};
use kindle_render::{LayerCompositor, RectRenderer, RenderEvent, Renderer, SpriteRenderer};
use kindle_runtime::{InputManager, ProgramClock};
use std::sync::Arc;
use std::time::Duration;

/// A square that bounces around the canvas. Its position is a pure function
/// of game time, so it freezes while the clock is paused.
pub struct BouncingBox {
    clock: ProgramClock,
    side: u32,
    /// Pixels per second along each axis
    velocity: (f64, f64),
    color: Color,
}

impl BouncingBox {
    pub fn new(clock: ProgramClock, side: u32, velocity: (f64, f64), color: Color) -> Self {
        Self {
            clock,
            side,
            velocity,
            color,
        }
    }

    /// Top-left corner at game time `t` inside an `area`-sized canvas
    pub fn position_at(&self, t: Duration, area: Size) -> (i32, i32) {
        let secs = t.as_secs_f64();
        let x = bounce(secs * self.velocity.0, area.width.saturating_sub(self.side));
        let y = bounce(secs * self.velocity.1, area.height.saturating_sub(self.side));
        (x, y)
    }
}

/// Fold a travelled distance back and forth across `0..=span`
fn bounce(distance: f64, span: u32) -> i32 {
    if span == 0 {
        return 0;
    }
    let span = span as f64;
    let d = distance.abs() % (2.0 * span);
    let folded = if d <= span { d } else { 2.0 * span - d };
    folded.round() as i32
}

impl Renderer for BouncingBox {
    fn render(&self, event: &mut RenderEvent<'_>) {
        let canvas = event.context();
        let (x, y) = self.position_at(self.clock.time(), canvas.size());
        canvas.fill_rect(Rect::new(x, y, self.side, self.side), self.color);
    }
}

/// Steps between color swaps of the blinking bar (one second at 60 Hz)
const BLINK_STEPS: u64 = 60;

/// Handles to the demo objects the player keeps updating
pub struct DemoScene {
    bar: Arc<RectRenderer>,
    button: Arc<Button>,
    seen_clicks: u64,
    steps: u64,
}

impl DemoScene {
    /// Create the demo renderers and widgets and register them
    ///
    /// Static shapes go on the bottom layer, the bouncing box and any loaded
    /// sprite in the middle, and the HUD on the top layer.
    pub fn install(
        compositor: &LayerCompositor,
        input: &mut InputManager,
        clock: &ProgramClock,
        images: &ImageBuffer,
    ) -> Result<Self> {
        let mut layers = compositor.layer_set();
        let top = layers.len().saturating_sub(1);
        let middle = top.min(1);

        layers.add(
            0,
            Arc::new(RectRenderer::new(Rect::new(0, 0, 160, 120), Color::BLUE)),
        )?;
        let bar = Arc::new(RectRenderer::new(Rect::new(180, 0, 20, 270), Color::DARK_GRAY));
        layers.add(0, bar.clone())?;

        layers.add(
            middle,
            Arc::new(BouncingBox::new(clock.clone(), 24, (140.0, 95.0), Color::ORANGE)),
        )?;

        if let Some(name) = images.names().first() {
            if let Some(sprite) = images.get_res(name) {
                log::info!("Showing sprite {name}");
                layers.add(middle, Arc::new(SpriteRenderer::new(sprite, 20, 140)))?;
            }
        }

        let panel = Arc::new(
            Panel::new(Bounds::new(8, 8, 136, 40), Color::rgba(0, 0, 0, 160))
                .with_border(Color::LIGHT_GRAY, 1),
        );
        attach(&panel, &mut layers, top, input)?;

        let button = Arc::new(Button::new(Bounds::new(16, 16, 120, 24)));
        attach(&button, &mut layers, top, input)?;

        Ok(Self {
            bar,
            button,
            seen_clicks: 0,
            steps: 0,
        })
    }

    /// Advance one fixed simulation step
    pub fn fixed_update(&mut self) {
        self.steps += 1;
        if self.steps % BLINK_STEPS == 0 {
            let lit = (self.steps / BLINK_STEPS) % 2 == 1;
            self.bar
                .set_color(if lit { Color::GRAY } else { Color::DARK_GRAY });
        }
    }

    /// Button clicks since the last call
    pub fn take_clicks(&mut self) -> u64 {
        let total = self.button.click_count();
        let new = total - self.seen_clicks;
        self.seen_clicks = total;
        new
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindle_runtime::{InputEvent, ManualTimeSource, MouseButton};

    fn manual_clock() -> (ProgramClock, Arc<ManualTimeSource>) {
        let source = Arc::new(ManualTimeSource::new());
        let clock = ProgramClock::with_source(source.clone());
        clock.setup();
        (clock, source)
    }

    #[test]
    fn test_bounce_folds() {
        assert_eq!(bounce(0.0, 10), 0);
        assert_eq!(bounce(7.0, 10), 7);
        assert_eq!(bounce(13.0, 10), 7);
        assert_eq!(bounce(20.0, 10), 0);
        assert_eq!(bounce(25.0, 10), 5);
        assert_eq!(bounce(99.0, 0), 0);
    }

    #[test]
    fn test_box_follows_game_time() {
        let (clock, source) = manual_clock();
        let bbox = BouncingBox::new(clock.clone(), 10, (100.0, 50.0), Color::RED);
        let area = Size::new(110, 60);

        assert_eq!(bbox.position_at(clock.time(), area), (0, 0));

        source.advance(Duration::from_millis(500));
        assert_eq!(bbox.position_at(clock.time(), area), (50, 25));

        // paused time does not move the box
        clock.pause();
        source.advance(Duration::from_secs(3));
        assert_eq!(bbox.position_at(clock.time(), area), (50, 25));

        clock.resume();
        source.advance(Duration::from_millis(1000));
        // 150 px along a 100 px span folds back to 50
        assert_eq!(bbox.position_at(clock.time(), area), (50, 25));
    }

    #[test]
    fn test_box_renders_at_position() {
        let (clock, source) = manual_clock();
        source.advance(Duration::from_millis(100));
        let compositor = LayerCompositor::new(Size::new(64, 64), 1);
        compositor
            .layer_set()
            .add(
                0,
                Arc::new(BouncingBox::new(clock, 4, (100.0, 0.0), Color::GREEN)),
            )
            .unwrap();

        compositor.render_pass();
        compositor.with_canvas(|c| {
            assert_eq!(c.pixel(10, 0), Some(Color::GREEN));
            assert_eq!(c.pixel(9, 0), Some(Color::BLACK));
        });
    }

    #[test]
    fn test_install_registers_everything() {
        let (clock, _) = manual_clock();
        let compositor = LayerCompositor::new(Size::new(320, 240), 3);
        let mut input = InputManager::new(clock.clone());
        let images = ImageBuffer::new(std::env::temp_dir().join("kindle_no_images"));

        DemoScene::install(&compositor, &mut input, &clock, &images).unwrap();

        let layers = compositor.layer_set();
        assert_eq!(layers.layer(0).map(|l| l.len()), Some(2));
        assert_eq!(layers.layer(1).map(|l| l.len()), Some(1));
        assert_eq!(layers.layer(2).map(|l| l.len()), Some(2));
        drop(layers);
        assert_eq!(input.device_count(), 2);

        compositor.render_pass();
        compositor.with_canvas(|c| assert_eq!(c.pixel(185, 200), Some(Color::DARK_GRAY)));
    }

    #[test]
    fn test_install_on_single_layer() {
        let (clock, _) = manual_clock();
        let compositor = LayerCompositor::new(Size::new(100, 100), 1);
        let mut input = InputManager::new(clock.clone());
        let images = ImageBuffer::new(std::env::temp_dir().join("kindle_no_images"));

        DemoScene::install(&compositor, &mut input, &clock, &images).unwrap();
        assert_eq!(compositor.layer_set().layer(0).map(|l| l.len()), Some(5));
    }

    #[test]
    fn test_clicks_and_blink() {
        let (clock, _) = manual_clock();
        let compositor = LayerCompositor::new(Size::new(320, 240), 3);
        let mut input = InputManager::new(clock.clone());
        let images = ImageBuffer::new(std::env::temp_dir().join("kindle_no_images"));
        let mut scene = DemoScene::install(&compositor, &mut input, &clock, &images).unwrap();

        let at = |pressed: bool| {
            if pressed {
                InputEvent::MousePressed {
                    button: MouseButton::Left,
                    x: 20.0,
                    y: 20.0,
                }
            } else {
                InputEvent::MouseReleased {
                    button: MouseButton::Left,
                    x: 20.0,
                    y: 20.0,
                }
            }
        };
        input.dispatch(&at(true));
        input.dispatch(&at(false));
        assert_eq!(scene.take_clicks(), 1);
        assert_eq!(scene.take_clicks(), 0);

        for _ in 0..BLINK_STEPS {
            scene.fixed_update();
        }
        assert_eq!(scene.steps(), BLINK_STEPS);
        compositor.render_pass();
        compositor.with_canvas(|c| assert_eq!(c.pixel(185, 200), Some(Color::GRAY)));
    }
}

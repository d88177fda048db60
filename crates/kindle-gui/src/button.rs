//! Clickable button widget

use crate::bounds::Bounds;
use crate::object::GuiObject;
use kindle_core::Color;
use kindle_render::{RenderEvent, Renderer};
use kindle_runtime::{InputDevice, InputEvent, MouseButton};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fill colors for each interaction state, plus the outline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub normal: Color,
    pub hover: Color,
    pub pressed: Color,
    pub border: Color,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            normal: Color::GRAY,
            hover: Color::LIGHT_GRAY,
            pressed: Color::DARK_GRAY,
            border: Color::WHITE,
        }
    }
}

#[derive(Default)]
struct ButtonState {
    bounds: Bounds,
    style: ButtonStyle,
    hovered: bool,
    pressed: bool,
}

type ClickCallback = Box<dyn Fn() + Send + Sync>;

/// A button that counts clicks and optionally runs a callback
///
/// A click is a left press inside the button followed by a left release
/// inside it. Releasing outside cancels.
pub struct Button {
    state: Mutex<ButtonState>,
    clicks: AtomicU64,
    on_click: Option<ClickCallback>,
}

impl Button {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            state: Mutex::new(ButtonState {
                bounds,
                ..Default::default()
            }),
            clicks: AtomicU64::new(0),
            on_click: None,
        }
    }

    pub fn with_style(self, style: ButtonStyle) -> Self {
        self.state().style = style;
        self
    }

    pub fn on_click(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Box::new(callback));
        self
    }

    fn state(&self) -> MutexGuard<'_, ButtonState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn click_count(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }

    pub fn is_hovered(&self) -> bool {
        self.state().hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.state().pressed
    }

    fn current_fill(state: &ButtonState) -> Color {
        if state.pressed {
            state.style.pressed
        } else if state.hovered {
            state.style.hover
        } else {
            state.style.normal
        }
    }

    fn clicked(&self) {
        let n = self.clicks.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("Button clicked ({n})");
        if let Some(callback) = &self.on_click {
            callback();
        }
    }
}

impl Renderer for Button {
    fn render(&self, event: &mut RenderEvent<'_>) {
        let (rect, fill, border) = {
            let state = self.state();
            (state.bounds.to_rect(), Self::current_fill(&state), state.style.border)
        };
        let canvas = event.context();
        canvas.fill_rect(rect, fill);
        canvas.stroke_rect(rect, 1, border);
    }
}

impl InputDevice for Button {
    fn handle_input(&self, event: &InputEvent) -> bool {
        let clicked = {
            let mut state = self.state();
            match *event {
                InputEvent::MouseMoved { x, y } => {
                    state.hovered = state.bounds.contains(x, y);
                    return false;
                }
                InputEvent::MousePressed {
                    button: MouseButton::Left,
                    x,
                    y,
                } => {
                    if !state.bounds.contains(x, y) {
                        return false;
                    }
                    state.pressed = true;
                    state.hovered = true;
                    return true;
                }
                InputEvent::MouseReleased {
                    button: MouseButton::Left,
                    x,
                    y,
                } => {
                    if !state.pressed {
                        return false;
                    }
                    state.pressed = false;
                    state.bounds.contains(x, y)
                }
                _ => return false,
            }
        };

        // callback runs without the state lock held
        if clicked {
            self.clicked();
        }
        true
    }
}

impl GuiObject for Button {
    fn bounds(&self) -> Bounds {
        self.state().bounds
    }

    fn set_bounds(&self, bounds: Bounds) {
        self.state().bounds = bounds;
    }

    fn clear(&self) {
        let mut state = self.state();
        state.hovered = false;
        state.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindle_core::Size;
    use kindle_render::Canvas;
    use kindle_runtime::{InputManager, ProgramClock};
    use std::sync::Arc;

    fn press(x: f64, y: f64) -> InputEvent {
        InputEvent::MousePressed {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    fn release(x: f64, y: f64) -> InputEvent {
        InputEvent::MouseReleased {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    #[test]
    fn test_click_inside() {
        let button = Button::new(Bounds::new(10, 10, 20, 10));
        assert!(button.handle_input(&press(15.0, 15.0)));
        assert!(button.is_pressed());
        assert!(button.handle_input(&release(16.0, 12.0)));
        assert!(!button.is_pressed());
        assert_eq!(button.click_count(), 1);
    }

    #[test]
    fn test_release_outside_cancels() {
        let button = Button::new(Bounds::new(0, 0, 10, 10));
        button.handle_input(&press(5.0, 5.0));
        assert!(button.handle_input(&release(50.0, 50.0)));
        assert_eq!(button.click_count(), 0);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_press_outside_ignored() {
        let button = Button::new(Bounds::new(0, 0, 10, 10));
        assert!(!button.handle_input(&press(20.0, 5.0)));
        assert!(!button.handle_input(&release(5.0, 5.0)));
        assert!(!button.handle_input(&InputEvent::MousePressed {
            button: MouseButton::Right,
            x: 5.0,
            y: 5.0,
        }));
        assert_eq!(button.click_count(), 0);
    }

    #[test]
    fn test_hover_changes_fill() {
        let style = ButtonStyle::default();
        let button = Button::new(Bounds::new(0, 0, 6, 6)).with_style(style);
        let mut canvas = Canvas::new(Size::new(8, 8));

        button.render(&mut RenderEvent::new(&mut canvas, 0));
        assert_eq!(canvas.pixel(3, 3), Some(style.normal));

        button.handle_input(&InputEvent::MouseMoved { x: 2.0, y: 2.0 });
        assert!(button.is_hovered());
        button.render(&mut RenderEvent::new(&mut canvas, 0));
        assert_eq!(canvas.pixel(3, 3), Some(style.hover));
        assert_eq!(canvas.pixel(0, 0), Some(style.border));

        button.handle_input(&press(2.0, 2.0));
        button.render(&mut RenderEvent::new(&mut canvas, 0));
        assert_eq!(canvas.pixel(3, 3), Some(style.pressed));

        button.clear();
        assert!(!button.is_hovered() && !button.is_pressed());
    }

    #[test]
    fn test_callback_through_input_manager() {
        let fired = Arc::new(AtomicU64::new(0));
        let counter = fired.clone();
        let button = Arc::new(Button::new(Bounds::new(0, 0, 10, 10)).on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let mut input = InputManager::new(ProgramClock::new());
        input.register(button.clone());

        assert!(input.dispatch(&press(1.0, 1.0)));
        assert!(input.dispatch(&release(1.0, 1.0)));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // paused games do not deliver clicks
        input.pause();
        assert!(!input.dispatch(&press(1.0, 1.0)));
        assert!(!input.dispatch(&release(1.0, 1.0)));
        assert_eq!(button.click_count(), 1);
    }
}

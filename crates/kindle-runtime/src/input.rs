//! Input devices and event dispatch

use crate::clock::ProgramClock;
use std::sync::Arc;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A host input event, already translated into window-pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(KeyCode),
    KeyReleased(KeyCode),
    MouseMoved { x: f64, y: f64 },
    MousePressed { button: MouseButton, x: f64, y: f64 },
    MouseReleased { button: MouseButton, x: f64, y: f64 },
    FocusChanged(bool),
}

/// Anything that reacts to user input (GUI widgets, player controllers)
pub trait InputDevice: Send + Sync {
    /// Handle one event. Returns true if the event was consumed, which stops
    /// it from reaching devices registered after this one.
    fn handle_input(&self, event: &InputEvent) -> bool;
}

/// Routes input events to registered devices and owns the game's pause state
///
/// Pausing suspends dispatch and freezes the shared `ProgramClock`. Losing
/// window focus pauses automatically; regaining it resumes only if the pause
/// came from the focus loss.
pub struct InputManager {
    devices: Vec<Arc<dyn InputDevice>>,
    clock: ProgramClock,
    cursor: (f64, f64),
    paused: bool,
    paused_by_focus: bool,
}

impl InputManager {
    pub fn new(clock: ProgramClock) -> Self {
        Self {
            devices: Vec::new(),
            clock,
            cursor: (0.0, 0.0),
            paused: false,
            paused_by_focus: false,
        }
    }

    /// Register a device at the back of the dispatch order
    pub fn register(&mut self, device: Arc<dyn InputDevice>) {
        self.devices.push(device);
    }

    /// Remove a previously registered device. Returns false if it was not registered.
    pub fn unregister(&mut self, device: &Arc<dyn InputDevice>) -> bool {
        let before = self.devices.len();
        self.devices.retain(|d| !Arc::ptr_eq(d, device));
        self.devices.len() != before
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn clock(&self) -> &ProgramClock {
        &self.clock
    }

    /// Pause input dispatch and game time
    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Game paused");
        }
        self.paused = true;
        self.paused_by_focus = false;
        self.clock.pause();
    }

    /// Resume input dispatch and game time
    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Game resumed");
        }
        self.paused = false;
        self.paused_by_focus = false;
        self.clock.resume();
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Deliver an event to devices front to back until one consumes it.
    /// Returns true if a device consumed the event.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::MouseMoved { x, y } => self.cursor = (x, y),
            InputEvent::FocusChanged(false) if !self.paused => {
                self.pause();
                self.paused_by_focus = true;
            }
            InputEvent::FocusChanged(true) if self.paused_by_focus => self.resume(),
            _ => {}
        }

        if self.paused {
            return false;
        }

        self.devices.iter().any(|device| device.handle_input(event))
    }

    /// Translate a winit window event and dispatch it. Events with no input
    /// meaning are ignored.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match self.translate(event) {
            Some(input) => self.dispatch(&input),
            None => false,
        }
    }

    fn translate(&self, event: &WindowEvent) -> Option<InputEvent> {
        let (x, y) = self.cursor;
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                match event.state {
                    ElementState::Pressed if event.repeat => None,
                    ElementState::Pressed => Some(InputEvent::KeyPressed(code)),
                    ElementState::Released => Some(InputEvent::KeyReleased(code)),
                }
            }
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x,
                y: position.y,
            }),
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => InputEvent::MousePressed {
                    button: *button,
                    x,
                    y,
                },
                ElementState::Released => InputEvent::MouseReleased {
                    button: *button,
                    x,
                    y,
                },
            }),
            WindowEvent::Focused(focused) => Some(InputEvent::FocusChanged(*focused)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualTimeSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct Recorder {
        name: &'static str,
        consume: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
        seen: AtomicUsize,
    }

    impl Recorder {
        fn new(name: &'static str, consume: bool, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
            Arc::new(Self {
                name,
                consume,
                log: log.clone(),
                seen: AtomicUsize::new(0),
            })
        }
    }

    impl InputDevice for Recorder {
        fn handle_input(&self, _event: &InputEvent) -> bool {
            self.seen.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(self.name);
            self.consume
        }
    }

    fn manager() -> (InputManager, Arc<ManualTimeSource>) {
        let source = Arc::new(ManualTimeSource::new());
        let clock = ProgramClock::with_source(source.clone());
        clock.setup();
        (InputManager::new(clock), source)
    }

    #[test]
    fn test_dispatch_order_and_consumption() {
        let (mut input, _) = manager();
        let log = Arc::new(Mutex::new(Vec::new()));
        input.register(Recorder::new("a", false, &log));
        input.register(Recorder::new("b", true, &log));
        input.register(Recorder::new("c", false, &log));

        let consumed = input.dispatch(&InputEvent::KeyPressed(KeyCode::Space));
        assert!(consumed);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_unregister() {
        let (mut input, _) = manager();
        let log = Arc::new(Mutex::new(Vec::new()));
        let device: Arc<dyn InputDevice> = Recorder::new("a", false, &log);
        input.register(device.clone());
        assert_eq!(input.device_count(), 1);

        assert!(input.unregister(&device));
        assert!(!input.unregister(&device));
        assert_eq!(input.device_count(), 0);
    }

    #[test]
    fn test_pause_freezes_clock_and_dispatch() {
        let (mut input, source) = manager();
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder::new("a", false, &log);
        input.register(recorder.clone());

        source.advance(Duration::from_millis(30));
        input.pause();
        source.advance(Duration::from_millis(100));
        assert!(input.clock().is_paused());
        assert_eq!(input.clock().time_millis(), 30);

        input.dispatch(&InputEvent::KeyPressed(KeyCode::KeyA));
        assert_eq!(recorder.seen.load(Ordering::SeqCst), 0);

        input.toggle_pause();
        assert!(!input.is_paused());
        input.dispatch(&InputEvent::KeyPressed(KeyCode::KeyA));
        assert_eq!(recorder.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_focus_loss_pauses_and_regain_resumes() {
        let (mut input, _) = manager();
        input.dispatch(&InputEvent::FocusChanged(false));
        assert!(input.is_paused());
        assert!(input.clock().is_paused());

        input.dispatch(&InputEvent::FocusChanged(true));
        assert!(!input.is_paused());
        assert!(!input.clock().is_paused());
    }

    #[test]
    fn test_focus_regain_keeps_manual_pause() {
        let (mut input, _) = manager();
        input.pause();
        input.dispatch(&InputEvent::FocusChanged(false));
        input.dispatch(&InputEvent::FocusChanged(true));
        assert!(input.is_paused());
    }

    #[test]
    fn test_cursor_tracked_while_paused() {
        let (mut input, _) = manager();
        input.pause();
        input.dispatch(&InputEvent::MouseMoved { x: 12.0, y: 34.0 });
        assert_eq!(input.cursor_position(), (12.0, 34.0));
    }
}

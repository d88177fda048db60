//! Kindle Runtime - Game loop infrastructure
//!
//! Provides the core game loop building blocks:
//! - `ProgramClock`: pausable game-time source shared across systems
//! - `FrameTimer`: fixed-timestep accumulator fed by game time
//! - `InputDevice` / `InputManager`: input dispatch and pause control

mod clock;
mod input;
mod timer;

pub use clock::{ManualTimeSource, ProgramClock, SystemTimeSource, TimeSource};
pub use input::{InputDevice, InputEvent, InputManager};
pub use timer::FrameTimer;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

//! Platform abstraction layer
//!
//! Pure helpers for the browser host, kept free of `web-sys` so they can be
//! tested natively:
//! - Frame timing from `requestAnimationFrame` timestamps
//! - Keyboard/pointer event mapping

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{HostCommand, key_command, pointer_steer, press_confirms, prevents_default};

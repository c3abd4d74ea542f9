//! Audio collaborators
//!
//! The simulation only ever asks for a named effect or toggles the ambient
//! loop. Every request is fire-and-forget: a backend that cannot play sound
//! swallows the request and the game carries on silently.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound effect requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Fatal meteor collision
    Hit,
    /// Star collected
    Success,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Hit => "hit",
            SoundEffect::Success => "success",
        }
    }
}

/// Best-effort audio output
pub trait AudioSink {
    /// Play a one-shot effect
    fn request_sound(&mut self, effect: SoundEffect);
    /// Start the looping background sound (no-op if already running)
    fn start_ambient(&mut self);
    /// Stop the looping background sound (no-op if not running)
    fn stop_ambient(&mut self);
}

/// Silent backend for native builds and headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn request_sound(&mut self, effect: SoundEffect) {
        log::trace!("(muted) sound: {}", effect.as_str());
    }

    fn start_ambient(&mut self) {}

    fn stop_ambient(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_names() {
        assert_eq!(SoundEffect::Hit.as_str(), "hit");
        assert_eq!(SoundEffect::Success.as_str(), "success");
    }
}

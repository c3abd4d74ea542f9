//! Input event mapping
//!
//! Key events use `KeyboardEvent.code` so the layout does not matter.

use crate::engine::InputAction;
use crate::sim::GamePhase;

/// What a host input event asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Forward to the engine
    Game(InputAction),
    /// Flip the mute preference
    ToggleMute,
    /// Flip idle/demo mode
    ToggleAutopilot,
}

/// Map a key press (`pressed = true`) or release to a command
pub fn key_command(code: &str, pressed: bool) -> Option<HostCommand> {
    match code {
        "ArrowLeft" | "KeyA" => Some(HostCommand::Game(InputAction::Left(pressed))),
        "ArrowRight" | "KeyD" => Some(HostCommand::Game(InputAction::Right(pressed))),
        "Space" | "Enter" if pressed => Some(HostCommand::Game(InputAction::Confirm)),
        "KeyM" if pressed => Some(HostCommand::ToggleMute),
        "KeyI" if pressed => Some(HostCommand::ToggleAutopilot),
        _ => None,
    }
}

/// Keys whose browser default (scrolling) must be suppressed
pub fn prevents_default(code: &str) -> bool {
    matches!(code, "ArrowLeft" | "ArrowRight" | "Space")
}

/// Directional intent for a pointer held at `x` on a surface `width` wide:
/// left half steers left, right half steers right.
pub fn pointer_steer(x: f32, width: f32) -> (bool, bool) {
    if width <= 0.0 {
        return (false, false);
    }
    let left = x < width / 2.0;
    (left, !left)
}

/// A click or tap outside of play starts or restarts the session
pub fn press_confirms(phase: GamePhase) -> bool {
    phase != GamePhase::Playing
}

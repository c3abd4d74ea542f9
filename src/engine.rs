//! Simulation engine
//!
//! Owns the one [`GameState`] for the process, the held-direction flags and
//! the best score, and turns simulation events into audio and persistence
//! requests. The host calls [`Engine::advance`] once per animation frame.

use crate::audio::{AudioSink, SoundEffect};
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GamePhase, GameState, RenderSnapshot, TickInput, autopilot, tick};

/// Discrete input from any source (keyboard, pointer, touch)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left held (`true`) or released (`false`)
    Left(bool),
    /// Right held (`true`) or released (`false`)
    Right(bool),
    /// Start from Idle, restart from Ended; ignored while playing
    Confirm,
}

/// Outcome of the most recent session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: u64,
    /// Best score after this session was counted
    pub best_score: u64,
    /// This session set a new best
    pub new_best: bool,
}

pub struct Engine<A: AudioSink, S: ScoreStore> {
    state: GameState,
    input: TickInput,
    autopilot: bool,
    best_score: u64,
    last_result: Option<SessionResult>,
    audio: A,
    store: S,
}

impl<A: AudioSink, S: ScoreStore> Engine<A, S> {
    /// Wrap an idle state; reads the best score once
    pub fn new(state: GameState, audio: A, store: S) -> Self {
        let best_score = store.load_best_score().unwrap_or_else(|e| {
            log::warn!("Could not load best score ({}), starting from 0", e);
            0
        });
        log::info!("Best score: {}", best_score);

        Self {
            state,
            input: TickInput::default(),
            autopilot: false,
            best_score,
            last_result: None,
            audio,
            store,
        }
    }

    /// Begin a session from any phase
    pub fn start(&mut self) {
        self.begin_session();
    }

    /// Full reset into a fresh session
    pub fn reset(&mut self) {
        self.begin_session();
    }

    fn begin_session(&mut self) {
        self.state.reset();
        self.last_result = None;
        self.audio.start_ambient();
        log::info!("Session started");
    }

    /// Start command; only honored from Idle
    pub fn on_start_requested(&mut self) {
        if self.state.phase == GamePhase::Idle {
            self.start();
        }
    }

    /// Restart command; only honored from Ended
    pub fn on_restart_requested(&mut self) {
        if self.state.phase == GamePhase::Ended {
            self.reset();
        }
    }

    /// Replace both held-direction flags
    pub fn set_directional_intent(&mut self, left: bool, right: bool) {
        self.input = TickInput { left, right };
    }

    pub fn handle_input(&mut self, action: InputAction) {
        match action {
            InputAction::Left(held) => self.input.left = held,
            InputAction::Right(held) => self.input.right = held,
            InputAction::Confirm => match self.state.phase {
                GamePhase::Idle => self.on_start_requested(),
                GamePhase::Ended => self.on_restart_requested(),
                GamePhase::Playing => {}
            },
        }
    }

    /// Let the game steer itself instead of reading held directions
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Step one frame. `dt` is clamped to `[0, max_frame_dt]`.
    pub fn advance(&mut self, dt: f32) {
        let dt = self.clamp_dt(dt);
        let input = if self.autopilot {
            autopilot::steer(&self.state)
        } else {
            self.input
        };

        tick(&mut self.state, &input, dt);

        let events: Vec<GameEvent> = self.state.drain_events().collect();
        for event in events {
            self.dispatch(event);
        }
    }

    fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, self.state.tuning.max_frame_dt)
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::StarCollected { .. } => {
                self.audio.request_sound(SoundEffect::Success);
            }
            GameEvent::SessionEnded { final_score } => {
                self.audio.stop_ambient();
                self.audio.request_sound(SoundEffect::Hit);

                let new_best = final_score > self.best_score;
                if new_best {
                    self.best_score = final_score;
                    if let Err(e) = self.store.save_best_score(final_score) {
                        log::warn!("Could not save best score: {}", e);
                    }
                    log::info!("New best score: {}", final_score);
                }

                self.last_result = Some(SessionResult {
                    final_score,
                    best_score: self.best_score,
                    new_best,
                });
            }
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::new(&self.state, self.best_score)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Final/best score of the last ended session (cleared on restart)
    pub fn last_result(&self) -> Option<SessionResult> {
        self.last_result
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Backend-specific audio controls (resume, mute)
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[cfg(test)]
    fn audio(&self) -> &A {
        &self.audio
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::{Meteor, Star};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Records every audio request in order
    #[derive(Debug, Default)]
    struct RecordingAudio {
        log: Vec<&'static str>,
    }

    impl AudioSink for RecordingAudio {
        fn request_sound(&mut self, effect: SoundEffect) {
            self.log.push(effect.as_str());
        }
        fn start_ambient(&mut self) {
            self.log.push("ambient:start");
        }
        fn stop_ambient(&mut self) {
            self.log.push("ambient:stop");
        }
    }

    fn engine_with(store: MemoryStore) -> Engine<RecordingAudio, MemoryStore> {
        Engine::new(GameState::new(1234), RecordingAudio::default(), store)
    }

    fn engine() -> Engine<RecordingAudio, MemoryStore> {
        engine_with(MemoryStore::new())
    }

    /// Drop a stationary meteor right on the ship
    fn crash(engine: &mut Engine<RecordingAudio, MemoryStore>) {
        let center = engine.state().player.center();
        engine.state_mut().meteors.push(Meteor {
            pos: center - Vec2::splat(10.0),
            size: 20.0,
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            hue: 20.0,
        });
        engine.advance(0.0);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut engine = engine();
        assert_eq!(engine.phase(), GamePhase::Idle);

        engine.on_restart_requested();
        assert_eq!(engine.phase(), GamePhase::Idle);

        engine.on_start_requested();
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.audio().log, vec!["ambient:start"]);

        // A second start request mid-session is ignored
        engine.state_mut().score = 5;
        engine.on_start_requested();
        assert_eq!(engine.score(), 5);
    }

    #[test]
    fn test_confirm_follows_phase() {
        let mut engine = engine();
        engine.handle_input(InputAction::Confirm);
        assert_eq!(engine.phase(), GamePhase::Playing);

        engine.state_mut().score = 3;
        engine.handle_input(InputAction::Confirm);
        assert_eq!(engine.score(), 3);

        crash(&mut engine);
        assert_eq!(engine.phase(), GamePhase::Ended);

        engine.handle_input(InputAction::Confirm);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.last_result(), None);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut engine = engine();
        engine.start();
        engine.start();

        let state = engine.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, 0.0);
        assert!(state.meteors.is_empty());
        assert!(state.stars.is_empty());
        assert_eq!(state.timers, Default::default());
        assert_eq!(state.player.pos.x, 185.0);
    }

    #[test]
    fn test_reset_yields_fresh_snapshot() {
        let mut engine = engine();
        engine.start();
        engine.set_directional_intent(true, false);
        for _ in 0..120 {
            engine.advance(1.0 / 60.0);
        }
        engine.state_mut().stars.push(Star {
            pos: Vec2::new(10.0, 10.0),
            size: 12.0,
            speed: 150.0,
            rotation: 0.0,
            rotation_speed: 3.0,
        });

        engine.reset();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Playing);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.meteors.is_empty());
        assert!(snapshot.stars.is_empty());
        assert_eq!(snapshot.player.pos.x, 185.0);
        assert_eq!(engine.state().elapsed, 0.0);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut engine = engine();
        engine.start();
        engine.advance(5.0);
        assert!((engine.state().elapsed - 0.1).abs() < 1e-6);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_uneven_frames_score_once_per_interval() {
        let mut engine = engine();
        engine.start();
        for _ in 0..200 {
            engine.state_mut().meteors.clear();
            engine.state_mut().stars.clear();
            engine.advance(0.09);
        }
        // A point every 12 frames (1.08 s), leftover time dropped
        assert_eq!(engine.score(), 16);
    }

    #[test]
    fn test_bad_deltas_do_nothing() {
        let mut engine = engine();
        engine.start();
        engine.advance(f32::NAN);
        engine.advance(-1.0);
        assert_eq!(engine.state().elapsed, 0.0);
    }

    #[test]
    fn test_left_intent_at_wall_stays_clamped() {
        let mut engine = engine();
        engine.start();
        engine.state_mut().player.pos.x = 0.0;
        engine.handle_input(InputAction::Left(true));
        engine.advance(1.0);
        assert_eq!(engine.state().player.pos.x, 0.0);

        engine.handle_input(InputAction::Left(false));
        engine.handle_input(InputAction::Right(true));
        engine.advance(0.1);
        assert!((engine.state().player.pos.x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_session_end_persists_new_best_once() {
        let mut engine = engine_with(MemoryStore::with_best(4));
        assert_eq!(engine.best_score(), 4);
        engine.start();
        engine.state_mut().score = 12;
        crash(&mut engine);

        assert_eq!(engine.phase(), GamePhase::Ended);
        assert_eq!(engine.best_score(), 12);
        assert_eq!(engine.store().saves, 1);
        assert_eq!(engine.store().raw(), Some("12"));
        assert_eq!(
            engine.last_result(),
            Some(SessionResult {
                final_score: 12,
                best_score: 12,
                new_best: true
            })
        );
        assert_eq!(
            engine.audio().log,
            vec!["ambient:start", "ambient:stop", "hit"]
        );

        // Further frames in Ended never save again
        for _ in 0..10 {
            engine.advance(0.1);
        }
        assert_eq!(engine.store().saves, 1);
    }

    #[test]
    fn test_lower_score_does_not_persist() {
        let mut engine = engine_with(MemoryStore::with_best(50));
        engine.start();
        engine.state_mut().score = 50;
        crash(&mut engine);

        assert_eq!(engine.store().saves, 0);
        assert_eq!(engine.best_score(), 50);
        assert_eq!(
            engine.last_result(),
            Some(SessionResult {
                final_score: 50,
                best_score: 50,
                new_best: false
            })
        );
    }

    #[test]
    fn test_storage_failures_degrade() {
        let mut engine = engine_with(MemoryStore::unavailable());
        assert_eq!(engine.best_score(), 0);
        engine.start();
        engine.state_mut().score = 3;
        crash(&mut engine);
        // Kept in memory even though the save failed
        assert_eq!(engine.best_score(), 3);

        let corrupt = engine_with(MemoryStore::with_raw("garbage"));
        assert_eq!(corrupt.best_score(), 0);
    }

    #[test]
    fn test_star_collection_plays_success() {
        let mut engine = engine();
        engine.start();
        let center = engine.state().player.center();
        engine.state_mut().stars.push(Star {
            pos: center - Vec2::splat(6.0),
            size: 12.0,
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        engine.advance(0.0);

        assert_eq!(engine.score(), 10);
        assert_eq!(engine.phase(), GamePhase::Playing);
        assert_eq!(engine.audio().log, vec!["ambient:start", "success"]);
    }

    #[test]
    fn test_autopilot_overrides_held_keys() {
        let mut engine = engine();
        engine.start();
        engine.set_autopilot(true);
        engine.set_directional_intent(true, false);
        // Nothing threatening and no stars: autopilot holds still
        engine.advance(0.1);
        assert_eq!(engine.state().player.pos.x, 185.0);
    }

    proptest! {
        #[test]
        fn prop_step_never_exceeds_clamp(dt in 0.1f32..100.0) {
            let mut engine = engine();
            engine.start();
            engine.advance(dt);
            prop_assert!((engine.state().elapsed - 0.1).abs() < 1e-6);
        }

        #[test]
        fn prop_player_in_bounds_under_any_input(
            frames in proptest::collection::vec((0.0f32..0.5, any::<bool>(), any::<bool>()), 1..200),
        ) {
            let mut engine = engine();
            engine.start();
            for (dt, left, right) in frames {
                engine.set_directional_intent(left, right);
                engine.advance(dt);
                if engine.phase() == GamePhase::Ended {
                    engine.on_restart_requested();
                }
                let x = engine.state().player.pos.x;
                prop_assert!((0.0..=370.0).contains(&x));
            }
        }
    }
}

use std::time::Duration;

use drop_catcher::audio::{AudioSink, Music, Sound};
use drop_catcher::clock::{Clock, FrameTime, ManualClock};
use drop_catcher::config::GameConfig;
use drop_catcher::entities::Raindrop;
use drop_catcher::input::InputSnapshot;
use drop_catcher::modes::{Control, Mode, ModeController};
use drop_catcher::render::{Canvas, Sprite, RESTART_HINT, START_HINT, WELCOME_TEXT};

#[derive(Default)]
struct RecordingCanvas {
    sprites: Vec<(Sprite, f32, f32)>,
    texts: Vec<String>,
}

impl RecordingCanvas {
    fn count(&self, sprite: Sprite) -> usize {
        self.sprites.iter().filter(|(s, _, _)| *s == sprite).count()
    }

    fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

impl Canvas for RecordingCanvas {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, _width: f32, _height: f32) {
        self.sprites.push((sprite, x, y));
    }
    fn draw_text(&mut self, text: &str, _x: f32, _y: f32) {
        self.texts.push(text.to_string());
    }
}

#[derive(Default)]
struct RecordingAudio {
    sounds: Vec<Sound>,
    looping: Option<Music>,
}

impl AudioSink for RecordingAudio {
    fn play_once(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }
    fn play_looping(&mut self, music: Music) {
        self.looping = Some(music);
    }
    fn stop(&mut self, music: Music) {
        if self.looping == Some(music) {
            self.looping = None;
        }
    }
}

/// Drives a controller with a manual clock, one canvas per frame.
struct Harness {
    controller: ModeController,
    clock: ManualClock,
    audio: RecordingAudio,
}

impl Harness {
    fn new() -> Self {
        Self {
            controller: ModeController::with_seed(GameConfig::default(), 1),
            clock: ManualClock::new(Duration::ZERO),
            audio: RecordingAudio::default(),
        }
    }

    fn frame(&mut self, input: InputSnapshot, delta: f32) -> (Control, RecordingCanvas) {
        self.clock.advance(Duration::from_secs_f32(delta));
        let time = FrameTime::sample(&self.clock, delta);
        let mut canvas = RecordingCanvas::default();
        let control = self.controller.on_frame(&input, time, &mut self.audio, &mut canvas);
        (control, canvas)
    }

    fn start_playing(&mut self) {
        let tap = InputSnapshot { activated: true, ..InputSnapshot::default() };
        self.frame(tap, 0.0);
        assert!(self.controller.is_playing());
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn starts_on_menu_and_shows_welcome() {
    let mut h = Harness::new();
    assert!(matches!(h.controller.mode(), Mode::Menu(_)));

    let (control, canvas) = h.frame(idle(), 0.1);
    assert_eq!(control, Control::Continue);
    assert!(canvas.has_text(WELCOME_TEXT));
    assert!(canvas.has_text(START_HINT));
    assert!(!h.controller.is_playing());
    assert!(h.controller.simulation().is_none());
}

#[test]
fn keys_alone_do_not_leave_menu() {
    let mut h = Harness::new();
    let keys = InputSnapshot { left: true, right: true, restart: true, ..idle() };
    for _ in 0..10 {
        h.frame(keys, 0.1);
    }
    assert!(!h.controller.is_playing());
}

#[test]
fn activation_starts_a_fresh_run() {
    let mut h = Harness::new();
    h.frame(idle(), 2.0);
    h.start_playing();

    let sim = h.controller.simulation().unwrap();
    let s = sim.state();
    assert_eq!(s.run.score, 0);
    assert_eq!(s.run.lives, 3);
    assert_eq!(s.run.drop_speed, 200.0);
    assert!(s.drops.is_empty());
    // Spawn timer starts at the moment of the transition
    assert_eq!(s.run.last_spawn, h.clock.now());
    assert_eq!(h.audio.looping, Some(Music::Rain));
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn playing_frames_step_the_simulation() {
    let mut h = Harness::new();
    h.start_playing();

    let (_, canvas) = h.frame(idle(), 1.0);
    let s = h.controller.simulation().unwrap().state();
    assert_eq!(s.drops.len(), 1);
    assert_eq!(canvas.count(Sprite::Raindrop), 1);
    assert_eq!(canvas.count(Sprite::Bucket), 1);
    assert_eq!(canvas.count(Sprite::Heart), 3);
    assert!(canvas.has_text("Score: 0"));
    assert!(!canvas.has_text(RESTART_HINT));
}

#[test]
fn catch_plays_sound_and_updates_hud() {
    let mut h = Harness::new();
    h.start_playing();
    h.controller
        .simulation_mut()
        .unwrap()
        .state_mut()
        .drops
        .push(Raindrop { x: 368.0, y: 64.0, width: 64.0, height: 64.0 });

    let (_, canvas) = h.frame(idle(), 0.0);
    assert_eq!(h.audio.sounds, vec![Sound::Catch]);
    assert!(canvas.has_text("Score: 1"));
    assert!(canvas.has_text("Best: 1"));
    assert_eq!(h.controller.best_score(), 1);
}

#[test]
fn depleted_run_offers_restart() {
    let mut h = Harness::new();
    h.start_playing();
    {
        let state = h.controller.simulation_mut().unwrap().state_mut();
        state.run.lives = 1;
        state.drops.push(Raindrop { x: 0.0, y: -100.0, width: 64.0, height: 64.0 });
    }

    let (_, canvas) = h.frame(idle(), 0.0);
    assert!(h.controller.offers_restart());
    assert!(canvas.has_text(RESTART_HINT));
    assert_eq!(canvas.count(Sprite::Heart), 0);

    // Still playing: game over is a sub-state, not a separate mode
    assert!(h.controller.is_playing());
}

#[test]
fn restart_keeps_session_best() {
    let mut h = Harness::new();
    h.start_playing();
    {
        let state = h.controller.simulation_mut().unwrap().state_mut();
        state.run.score = 12;
        state.run.lives = 1;
        state.drops.push(Raindrop { x: 0.0, y: -100.0, width: 64.0, height: 64.0 });
    }
    h.frame(idle(), 0.0);
    assert!(h.controller.offers_restart());

    let restart = InputSnapshot { restart: true, ..idle() };
    h.frame(restart, 0.1);
    assert!(!h.controller.offers_restart());
    assert_eq!(h.controller.simulation().unwrap().state().run.score, 0);

    let (_, canvas) = h.frame(idle(), 0.1);
    assert!(canvas.has_text("Best: 12"));
    assert_eq!(h.controller.best_score(), 12);
}

// ── Exit ──────────────────────────────────────────────────────────────────────

#[test]
fn exit_from_menu() {
    let mut h = Harness::new();
    let (control, _) = h.frame(InputSnapshot { exit: true, ..idle() }, 0.1);
    assert_eq!(control, Control::Exit);
}

#[test]
fn exit_while_playing_stops_music() {
    let mut h = Harness::new();
    h.start_playing();
    assert_eq!(h.audio.looping, Some(Music::Rain));

    let (control, _) = h.frame(InputSnapshot { exit: true, ..idle() }, 0.1);
    assert_eq!(control, Control::Exit);
    assert_eq!(h.audio.looping, None);
}

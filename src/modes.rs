//! Screens and the controller that keeps exactly one of them live.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::audio::{AudioSink, Music};
use crate::clock::FrameTime;
use crate::compute::Simulation;
use crate::config::GameConfig;
use crate::entities::Playfield;
use crate::input::InputSnapshot;
use crate::render::{draw_menu, draw_playing, Canvas};

/// Everything a screen gets for one frame.
pub struct Frame<'a> {
    pub input: &'a InputSnapshot,
    pub time: FrameTime,
    pub audio: &'a mut dyn AudioSink,
    pub canvas: &'a mut dyn Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    StartPlaying,
}

/// Lifecycle hooks, called by whoever owns the frame loop.
pub trait Screen {
    fn on_enter(&mut self, _now: Duration, _audio: &mut dyn AudioSink) {}
    fn on_frame(&mut self, frame: &mut Frame<'_>) -> Transition;
    fn on_exit(&mut self, _audio: &mut dyn AudioSink) {}
}

// ── Menu ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MenuScreen {
    playfield: Playfield,
}

impl MenuScreen {
    pub fn new(playfield: Playfield) -> Self {
        Self { playfield }
    }
}

impl Screen for MenuScreen {
    fn on_frame(&mut self, frame: &mut Frame<'_>) -> Transition {
        draw_menu(frame.canvas, &self.playfield);
        if frame.input.activated {
            Transition::StartPlaying
        } else {
            Transition::Stay
        }
    }
}

// ── Playing ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PlayScreen {
    simulation: Simulation,
    best_score: u32,
}

impl PlayScreen {
    pub fn new(simulation: Simulation) -> Self {
        Self { simulation, best_score: 0 }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    /// Highest score seen in any run of this session. Never persisted.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }
}

impl Screen for PlayScreen {
    fn on_enter(&mut self, _now: Duration, audio: &mut dyn AudioSink) {
        audio.play_looping(Music::Rain);
    }

    fn on_frame(&mut self, frame: &mut Frame<'_>) -> Transition {
        let state = self.simulation.step(frame.input, frame.time, &mut *frame.audio);
        self.best_score = self.best_score.max(state.run.score);
        draw_playing(frame.canvas, state, self.best_score);
        Transition::Stay
    }

    fn on_exit(&mut self, audio: &mut dyn AudioSink) {
        audio.stop(Music::Rain);
    }
}

// ── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Mode {
    Menu(MenuScreen),
    Playing(PlayScreen),
}

impl Mode {
    fn screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Mode::Menu(menu) => menu,
            Mode::Playing(play) => play,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Owns the live screen and swaps it when a screen asks for a transition.
/// Starts on the menu.
#[derive(Debug, Clone)]
pub struct ModeController {
    config: GameConfig,
    mode: Mode,
    seeds: StdRng,
}

impl ModeController {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Every run started from this controller draws its spawn RNG from
    /// `seed`, so a whole session replays identically.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, seeds: StdRng) -> Self {
        let mode = Mode::Menu(MenuScreen::new(config.playfield()));
        Self { config, mode, seeds }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Playing(_))
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        match &self.mode {
            Mode::Playing(play) => Some(play.simulation()),
            Mode::Menu(_) => None,
        }
    }

    pub fn simulation_mut(&mut self) -> Option<&mut Simulation> {
        match &mut self.mode {
            Mode::Playing(play) => Some(play.simulation_mut()),
            Mode::Menu(_) => None,
        }
    }

    /// True while the live run has no lives left.
    pub fn offers_restart(&self) -> bool {
        self.simulation().is_some_and(Simulation::is_depleted)
    }

    pub fn best_score(&self) -> u32 {
        match &self.mode {
            Mode::Playing(play) => play.best_score(),
            Mode::Menu(_) => 0,
        }
    }

    pub fn on_frame(
        &mut self,
        input: &InputSnapshot,
        time: FrameTime,
        audio: &mut dyn AudioSink,
        canvas: &mut dyn Canvas,
    ) -> Control {
        if input.exit {
            self.mode.screen_mut().on_exit(audio);
            info!(best_score = self.best_score(), "exit requested");
            return Control::Exit;
        }

        let transition = {
            let mut frame = Frame { input, time, audio: &mut *audio, canvas };
            self.mode.screen_mut().on_frame(&mut frame)
        };

        if transition == Transition::StartPlaying {
            self.start_playing(time.now, audio);
        }
        Control::Continue
    }

    fn start_playing(&mut self, now: Duration, audio: &mut dyn AudioSink) {
        self.mode.screen_mut().on_exit(audio);
        let seed: u64 = self.seeds.gen();
        let simulation = Simulation::with_seed(self.config.clone(), now, seed);
        let mut play = PlayScreen::new(simulation);
        play.on_enter(now, audio);
        self.mode = Mode::Playing(play);
        info!("menu -> playing");
    }
}

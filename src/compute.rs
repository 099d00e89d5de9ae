//! Game-logic functions for the playing screen.
//!
//! Every public function works on an explicitly passed `GameState`.
//! Randomness comes through an injected RNG and time through `FrameTime`, so
//! a run replays exactly from a seed and a sequence of frames.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::audio::{AudioSink, Sound};
use crate::clock::FrameTime;
use crate::config::GameConfig;
use crate::entities::{Bucket, GameState, Raindrop, RunState};
use crate::input::InputSnapshot;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh run: full lives, base speed, no raindrops, bucket centred on its
/// baseline. The spawn timer starts at `now`.
pub fn init_state(config: &GameConfig, now: Duration) -> GameState {
    let playfield = config.playfield();
    GameState {
        playfield,
        bucket: Bucket {
            x: playfield.width / 2.0 - config.bucket.width / 2.0,
            y: config.bucket.baseline,
            width: config.bucket.width,
            height: config.bucket.height,
        },
        drops: Vec::new(),
        run: RunState {
            score: 0,
            lives: config.starting_lives,
            drop_speed: config.drops.base_speed,
            last_spawn: now,
        },
    }
}

pub fn reset(state: &mut GameState, config: &GameConfig, now: Duration) {
    let previous = state.run.score;
    *state = init_state(config, now);
    info!(previous_score = previous, "run restarted");
}

// ── Spawning ─────────────────────────────────────────────────────────────────

pub fn spawn_due(state: &GameState, config: &GameConfig, now: Duration) -> bool {
    now.saturating_sub(state.run.last_spawn) >= config.spawn_interval()
}

/// Add one raindrop at the top edge, anywhere it fits horizontally.
pub fn spawn_drop(state: &mut GameState, config: &GameConfig, now: Duration, rng: &mut impl Rng) {
    let max_x = (state.playfield.width - config.drops.width).max(0.0);
    let x = rng.gen_range(0.0..=max_x);
    state.drops.push(Raindrop {
        x,
        y: state.playfield.height,
        width: config.drops.width,
        height: config.drops.height,
    });
    state.run.last_spawn = now;
    debug!(x, live = state.drops.len(), "spawned raindrop");
}

// ── Falling & collisions ─────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepEvents {
    pub spawned: bool,
    pub caught: u32,
    pub missed: u32,
    pub restarted: bool,
}

/// Move every raindrop down by one frame and resolve it.
///
/// Each raindrop is visited once. A raindrop that fell out of the playfield
/// costs a life and is never tested against the bucket; otherwise a strict
/// overlap with the bucket scores it. Survivors are collected into a new
/// list rather than removed in place.
pub fn advance_drops(
    state: &mut GameState,
    config: &GameConfig,
    dt: f32,
    audio: &mut dyn AudioSink,
) -> StepEvents {
    let mut events = StepEvents::default();
    let bucket = state.bucket.bounds();
    let mut kept = Vec::with_capacity(state.drops.len());

    for mut raindrop in std::mem::take(&mut state.drops) {
        raindrop.y -= state.run.drop_speed * dt;

        if raindrop.is_below_playfield() {
            state.run.lives = state.run.lives.saturating_sub(1);
            events.missed += 1;
            debug!(x = raindrop.x, lives = state.run.lives, "raindrop missed");
            continue;
        }

        if raindrop.bounds().overlaps(&bucket) {
            audio.play_once(Sound::Catch);
            state.run.score += 1;
            state.run.drop_speed += config.drops.speed_step;
            events.caught += 1;
            debug!(
                score = state.run.score,
                speed = state.run.drop_speed,
                "raindrop caught"
            );
            continue;
        }

        kept.push(raindrop);
    }

    state.drops = kept;
    events
}

// ── Input-driven motion ──────────────────────────────────────────────────────

/// A held pointer centres the bucket under it and wins over the keys for
/// that frame. Without a pointer, left and right each push at `key_speed`
/// (both together cancel out).
pub fn move_bucket(state: &mut GameState, input: &InputSnapshot, key_speed: f32, dt: f32) {
    if let Some(pointer) = input.pointer {
        let (px, _) = pointer.to_playfield(&state.playfield);
        state.bucket.x = px - state.bucket.width / 2.0;
        return;
    }
    if input.left {
        state.bucket.x -= key_speed * dt;
    }
    if input.right {
        state.bucket.x += key_speed * dt;
    }
}

/// Keep the bucket fully inside the playfield. Idempotent.
pub fn clamp_bucket(state: &mut GameState) {
    let max_x = (state.playfield.width - state.bucket.width).max(0.0);
    state.bucket.x = if state.bucket.x.is_nan() {
        0.0
    } else {
        state.bucket.x.clamp(0.0, max_x)
    };
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the playing world by one frame.
///
/// While depleted nothing moves; the only thing checked is the restart key.
/// Otherwise: at most one spawn (no catch-up when several intervals have
/// passed), then the raindrop pass, then bucket motion and clamping.
pub fn step(
    state: &mut GameState,
    config: &GameConfig,
    input: &InputSnapshot,
    time: FrameTime,
    rng: &mut impl Rng,
    audio: &mut dyn AudioSink,
) -> StepEvents {
    if state.is_depleted() {
        if input.restart {
            reset(state, config, time.now);
            return StepEvents { restarted: true, ..StepEvents::default() };
        }
        return StepEvents::default();
    }

    let dt = time.delta_seconds();

    let spawned = spawn_due(state, config, time.now);
    if spawned {
        spawn_drop(state, config, time.now, rng);
    }

    let mut events = advance_drops(state, config, dt, audio);
    events.spawned = spawned;
    if events.missed > 0 && state.is_depleted() {
        info!(score = state.run.score, "run over");
    }

    move_bucket(state, input, config.bucket.key_speed, dt);
    clamp_bucket(state);

    events
}

// ── Simulation ───────────────────────────────────────────────────────────────

/// Owns one playthrough: config, world state and the spawn RNG.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    last_events: StepEvents,
}

impl Simulation {
    pub fn with_seed(config: GameConfig, now: Duration, seed: u64) -> Self {
        Self::with_rng(config, now, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, now: Duration, rng: StdRng) -> Self {
        let state = init_state(&config, now);
        info!(lives = state.run.lives, "run started");
        Self { config, state, rng, last_events: StepEvents::default() }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn last_events(&self) -> StepEvents {
        self.last_events
    }

    pub fn is_depleted(&self) -> bool {
        self.state.is_depleted()
    }

    /// Starts a new run without waiting for the restart key.
    pub fn reset(&mut self, now: Duration) {
        reset(&mut self.state, &self.config, now);
    }

    pub fn step(
        &mut self,
        input: &InputSnapshot,
        time: FrameTime,
        audio: &mut dyn AudioSink,
    ) -> &GameState {
        self.last_events = step(
            &mut self.state,
            &self.config,
            input,
            time,
            &mut self.rng,
            audio,
        );
        &self.state
    }
}

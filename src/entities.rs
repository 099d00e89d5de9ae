//! All game entity types: plain data plus their bounding geometry.
//!
//! Coordinates are playfield units with the origin at the bottom-left corner
//! and `y` growing upward.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

// ── Bucket & raindrops ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bucket {
    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Raindrop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Raindrop {
    pub fn bounds(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// True once the whole sprite is below the bottom edge.
    pub fn is_below_playfield(&self) -> bool {
        self.y + self.height < 0.0
    }
}

// ── Run state ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Lives remain: spawning, falling and collisions are live.
    Active,
    /// No lives left: the world is frozen until a restart.
    Depleted,
}

/// Score, lives and difficulty for one playthrough.
#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    /// Fall speed in playfield units per second.
    pub drop_speed: f32,
    /// Clock reading of the most recent spawn (or of the reset).
    pub last_spawn: std::time::Duration,
}

impl RunState {
    pub fn status(&self) -> RunStatus {
        if self.lives == 0 {
            RunStatus::Depleted
        } else {
            RunStatus::Active
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the playing screen simulates and draws.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub playfield: Playfield,
    pub bucket: Bucket,
    /// Live raindrops. Order carries no meaning.
    pub drops: Vec<Raindrop>,
    pub run: RunState,
}

impl GameState {
    pub fn is_depleted(&self) -> bool {
        self.run.status() == RunStatus::Depleted
    }
}

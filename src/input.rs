//! Per-frame input, already decoded by the front end.

use crate::entities::Playfield;

/// Pointer position in screen space (origin top-left, `y` down) together
/// with the size of the screen it was measured on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl Pointer {
    /// Project into playfield coordinates (origin bottom-left, `y` up).
    /// A degenerate screen maps straight through.
    pub fn to_playfield(&self, playfield: &Playfield) -> (f32, f32) {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return (self.x, playfield.height - self.y);
        }
        let x = self.x / self.screen_width * playfield.width;
        let y = playfield.height - self.y / self.screen_height * playfield.height;
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// A primary activation (pointer press) happened this frame.
    pub activated: bool,
    /// Present while the pointer is held down.
    pub pointer: Option<Pointer>,
    pub left: bool,
    pub right: bool,
    pub restart: bool,
    pub exit: bool,
}

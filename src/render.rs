//! Draw routines for each screen.
//!
//! The core only issues draw requests through `Canvas`; it never reads
//! anything back. Positions are playfield coordinates (origin bottom-left).

use crate::entities::{GameState, Playfield};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Bucket,
    Raindrop,
    Heart,
}

pub trait Canvas {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, width: f32, height: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
}

pub const WELCOME_TEXT: &str = "Welcome to Drop!!!";
pub const START_HINT: &str = "Tap anywhere to begin!";
pub const RESTART_HINT: &str = "Press ENTER to restart";

const HEART_SIZE: f32 = 32.0;
const HEART_SPACING: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;

pub fn draw_menu(canvas: &mut dyn Canvas, playfield: &Playfield) {
    canvas.draw_sprite(Sprite::Background, 0.0, 0.0, playfield.width, playfield.height);
    canvas.draw_text(WELCOME_TEXT, 100.0, 150.0);
    canvas.draw_text(START_HINT, 100.0, 100.0);
}

/// Background, hearts, bucket, HUD text, game-over prompt, then raindrops
/// on top.
pub fn draw_playing(canvas: &mut dyn Canvas, state: &GameState, best_score: u32) {
    let pf = &state.playfield;
    canvas.draw_sprite(Sprite::Background, 0.0, 0.0, pf.width, pf.height);

    for life in 1..=state.run.lives {
        canvas.draw_sprite(
            Sprite::Heart,
            pf.width - HEART_SPACING * life as f32,
            pf.height - HEART_SIZE - HUD_MARGIN,
            HEART_SIZE,
            HEART_SIZE,
        );
    }

    let b = &state.bucket;
    canvas.draw_sprite(Sprite::Bucket, b.x, b.y, b.width, b.height);

    canvas.draw_text(&format!("Score: {}", state.run.score), HUD_MARGIN, pf.height - HUD_MARGIN);
    canvas.draw_text(
        &format!("Best: {}", best_score.max(state.run.score)),
        HUD_MARGIN,
        pf.height - HUD_MARGIN - HEART_SIZE,
    );

    if state.is_depleted() {
        canvas.draw_text(RESTART_HINT, pf.width / 2.0 - 130.0, pf.height / 2.0);
    }

    for drop in &state.drops {
        canvas.draw_sprite(Sprite::Raindrop, drop.x, drop.y, drop.width, drop.height);
    }
}

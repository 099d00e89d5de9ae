//! Rendering layer: draws each frame onto the terminal.
//!
//! `TerminalCanvas` collects one frame of draw requests into a cell grid and
//! `present` writes it out. Playfield coordinates are scaled onto the
//! terminal with `y` flipped, so the playfield floor is the bottom field row.
//! The very last terminal row is reserved for the controls hint.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use drop_catcher::entities::Playfield;
use drop_catcher::render::{Canvas, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TEXT: Color = Color::Yellow;
const C_BUCKET: Color = Color::White;
const C_DROP: Color = Color::Cyan;
const C_HEART: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset };

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas {
    playfield: Playfield,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl TerminalCanvas {
    pub fn new(playfield: Playfield, cols: u16, rows: u16) -> Self {
        let mut canvas = Self { playfield, cols: 0, rows: 0, cells: Vec::new() };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Rows available to the playfield (everything above the hint line).
    pub fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn col_of(&self, x: f32) -> i32 {
        (x / self.playfield.width * self.cols as f32).floor() as i32
    }

    fn row_of(&self, y: f32) -> i32 {
        let rows = self.field_rows() as f32;
        rows as i32 - 1 - (y / self.playfield.height * rows).floor() as i32
    }

    /// Cell span covered by a playfield rectangle: (left, right, top, bottom),
    /// always at least one cell.
    fn span(&self, x: f32, y: f32, width: f32, height: f32) -> (i32, i32, i32, i32) {
        let left = self.col_of(x);
        let right = (self.col_of(x + width) - 1).max(left);
        let bottom = self.row_of(y);
        let top = (self.row_of(y + height) + 1).min(bottom);
        (left, right, top, bottom)
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.field_rows() as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = cell;
    }

    /// Write the collected frame, then the hint line, then one bell per
    /// pending catch sound.
    pub fn present<W: Write>(&self, out: &mut W, hint: &str, bells: u32) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        for row in 0..self.field_rows() {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            // Print runs of equal colour in one go
            let mut run = String::new();
            let mut run_fg = Color::Reset;
            for cell in line {
                if cell.fg != run_fg && !run.is_empty() {
                    out.queue(style::SetForegroundColor(run_fg))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                run_fg = cell.fg;
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(style::SetForegroundColor(run_fg))?;
                out.queue(Print(&run))?;
            }
        }

        out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;

        if bells > 0 {
            out.queue(Print('\x07'))?;
        }

        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    fn draw_border(&mut self) {
        let right = self.cols as i32 - 1;
        let bottom = self.field_rows() as i32 - 1;
        let edge = |ch| Cell { ch, fg: C_BORDER };
        for col in 1..right {
            self.put(col, 0, edge('─'));
            self.put(col, bottom, edge('─'));
        }
        for row in 1..bottom {
            self.put(0, row, edge('│'));
            self.put(right, row, edge('│'));
        }
        self.put(0, 0, edge('┌'));
        self.put(right, 0, edge('┐'));
        self.put(0, bottom, edge('└'));
        self.put(right, bottom, edge('┘'));
    }
}

impl Canvas for TerminalCanvas {
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, width: f32, height: f32) {
        if sprite == Sprite::Background {
            self.draw_border();
            return;
        }

        let (left, right, top, bottom) = self.span(x, y, width, height);
        match sprite {
            Sprite::Bucket => {
                //  \   /
                //  \___/
                for row in top..=bottom {
                    self.put(left, row, Cell { ch: '\\', fg: C_BUCKET });
                    self.put(right, row, Cell { ch: '/', fg: C_BUCKET });
                }
                for col in left + 1..right {
                    self.put(col, bottom, Cell { ch: '_', fg: C_BUCKET });
                }
            }
            Sprite::Raindrop => {
                for row in top..=bottom {
                    for col in left..=right {
                        self.put(col, row, Cell { ch: '░', fg: C_DROP });
                    }
                }
                self.put((left + right) / 2, bottom, Cell { ch: '●', fg: C_DROP });
            }
            Sprite::Heart => self.put(left, top, Cell { ch: '♥', fg: C_HEART }),
            Sprite::Background => {}
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        let col = self.col_of(x);
        let row = self.row_of(y);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { ch, fg: C_TEXT });
        }
    }
}

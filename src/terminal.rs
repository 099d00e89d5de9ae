//! Terminal plumbing for the front end: turning crossterm events into
//! per-frame input, and owning the terminal modes for the session.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use crate::input::{InputSnapshot, Pointer};

/// A key is considered "held" if its last press/repeat event arrived within
/// this long. Covers terminals that don't emit key-release events: OS key
/// repeat runs at 15 Hz or faster, so the window is refreshed before expiry
/// at any frame rate.
pub const HOLD_WINDOW: Duration = Duration::from_millis(133);

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Input ─────────────────────────────────────────────────────────────────────

/// Turns the raw event stream into one `InputSnapshot` per frame.
///
/// Directional keys remember when their last press/repeat arrived; a key is
/// live while that is within `HOLD_WINDOW`. Release events (keyboard
/// enhancement terminals) drop keys immediately. Activation, restart and
/// exit are one-shot and cleared after every snapshot.
#[derive(Debug, Default)]
pub struct InputTracker {
    key_seen: HashMap<KeyCode, Instant>,
    /// Cell under a held mouse button.
    pointer: Option<(u16, u16)>,
    activated: bool,
    restart: bool,
    exit: bool,
}

impl InputTracker {
    pub fn handle(&mut self, event: Event, at: Instant) {
        match event {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                KeyEventKind::Press => {
                    self.key_seen.insert(code, at);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            self.exit = true;
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            self.exit = true;
                        }
                        KeyCode::Enter => {
                            self.activated = true;
                            self.restart = true;
                        }
                        KeyCode::Char(' ') => self.activated = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => self.restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_seen.insert(code, at);
                }
                KeyEventKind::Release => {
                    self.key_seen.remove(&code);
                }
            },
            Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.activated = true;
                    self.pointer = Some((column, row));
                }
                MouseEventKind::Drag(MouseButton::Left) => self.pointer = Some((column, row)),
                MouseEventKind::Up(MouseButton::Left) => self.pointer = None,
                _ => {}
            },
            _ => {}
        }
    }

    pub fn is_held(&self, key: KeyCode, now: Instant) -> bool {
        self.key_seen
            .get(&key)
            .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter().any(|&k| self.is_held(k, now))
    }

    /// `cols` x `field_rows` is the screen area the pointer maps onto.
    pub fn snapshot(&mut self, now: Instant, cols: u16, field_rows: u16) -> InputSnapshot {
        let snapshot = InputSnapshot {
            activated: self.activated,
            pointer: self.pointer.map(|(col, row)| Pointer {
                x: col as f32 + 0.5,
                y: row as f32 + 0.5,
                screen_width: cols as f32,
                screen_height: field_rows as f32,
            }),
            left: self.any_held(&LEFT_KEYS, now),
            right: self.any_held(&RIGHT_KEYS, now),
            restart: self.restart,
            exit: self.exit,
        };

        self.activated = false;
        self.restart = false;
        self.exit = false;
        snapshot
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Owns the terminal while the game runs: alternate screen, hidden cursor,
/// mouse capture and (when supported) key release reporting.
///
/// The guard exists before any setup step runs, so a failed step and a
/// normal exit both go through `Drop`, which undoes everything.
pub struct TerminalSession<W: Write> {
    out: W,
    raw_mode: bool,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalSession<W> {
    /// Raw mode plus full screen setup on `out`.
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::start(out, true)
    }

    /// Screen setup on `out` without touching raw mode.
    pub fn attach(out: W) -> io::Result<Self> {
        Self::start(out, false)
    }

    fn start(out: W, raw_mode: bool) -> io::Result<Self> {
        let mut session = Self { out, raw_mode, keyboard_enhanced: false };
        session.out.execute(terminal::EnterAlternateScreen)?;
        session.out.execute(cursor::Hide)?;
        session.out.execute(EnableMouseCapture)?;

        // Kitty-protocol terminals report key release and repeat; others
        // reject the request and fall back to the hold window.
        session.keyboard_enhanced = session
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(session)
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        let _ = self.out.flush();
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(DisableMouseCapture);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

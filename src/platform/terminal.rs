//! Terminal platform on top of crossterm
//!
//! Terminals deliver key *events*, but the game wants *held* keys. Where the
//! terminal supports keyboard enhancement we get real release events and a
//! key stays held until it is released. Classic terminals only repeat
//! presses, so there a key counts as held while its last press/repeat is at
//! most `hold_window` frames old.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, terminal,
};

use super::{InputSnapshot, InputSource, Presenter};
use crate::renderer::{Frame, TerminalRenderer};

/// Keys that flap / start / restart
pub const JUMP_KEYS: [KeyCode; 3] = [KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('w')];

/// Raw mode + alternate screen for as long as it lives
pub struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal ready (key release events: {})", enhanced);
        Ok(Self { enhanced })
    }

    /// Whether the terminal reports key releases
    pub fn release_events(&self) -> bool {
        self.enhanced
    }

    fn restore(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        if self.enhanced {
            execute!(out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Turns key events into held-key state
#[derive(Debug, Clone)]
pub struct KeyTracker {
    /// Frame each key was last pressed or repeated
    last_seen: HashMap<KeyCode, u64>,
    frame: u64,
    hold_window: u64,
    /// Keys only let go on their release event
    release_events: bool,
}

impl KeyTracker {
    pub fn new(hold_window: u64, release_events: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            hold_window,
            release_events,
        }
    }

    /// Record a key event; returns true if it asks to quit
    pub fn observe(&mut self, key: &KeyEvent) -> bool {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(key.code, self.frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key.code);
            }
        }
        key.kind == KeyEventKind::Press && is_quit(key)
    }

    pub fn is_held(&self, code: &KeyCode) -> bool {
        match self.last_seen.get(code) {
            Some(_) if self.release_events => true,
            Some(&last) => self.frame.saturating_sub(last) <= self.hold_window,
            None => false,
        }
    }

    /// Snapshot for this frame, then move on to the next one
    pub fn end_frame(&mut self, quit: bool) -> InputSnapshot {
        let snapshot = InputSnapshot {
            jump: JUMP_KEYS.iter().any(|k| self.is_held(k)),
            quit,
        };
        self.frame += 1;
        if !self.release_events {
            let (frame, window) = (self.frame, self.hold_window);
            self.last_seen
                .retain(|_, last| frame.saturating_sub(*last) <= window);
        }
        snapshot
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Keyboard input from the terminal event queue
#[derive(Debug)]
pub struct TerminalInput {
    keys: KeyTracker,
}

impl TerminalInput {
    pub fn new(hold_window: u64, release_events: bool) -> Self {
        Self {
            keys: KeyTracker::new(hold_window, release_events),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= self.keys.observe(&key);
            }
        }
        Ok(self.keys.end_frame(quit))
    }
}

/// Draws frames to a terminal writer, following its size
pub struct TerminalScreen<W: Write> {
    out: W,
    renderer: TerminalRenderer,
    size: (u16, u16),
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> io::Result<Self> {
        let size = terminal::size()?;
        Ok(Self::with_size(out, size.0, size.1))
    }

    /// Fixed size, no terminal queries
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            renderer: TerminalRenderer::new(cols, rows),
            size: (cols, rows),
        }
    }
}

impl<W: Write> Presenter for TerminalScreen<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        if let Ok(size) = terminal::size() {
            if size != self.size {
                log::debug!("Terminal resized to {}x{}", size.0, size.1);
                self.size = size;
                self.renderer.resize(size.0, size.1);
            }
        }
        self.renderer.draw(frame, &mut self.out)
    }
}

//! Event source
//!
//! Merges the game clock with key presses into one ordered stream of
//! commands. Everything the reducer needs arrives as an [`Event`]; quitting and
//! terminal resizes are front-end concerns and never reach it.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::settings::Settings;
use crate::sim::Event;

/// Largest clock backlog replayed after a stall; older ticks are dropped
pub const MAX_CATCH_UP: u32 = 8;

/// What the front-end loop should do next
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Feed this event to the reducer
    Game(Event),
    /// Terminal size changed
    Resize(u16, u16),
    /// End the session
    Quit,
}

/// Translate a key press. Releases and repeats of unbound keys yield `None`.
pub fn command_for_key(key: &KeyEvent, step: f32) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let event = match key.code {
        KeyCode::Left => Event::MoveLeft { step },
        KeyCode::Right => Event::MoveRight { step },
        KeyCode::Up => Event::MoveUp { step },
        KeyCode::Down => Event::MoveDown { step },
        KeyCode::Enter => Event::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit);
        }
        _ => return None,
    };
    Some(Command::Game(event))
}

/// Fixed-period tick generator.
///
/// Emits `Tick { elapsed: 0 }` one period after creation, then 1, 2, ... Each
/// overdue period produces its own tick, up to [`MAX_CATCH_UP`].
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
    next_due: Instant,
    count: u64,
}

impl Clock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            count: 0,
        }
    }

    /// Next tick if one is due at `now`
    pub fn poll(&mut self, now: Instant) -> Option<Event> {
        if now < self.next_due {
            return None;
        }

        let behind =
            now.duration_since(self.next_due).as_nanos() / self.interval.as_nanos().max(1);
        if behind > MAX_CATCH_UP as u128 {
            log::warn!("Clock fell {} ticks behind, skipping ahead", behind);
            self.next_due = now;
        }

        let elapsed = self.count;
        self.count += 1;
        self.next_due += self.interval;
        Some(Event::Tick { elapsed })
    }

    /// Time left before the next tick
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Ticks emitted so far
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Source of raw terminal events
pub trait InputQueue {
    /// Wait up to `timeout` for an event; `true` if one can be read
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<event::Event>;
}

/// The process terminal, through crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

impl InputQueue for CrosstermInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<event::Event> {
        event::read()
    }
}

/// Blocking merged stream of clock ticks and terminal input.
///
/// Input already queued when a tick comes due is delivered before that tick,
/// so keys typed during a stall keep their place ahead of the catch-up ticks.
pub struct EventSource<I: InputQueue = CrosstermInput> {
    clock: Clock,
    step: f32,
    input: I,
}

impl EventSource<CrosstermInput> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_input(
            Clock::new(settings.tick_interval(), Instant::now()),
            settings.move_step(),
            CrosstermInput,
        )
    }
}

impl<I: InputQueue> EventSource<I> {
    pub fn with_input(clock: Clock, step: f32, input: I) -> Self {
        Self { clock, step, input }
    }

    /// Wait for the next command, in arrival order
    pub fn next_command(&mut self) -> io::Result<Command> {
        loop {
            let wait = self.clock.until_next(Instant::now());
            if self.input.poll(wait)? {
                match self.input.read()? {
                    event::Event::Key(key) => {
                        if let Some(cmd) = command_for_key(&key, self.step) {
                            return Ok(cmd);
                        }
                    }
                    event::Event::Resize(w, h) => return Ok(Command::Resize(w, h)),
                    _ => {}
                }
                continue;
            }

            if let Some(tick) = self.clock.poll(Instant::now()) {
                return Ok(Command::Game(tick));
            }
        }
    }
}

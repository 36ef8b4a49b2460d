//! Input events & live key state
use crate::clock::{Clock, MonotonicClock};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

/// Without release reporting, a key counts as held for this long after its
/// last press or auto-repeat.  This needs to be longer than the terminal's
/// key repeat interval.
pub(crate) const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// An input event relevant to the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    /// The user asked to close the program
    Close,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

/// Live keyboard state, for level-triggered controls
pub(crate) trait KeyState {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// A source of input events that also tracks which keys are held
pub(crate) trait Input: KeyState {
    /// Return the next pending event, if any, without blocking.  Events that
    /// mean nothing to the game are consumed and reported as `None`.
    fn poll_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// A source of raw terminal events
pub(crate) trait EventSource {
    /// Return the next pending event, if any, without blocking
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Events read from the terminal via crossterm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Option<Event>> {
        if event::poll(Duration::ZERO)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Ask the terminal to report key releases & repeats.  Returns `false` if the
/// terminal does not support this, in which case key state is approximated
/// from presses and auto-repeat.
pub(crate) fn enable_release_reporting() -> io::Result<bool> {
    if crossterm::terminal::supports_keyboard_enhancement()? {
        crossterm::execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Undo [`enable_release_reporting()`]
pub(crate) fn disable_release_reporting() -> io::Result<()> {
    crossterm::execute!(io::stdout(), PopKeyboardEnhancementFlags)
}

/// Terminal input with held-key tracking
#[derive(Clone, Debug)]
pub(crate) struct TerminalInput<S = CrosstermEvents, C = MonotonicClock> {
    source: S,
    clock: C,
    /// When each currently-held key was last pressed or repeated
    held: HashMap<KeyCode, Instant>,
    /// Whether the terminal reports key releases
    release_reporting: bool,
    /// Synthesized events waiting to be returned
    pending: VecDeque<InputEvent>,
}

impl TerminalInput<CrosstermEvents, MonotonicClock> {
    pub(crate) fn new(release_reporting: bool) -> Self {
        TerminalInput::with_source(CrosstermEvents, MonotonicClock, release_reporting)
    }
}

impl<S, C: Clock> TerminalInput<S, C> {
    pub(crate) fn with_source(source: S, clock: C, release_reporting: bool) -> Self {
        TerminalInput {
            source,
            clock,
            held: HashMap::new(),
            release_reporting,
            pending: VecDeque::new(),
        }
    }

    fn translate(&mut self, event: Event, now: Instant) -> Option<InputEvent> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return None;
        };
        if (modifiers, code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return (kind != KeyEventKind::Release).then_some(InputEvent::Close);
        }
        let code = normalize(code);
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self
                .held
                .insert(code, now)
                .is_none()
                .then_some(InputEvent::KeyDown(code)),
            KeyEventKind::Release => {
                let _ = self.held.remove(&code);
                Some(InputEvent::KeyUp(code))
            }
        }
    }

    /// Release keys that have not been pressed or repeated within
    /// [`HOLD_WINDOW`]
    fn expire(&mut self, now: Instant) {
        if self.release_reporting {
            return;
        }
        let released = self
            .held
            .iter()
            .filter(|&(_, &last)| now.saturating_duration_since(last) > HOLD_WINDOW)
            .map(|(&code, _)| code)
            .collect::<Vec<_>>();
        for code in released {
            let _ = self.held.remove(&code);
            self.pending.push_back(InputEvent::KeyUp(code));
        }
    }
}

impl<S: EventSource, C: Clock> Input for TerminalInput<S, C> {
    fn poll_event(&mut self) -> io::Result<Option<InputEvent>> {
        let now = self.clock.now();
        self.expire(now);
        if let Some(ev) = self.pending.pop_front() {
            return Ok(Some(ev));
        }
        Ok(self
            .source
            .next_event()?
            .and_then(|ev| self.translate(ev, now)))
    }
}

impl<S, C: Clock> KeyState for TerminalInput<S, C> {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        let Some(&last) = self.held.get(&normalize(key)) else {
            return false;
        };
        self.release_reporting
            || self.clock.now().saturating_duration_since(last) <= HOLD_WINDOW
    }
}

/// Treat letters the same regardless of case, so that steering still works
/// with Caps Lock on
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

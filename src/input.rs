use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::game::{Action, HeldKeys};

/// Ticks a press keeps a direction held when the terminal cannot report key
/// releases. Key auto-repeat refreshes it while the key stays down.
const HOLD_DECAY_TICKS: u8 = 8;

/// Represents semantic input that can be triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Game(Action),
    /// Leave the application
    Exit,
}

/// Tracks one direction key
#[derive(Debug, Default, Clone, Copy)]
struct HeldKey {
    down: bool,
    /// Remaining ticks for terminals without release events
    decay: u8,
}

impl HeldKey {
    fn press(&mut self) {
        self.down = true;
        self.decay = HOLD_DECAY_TICKS;
    }

    fn release(&mut self) {
        self.down = false;
        self.decay = 0;
    }

    fn is_held(&self, reports_release: bool) -> bool {
        if reports_release {
            self.down
        } else {
            self.decay > 0
        }
    }
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    left: HeldKey,
    right: HeldKey,
    /// Terminal reports key release events (keyboard enhancement enabled)
    reports_release: bool,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            left: HeldKey::default(),
            right: HeldKey::default(),
            reports_release,
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls for all input events without blocking and stores one-shot
    /// actions. Call once per frame before `take_actions`.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(())
    }

    /// Processes a key event and updates held state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            KeyEventKind::Repeat => {
                // Repeats only keep direction keys alive
                self.handle_direction(key_event.code, true);
            }
            KeyEventKind::Release => self.handle_direction(key_event.code, false),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Esc
            || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Exit);
            return;
        }

        let action = match key_event.code {
            KeyCode::Char(' ') => Some(Action::Confirm),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::PauseToggle),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
            code => {
                self.handle_direction(code, true);
                None
            }
        };

        if let Some(action) = action {
            self.oneshot_actions.push(InputAction::Game(action));
        }
    }

    fn handle_direction(&mut self, code: KeyCode, pressed: bool) {
        let (key, opposite) = match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                (&mut self.left, &mut self.right)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                (&mut self.right, &mut self.left)
            }
            _ => return,
        };

        if pressed {
            key.press();
            // Without release events the last direction pressed wins
            if !self.reports_release {
                opposite.release();
            }
        } else {
            key.release();
        }
    }

    /// One-shot actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.oneshot_actions)
    }

    /// Held directions for the coming tick
    pub fn held(&self) -> HeldKeys {
        HeldKeys {
            left: self.left.is_held(self.reports_release),
            right: self.right.is_held(self.reports_release),
        }
    }

    /// Count down press-only holds; call once per simulation tick
    pub fn end_tick(&mut self) {
        for key in [&mut self.left, &mut self.right] {
            key.decay = key.decay.saturating_sub(1);
        }
    }

    /// Forget every held key, e.g. after a restart
    pub fn clear(&mut self) {
        self.left.release();
        self.right.release();
    }
}

#![forbid(unsafe_code)]

//! Keyboard-navigation focus state machine.
//!
//! Tracks which rendered item is logically "active" for arrow navigation.
//! Real document focus stays on the search input the whole time; the
//! active item is a visual highlight only, so screen readers and typing
//! continuity are never interrupted by list navigation.
//!
//! # States and transitions
//!
//! - `Idle → Active(id)`: arrow-down in the search input with no active
//!   item activates the first rendered item. (Pointer-hover activation is
//!   deliberately not wired up; activation is keyboard-only.)
//! - `Active(id) → Active(id')`: arrow up/down within the rendered slice.
//!   Moving past the rendered edge yields [`MoveOutcome::NeedsScroll`];
//!   the caller scrolls the container by one item height, lets the window
//!   recompute reactively, and retries the move.
//! - `Active(id) → Idle`: mouse leaves the list, the input regains focus
//!   outside a programmatic bounce, or `id` is no longer rendered after a
//!   query change ([`FocusNavigator::sync`] stale-id invalidation).
//!
//! The `ignore_blur` guard is an explicit field set only on documented
//! transitions: activation sets it (the programmatic focus bounce to the
//! item element and back must not deactivate), the refocus event clears
//! it.

use tracing::debug;

/// Stable DOM-attachable identifier for an entry's rendered row.
#[must_use]
pub fn specie_link_id(name: &str) -> String {
    format!("specie-link-{name}")
}

/// Navigation direction for arrow movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Focus machine state: either nothing highlighted, or one rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusState {
    /// No active item.
    #[default]
    Idle,
    /// The item with this id is logically highlighted.
    Active(String),
}

/// Result of an arrow-move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The active item changed (or was first activated).
    Moved,
    /// The move runs off the rendered edge: scroll one item height in
    /// this direction, recompute the window, then retry.
    NeedsScroll(Direction),
    /// Nothing to do (e.g. arrow-up while idle, or an empty slice).
    Unchanged,
}

/// The keyboard-navigation state machine.
#[derive(Debug, Clone, Default)]
pub struct FocusNavigator {
    state: FocusState,
    /// Suppresses the deactivation that would otherwise fire when focus
    /// programmatically bounces off an item element and back to the input.
    ignore_blur: bool,
}

impl FocusNavigator {
    /// Start idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FocusState {
        &self.state
    }

    /// The active item id, when any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        match &self.state {
            FocusState::Idle => None,
            FocusState::Active(id) => Some(id),
        }
    }

    /// Whether the given id is the active one.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Whether the blur guard is currently raised.
    #[must_use]
    pub const fn ignores_blur(&self) -> bool {
        self.ignore_blur
    }

    /// Arrow movement over the currently rendered ids.
    pub fn move_focus(&mut self, direction: Direction, rendered: &[&str]) -> MoveOutcome {
        let Some(active) = self.active_id().map(str::to_string) else {
            return match direction {
                Direction::Down => match rendered.first() {
                    Some(first) => {
                        self.activate(first);
                        MoveOutcome::Moved
                    }
                    None => MoveOutcome::Unchanged,
                },
                Direction::Up => MoveOutcome::Unchanged,
            };
        };

        let Some(pos) = rendered.iter().position(|r| *r == active.as_str()) else {
            // Stale id: callers normally sync() first, but never let a
            // missing id wedge the machine.
            self.clear("stale id on move");
            return MoveOutcome::Unchanged;
        };
        match direction {
            Direction::Up if pos == 0 => MoveOutcome::NeedsScroll(Direction::Up),
            Direction::Down if pos + 1 == rendered.len() => {
                MoveOutcome::NeedsScroll(Direction::Down)
            }
            Direction::Up => {
                self.activate(rendered[pos - 1]);
                MoveOutcome::Moved
            }
            Direction::Down => {
                self.activate(rendered[pos + 1]);
                MoveOutcome::Moved
            }
        }
    }

    /// Drop a stale active id: if the item is no longer rendered, fall
    /// back to `Idle`. Call after every window or sequence recomputation.
    pub fn sync(&mut self, rendered: &[&str]) {
        let stale = match &self.state {
            FocusState::Idle => false,
            FocusState::Active(id) => !rendered.iter().any(|r| *r == id.as_str()),
        };
        if stale {
            self.clear("active item left the rendered slice");
        }
    }

    /// Mouse left the list region.
    pub fn on_mouse_leave(&mut self) {
        if matches!(self.state, FocusState::Active(_)) {
            self.clear("mouse left the list");
        }
    }

    /// The search input regained focus. A programmatic bounce (guard
    /// raised) keeps the active item and lowers the guard; any other path
    /// deactivates.
    pub fn on_input_focus_regained(&mut self) {
        if self.ignore_blur {
            self.ignore_blur = false;
        } else if matches!(self.state, FocusState::Active(_)) {
            self.clear("input refocused by user");
        }
    }

    fn activate(&mut self, id: &str) {
        debug!(id, "item activated");
        self.state = FocusState::Active(id.to_string());
        self.ignore_blur = true;
    }

    fn clear(&mut self, reason: &str) {
        debug!(reason, "focus cleared");
        self.state = FocusState::Idle;
    }
}

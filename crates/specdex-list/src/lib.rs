#![forbid(unsafe_code)]

//! The virtualized list engine.
//!
//! Renders only the visible slice of a long, query-derived sequence while
//! keeping scroll position, keyboard focus, and query state mutually
//! consistent:
//!
//! - [`window`] - the O(1) virtual-scroll windowing arithmetic.
//! - [`viewport`] - the injected measurement/scroll provider the engine
//!   depends on instead of any concrete UI toolkit.
//! - [`focus`] - the keyboard-navigation state machine riding on top of
//!   the rendered window.
//! - [`view`] - the composition root wiring codec ⇄ query state ⇄
//!   pipeline ⇄ window ⇄ focus, driven by named events.
//!
//! Everything recomputes synchronously inside event handlers; nothing here
//! spawns tasks or holds locks. Scrolling is O(1) and never re-runs the
//! list pipeline.

pub mod focus;
pub mod view;
pub mod viewport;
pub mod window;

pub use focus::{Direction, FocusNavigator, FocusState, MoveOutcome, specie_link_id};
pub use view::{ListView, NavKey};
pub use viewport::{FixedViewport, Viewport};
pub use window::{WindowConfig, WindowState};

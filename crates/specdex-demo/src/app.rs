#![forbid(unsafe_code)]

//! The interactive browser loop.
//!
//! Owns the terminal session and the pieces the list engine treats as
//! external: the search text being edited, the sort/filter controls, and
//! the detail overlay. Every input event is translated into one of the
//! engine's named event entry points; the engine does the rest.

use crate::cli::Opts;
use crate::render;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use specdex_core::{ElementType, FilterSet, SortKey, Specie, StatKey, TypeSet};
use specdex_list::{FixedViewport, ListView, NavKey, WindowConfig};
use std::io;
use std::sync::mpsc;
use tracing::info;

/// Screen rows above the list (search line + address line).
pub const LIST_TOP: u16 = 2;
/// Screen rows below the list (status line).
pub const LIST_BOTTOM: u16 = 1;

/// Sort keys in Tab-cycle order.
pub const SORT_CYCLE: [SortKey; 10] = [
    SortKey::Relevance,
    SortKey::Name,
    SortKey::Number,
    SortKey::Stat(StatKey::Hp),
    SortKey::Stat(StatKey::Sta),
    SortKey::Stat(StatKey::Spd),
    SortKey::Stat(StatKey::Atk),
    SortKey::Stat(StatKey::Def),
    SortKey::Stat(StatKey::SpAtk),
    SortKey::Stat(StatKey::SpDef),
];

/// UI state living outside the list engine.
pub struct Ui {
    /// The search text as typed (mirrors the engine's query).
    pub search: String,
    /// Index into [`SORT_CYCLE`].
    pub sort_index: usize,
    /// 0 = no filter; `1 + i` = `ElementType::ALL[i]`.
    pub filter_index: usize,
    /// Open detail overlay: the context-preserving link.
    pub detail: Option<String>,
}

impl Ui {
    /// Mirror the decoded initial query state.
    fn from_query(query: &specdex_core::QueryState) -> Self {
        let sort_index = SORT_CYCLE.iter().position(|s| *s == query.sort).unwrap_or(0);
        let filter_index = query
            .filters
            .types
            .types()
            .next()
            .and_then(|ty| ElementType::ALL.iter().position(|t| *t == ty))
            .map_or(0, |i| i + 1);
        Self {
            search: query.search.clone(),
            sort_index,
            filter_index,
            detail: None,
        }
    }

    fn cycle_sort(&mut self, delta: isize) {
        let len = SORT_CYCLE.len() as isize;
        self.sort_index = (self.sort_index as isize + delta).rem_euclid(len) as usize;
    }

    fn cycle_filter(&mut self) {
        self.filter_index = (self.filter_index + 1) % (ElementType::ALL.len() + 1);
    }

    /// The sort key for the current cycle position.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        SORT_CYCLE[self.sort_index]
    }

    /// The filter set for the current cycle position.
    #[must_use]
    pub fn filter_set(&self) -> FilterSet {
        match self.filter_index.checked_sub(1) {
            Some(i) => FilterSet {
                types: TypeSet::of(ElementType::ALL[i]),
            },
            None => FilterSet::none(),
        }
    }

    /// Label for the filter control.
    #[must_use]
    pub fn filter_label(&self) -> &'static str {
        match self.filter_index.checked_sub(1) {
            Some(i) => ElementType::ALL[i].token(),
            None => "all",
        }
    }
}

/// Raw-mode + alternate-screen guard; restores the terminal on drop.
struct TermSession {
    mouse: bool,
}

impl TermSession {
    fn new(mouse: bool) -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        )?;
        if mouse {
            crossterm::execute!(stdout, crossterm::event::EnableMouseCapture)?;
        }
        Ok(Self { mouse })
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        // Restoration is best-effort; the terminal is going away anyway.
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
        }
        let _ = crossterm::execute!(
            stdout,
            crossterm::cursor::Show,
            crossterm::terminal::LeaveAlternateScreen
        );
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn list_rows(rows: u16) -> u32 {
    u32::from(rows.saturating_sub(LIST_TOP + LIST_BOTTOM))
}

/// Run the browser over the given entry snapshot.
pub fn run(entries: &[Specie], opts: &Opts) -> io::Result<()> {
    let _session = TermSession::new(opts.mouse)?;
    let mut size = crossterm::terminal::size()?;

    // Navigation is an injected side effect: the engine hands us the
    // context-preserving link, the app decides what opening it means.
    let (tx, rx) = mpsc::channel::<String>();

    let mut view = ListView::new(
        entries,
        FixedViewport::new(list_rows(size.1)),
        WindowConfig::new(opts.item_height),
    )
    .with_initial_address(&opts.address)
    .with_on_navigate(move |link| {
        let _ = tx.send(link.to_string());
    });

    let mut ui = Ui::from_query(view.query());
    let mut stdout = io::stdout();

    loop {
        render::draw(&mut stdout, &view, &ui, size)?;

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if ui.detail.is_some() {
                    // Any key returns from the detail view; the address
                    // still holds the list context.
                    ui.detail = None;
                    continue;
                }
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if ctrl => break,
                    KeyCode::Char('t') if ctrl => {
                        ui.cycle_filter();
                        view.set_filters(ui.filter_set());
                    }
                    KeyCode::Tab => {
                        ui.cycle_sort(1);
                        view.set_sort(ui.sort_key());
                    }
                    KeyCode::BackTab => {
                        ui.cycle_sort(-1);
                        view.set_sort(ui.sort_key());
                    }
                    KeyCode::Up => view.on_key(NavKey::Up),
                    KeyCode::Down => view.on_key(NavKey::Down),
                    KeyCode::PageUp => view.on_key(NavKey::PageUp),
                    KeyCode::PageDown => view.on_key(NavKey::PageDown),
                    KeyCode::Home => view.on_key(NavKey::Home),
                    KeyCode::End => view.on_key(NavKey::End),
                    KeyCode::Enter => view.on_key(NavKey::Enter),
                    KeyCode::Backspace => {
                        ui.search.pop();
                        view.set_search(ui.search.clone());
                    }
                    KeyCode::Char(c) if !ctrl => {
                        ui.search.push(c);
                        view.set_search(ui.search.clone());
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Moved) && mouse.row < LIST_TOP =>
            {
                view.on_mouse_leave();
            }
            Event::Resize(cols, rows) => {
                size = (cols, rows);
                view.viewport_mut().set_container_height(list_rows(rows));
                view.on_resize();
            }
            _ => {}
        }

        while let Ok(link) = rx.try_recv() {
            info!(link = %link, "opening entry detail");
            ui.detail = Some(link);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specdex_core::QueryState;

    #[test]
    fn sort_cycle_wraps_both_ways() {
        let mut ui = Ui::from_query(&QueryState::new());
        assert_eq!(ui.sort_key(), SortKey::Relevance);
        ui.cycle_sort(-1);
        assert_eq!(ui.sort_key(), SortKey::Stat(StatKey::SpDef));
        ui.cycle_sort(1);
        assert_eq!(ui.sort_key(), SortKey::Relevance);
    }

    #[test]
    fn filter_cycle_returns_to_all() {
        let mut ui = Ui::from_query(&QueryState::new());
        assert_eq!(ui.filter_label(), "all");
        for _ in 0..ElementType::ALL.len() {
            ui.cycle_filter();
            assert!(!ui.filter_set().is_empty());
        }
        ui.cycle_filter();
        assert_eq!(ui.filter_label(), "all");
        assert!(ui.filter_set().is_empty());
    }

    #[test]
    fn ui_mirrors_decoded_address() {
        let query = specdex_query::decode("?q=pig&sort=atk&types=wind");
        let ui = Ui::from_query(&query);
        assert_eq!(ui.search, "pig");
        assert_eq!(ui.sort_key(), SortKey::Stat(StatKey::Atk));
        assert_eq!(ui.filter_label(), "wind");
    }
}

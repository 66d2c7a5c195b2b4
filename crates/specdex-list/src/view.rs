#![forbid(unsafe_code)]

//! The list view composition root.
//!
//! Owns the query state, the derived sequence, the window, and the focus
//! machine; wires them to an injected [`Viewport`] and exposes one entry
//! point per named event. Each entry point documents its cost. The key
//! performance invariant is that scroll and resize events stay O(1) and
//! never re-run the list pipeline.
//!
//! | event                                  | cost        |
//! |----------------------------------------|-------------|
//! | [`ListView::on_scroll`] / [`ListView::on_resize`] | O(1) |
//! | [`ListView::set_search`] / [`ListView::set_sort`] / [`ListView::set_filters`] | O(n log n) |
//! | [`ListView::on_key`]                   | O(rendered) |
//! | [`ListView::on_mouse_leave`] / [`ListView::on_input_focus_regained`] | O(1) |
//!
//! Cross-cutting side effects (address sync, detail navigation) are
//! injected callbacks, not globals: the root calls them fire-and-forget
//! with no acknowledgment required.

use crate::focus::{Direction, FocusNavigator, MoveOutcome, specie_link_id};
use crate::viewport::Viewport;
use crate::window::{WindowConfig, WindowState};
use rustc_hash::FxHashMap;
use specdex_core::{FilterSet, QueryState, SortKey, Specie};
use specdex_query::{minimal_query_url, process};
use tracing::debug;

/// Keyboard events the list understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Activate/move the highlight up.
    Up,
    /// Activate/move the highlight down.
    Down,
    /// Scroll one container height up (highlight follows the stale rule).
    PageUp,
    /// Scroll one container height down.
    PageDown,
    /// Jump to the top of the list.
    Home,
    /// Jump to the bottom of the list.
    End,
    /// Navigate to the active entry's detail view.
    Enter,
}

/// Injected side-effect function (address sync, navigation).
type Hook<'a> = Box<dyn FnMut(&str) + 'a>;

/// Composition root: query state ⇄ pipeline ⇄ window ⇄ focus ⇄ viewport.
pub struct ListView<'a, V: Viewport> {
    /// Read-only entry snapshot for this view's lifetime.
    entries: &'a [Specie],
    viewport: V,
    config: WindowConfig,
    query: QueryState,
    /// The ordered, filtered sequence (references into `entries`).
    sequence: Vec<&'a Specie>,
    /// Rendered-row ids, aligned 1:1 with `sequence`.
    ids: Vec<String>,
    /// id → sequence index, for focus-driven lookups.
    index_by_id: FxHashMap<String, usize>,
    window: WindowState,
    focus: FocusNavigator,
    /// Cached minimal query url (`""` or `"?..."`).
    address: String,
    on_navigate: Option<Hook<'a>>,
    on_address_change: Option<Hook<'a>>,
}

fn rendered_ids(ids: &[String], range: std::ops::Range<usize>) -> Vec<&str> {
    ids[range].iter().map(String::as_str).collect()
}

impl<'a, V: Viewport> ListView<'a, V> {
    /// Build a view over the entry snapshot with the default query.
    #[must_use]
    pub fn new(entries: &'a [Specie], viewport: V, config: WindowConfig) -> Self {
        let mut view = Self {
            entries,
            viewport,
            config,
            query: QueryState::new(),
            sequence: Vec::new(),
            ids: Vec::new(),
            index_by_id: FxHashMap::default(),
            window: WindowState::default(),
            focus: FocusNavigator::new(),
            address: String::new(),
            on_navigate: None,
            on_address_change: None,
        };
        view.reprocess();
        view
    }

    /// Decode the mount address into the initial query state (builder).
    #[must_use]
    pub fn with_initial_address(mut self, raw: &str) -> Self {
        self.query = specdex_query::decode(raw);
        self.reprocess();
        self
    }

    /// Inject the navigation side effect, invoked with the detail link
    /// when the active entry is chosen (builder).
    #[must_use]
    pub fn with_on_navigate(mut self, hook: impl FnMut(&str) + 'a) -> Self {
        self.on_navigate = Some(Box::new(hook));
        self
    }

    /// Inject the address-sync side effect, invoked with the minimal
    /// query url after every query mutation (builder).
    #[must_use]
    pub fn with_on_address_change(mut self, hook: impl FnMut(&str) + 'a) -> Self {
        self.on_address_change = Some(Box::new(hook));
        self
    }

    // ── Query events (O(n log n)) ──────────────────────────────────────

    /// Replace the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.query.search != search {
            self.query.search = search;
            self.reprocess();
        }
    }

    /// Replace the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        if self.query.sort != sort {
            self.query.sort = sort;
            self.reprocess();
        }
    }

    /// Replace the filter set.
    pub fn set_filters(&mut self, filters: FilterSet) {
        if self.query.filters != filters {
            self.query.filters = filters;
            self.reprocess();
        }
    }

    // ── Geometry events (O(1)) ─────────────────────────────────────────

    /// The container scrolled: re-clamp and recompute the window.
    pub fn on_scroll(&mut self) {
        self.clamp_scroll();
        self.recompute_window();
    }

    /// The container was resized: identical recomputation path.
    pub fn on_resize(&mut self) {
        self.on_scroll();
    }

    // ── Focus events ───────────────────────────────────────────────────

    /// Keyboard input routed from the search input.
    pub fn on_key(&mut self, key: NavKey) {
        match key {
            NavKey::Up => self.move_focus(Direction::Up),
            NavKey::Down => self.move_focus(Direction::Down),
            NavKey::PageUp => {
                let page = self.viewport.container_height().min(i32::MAX as u32) as i32;
                self.viewport.scroll_by(-page);
                self.on_scroll();
            }
            NavKey::PageDown => {
                let page = self.viewport.container_height().min(i32::MAX as u32) as i32;
                self.viewport.scroll_by(page);
                self.on_scroll();
            }
            NavKey::Home => {
                self.viewport.scroll_to(0);
                self.on_scroll();
            }
            NavKey::End => {
                let max = self
                    .config
                    .max_scroll_top(self.sequence.len(), self.viewport.container_height());
                self.viewport.scroll_to(max);
                self.on_scroll();
            }
            NavKey::Enter => self.navigate_active(),
        }
    }

    /// The pointer left the list region.
    pub fn on_mouse_leave(&mut self) {
        self.focus.on_mouse_leave();
    }

    /// The search input regained focus (any path; the navigator's
    /// `ignore_blur` guard distinguishes programmatic bounces).
    pub fn on_input_focus_regained(&mut self) {
        self.focus.on_input_focus_regained();
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// The current query state.
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The windowing configuration.
    #[must_use]
    pub fn config(&self) -> WindowConfig {
        self.config
    }

    /// Size of the unfiltered entry snapshot.
    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.entries.len()
    }

    /// The current window (spacer heights and materialized range).
    #[must_use]
    pub fn window(&self) -> WindowState {
        self.window
    }

    /// The minimal query url for the current state (`""` or `"?..."`).
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Length of the processed sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the processed sequence is empty (render the empty state).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The materialized slice: `(entry, row id)` pairs in render order.
    pub fn rendered<'s>(&'s self) -> impl Iterator<Item = (&'a Specie, &'s str)> + 's {
        self.window
            .range()
            .map(|i| (self.sequence[i], self.ids[i].as_str()))
    }

    /// The active row id, when any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.focus.active_id()
    }

    /// The active entry, when any.
    #[must_use]
    pub fn active_entry(&self) -> Option<&'a Specie> {
        let idx = *self.index_by_id.get(self.focus.active_id()?)?;
        Some(self.sequence[idx])
    }

    /// Detail link for an entry, preserving the current list context.
    #[must_use]
    pub fn detail_link(&self, specie: &Specie) -> String {
        format!("/species/{}{}", specie.name, self.address)
    }

    /// The injected viewport.
    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable access for the embedder (e.g. resize measurements). Call
    /// [`ListView::on_scroll`] or [`ListView::on_resize`] afterwards.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Re-derive sequence, ids, address, and window from the query state.
    fn reprocess(&mut self) {
        self.sequence = process(self.entries, &self.query);
        self.ids = self
            .sequence
            .iter()
            .map(|s| specie_link_id(&s.name))
            .collect();
        self.index_by_id = self
            .ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        self.address = minimal_query_url(&self.query);
        self.clamp_scroll();
        self.recompute_window();
        debug!(
            kept = self.sequence.len(),
            address = %self.address,
            "query state changed"
        );
        if let Some(hook) = self.on_address_change.as_mut() {
            hook(&self.address);
        }
    }

    /// Keep the scroll offset inside the content (the sequence may have
    /// shrunk under it).
    fn clamp_scroll(&mut self) {
        let max = self
            .config
            .max_scroll_top(self.sequence.len(), self.viewport.container_height());
        if self.viewport.scroll_top() > max {
            self.viewport.scroll_to(max);
        }
    }

    /// O(1) window recomputation plus stale-focus invalidation.
    fn recompute_window(&mut self) {
        self.window = self.config.compute(
            self.viewport.scroll_top(),
            self.viewport.container_height(),
            self.sequence.len(),
        );
        let ids = rendered_ids(&self.ids, self.window.range());
        self.focus.sync(&ids);
    }

    /// Arrow movement; an edge move scrolls one item height first so the
    /// target becomes rendered, then retries once.
    fn move_focus(&mut self, direction: Direction) {
        let outcome = {
            let ids = rendered_ids(&self.ids, self.window.range());
            self.focus.move_focus(direction, &ids)
        };
        if let MoveOutcome::NeedsScroll(dir) = outcome {
            let step = self.config.item_height() as i32;
            self.viewport.scroll_by(match dir {
                Direction::Up => -step,
                Direction::Down => step,
            });
            self.on_scroll();
            let ids = rendered_ids(&self.ids, self.window.range());
            // A second edge outcome means the hard end of the sequence.
            let _ = self.focus.move_focus(direction, &ids);
        }
    }

    /// Fire the navigation side effect for the active entry.
    fn navigate_active(&mut self) {
        let Some(idx) = self
            .focus
            .active_id()
            .and_then(|id| self.index_by_id.get(id).copied())
        else {
            return;
        };
        let link = self.detail_link(self.sequence[idx]);
        debug!(link = %link, "navigating to entry detail");
        if let Some(hook) = self.on_navigate.as_mut() {
            hook(&link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::FixedViewport;
    use specdex_core::{ElementType, StatKey, Stats, TypeSet};
    use std::cell::RefCell;

    fn catalog(len: u32) -> Vec<Specie> {
        (0..len)
            .map(|i| {
                let ty = if i % 2 == 0 {
                    ElementType::Wind
                } else {
                    ElementType::Fire
                };
                Specie::new(format!("specie{i:03}"), i + 1).with_types([ty])
            })
            .collect()
    }

    /// h=1, container=3, overscan=0: a tight window for edge tests.
    fn tight_view(entries: &[Specie]) -> ListView<'_, FixedViewport> {
        ListView::new(
            entries,
            FixedViewport::new(3),
            WindowConfig::new(1).with_overscan(0),
        )
    }

    #[test]
    fn initial_address_decodes_and_reencodes() {
        let entries = catalog(10);
        let view = ListView::new(&entries, FixedViewport::new(480), WindowConfig::new(96))
            .with_initial_address("?q=specie&sort=atk&types=wind");
        assert_eq!(view.query().search, "specie");
        assert_eq!(view.query().sort, SortKey::Stat(StatKey::Atk));
        assert_eq!(view.address(), "?q=specie&sort=atk&types=wind");
    }

    #[test]
    fn address_syncs_on_query_change_but_not_on_scroll() {
        let entries = catalog(100);
        let addresses = RefCell::new(Vec::new());
        let mut view = ListView::new(&entries, FixedViewport::new(10), WindowConfig::new(1))
            .with_on_address_change(|a| addresses.borrow_mut().push(a.to_string()));

        view.set_search("specie01");
        assert_eq!(addresses.borrow().as_slice(), ["?q=specie01"]);
        assert_eq!(view.address(), "?q=specie01");

        view.viewport_mut().scroll_by(20);
        view.on_scroll();
        view.on_resize();
        // Scrolling and resizing never touch the query or the address.
        assert_eq!(addresses.borrow().len(), 1);

        view.set_search("");
        assert_eq!(addresses.borrow().as_slice(), ["?q=specie01", ""]);
    }

    #[test]
    fn rendered_slice_tracks_scroll() {
        let entries = catalog(100);
        let mut view = tight_view(&entries);
        let first: Vec<_> = view.rendered().map(|(s, _)| s.name.clone()).collect();
        assert_eq!(first, ["specie000", "specie001", "specie002"]);

        view.viewport_mut().scroll_by(5);
        view.on_scroll();
        let shifted: Vec<_> = view.rendered().map(|(s, _)| s.name.clone()).collect();
        assert_eq!(shifted, ["specie005", "specie006", "specie007"]);
        assert_eq!(view.window().leading_height, 5);
        assert_eq!(view.window().total_height, 100);
    }

    #[test]
    fn arrow_navigation_scrolls_past_the_rendered_edge() {
        let entries = catalog(10);
        let mut view = tight_view(&entries);

        view.on_key(NavKey::Down);
        assert_eq!(view.active_id(), Some("specie-link-specie000"));

        // Walk to the rendered edge and over it.
        view.on_key(NavKey::Down);
        view.on_key(NavKey::Down);
        assert_eq!(view.active_id(), Some("specie-link-specie002"));
        assert_eq!(view.viewport().scroll_top(), 0);

        view.on_key(NavKey::Down);
        assert_eq!(view.viewport().scroll_top(), 1);
        assert_eq!(view.active_id(), Some("specie-link-specie003"));
    }

    #[test]
    fn arrow_up_at_list_start_keeps_first_item_active() {
        let entries = catalog(10);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::Down);
        view.on_key(NavKey::Up);
        assert_eq!(view.active_id(), Some("specie-link-specie000"));
        assert_eq!(view.viewport().scroll_top(), 0);
    }

    #[test]
    fn arrow_down_at_list_end_keeps_last_item_active() {
        let entries = catalog(5);
        let mut view = tight_view(&entries);
        for _ in 0..10 {
            view.on_key(NavKey::Down);
        }
        assert_eq!(view.active_id(), Some("specie-link-specie004"));
        // max scroll: 5 items * h1 - container 3.
        assert_eq!(view.viewport().scroll_top(), 2);
    }

    #[test]
    fn filter_removing_active_entry_idles_focus() {
        let entries = catalog(10);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::Down);
        assert_eq!(view.active_id(), Some("specie-link-specie000"));

        // specie000 is Wind; a Fire filter removes it from the sequence.
        view.set_filters(FilterSet {
            types: TypeSet::of(ElementType::Fire),
        });
        assert_eq!(view.active_id(), None);
        assert!(view.rendered().all(|(s, _)| s.has_type(ElementType::Fire)));
    }

    #[test]
    fn enter_navigates_with_context_preserving_link() {
        let entries = catalog(10);
        let links = RefCell::new(Vec::new());
        let mut view = tight_view(&entries)
            .with_on_navigate(|link| links.borrow_mut().push(link.to_string()));

        view.on_key(NavKey::Enter);
        assert!(links.borrow().is_empty(), "no active item, no navigation");

        view.set_search("specie00");
        view.on_key(NavKey::Down);
        view.on_key(NavKey::Enter);
        assert_eq!(links.borrow().as_slice(), ["/species/specie000?q=specie00"]);
    }

    #[test]
    fn unmeasured_container_renders_nothing_until_resize() {
        let entries = catalog(10);
        let mut view = ListView::new(
            &entries,
            FixedViewport::new(0),
            WindowConfig::new(1).with_overscan(0),
        );
        assert_eq!(view.rendered().count(), 0);
        assert!(!view.is_empty(), "sequence exists, window is just empty");

        view.viewport_mut().set_container_height(4);
        view.on_resize();
        assert_eq!(view.rendered().count(), 4);
    }

    #[test]
    fn shrinking_filter_reclamps_scroll() {
        let entries = catalog(100);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::End);
        assert_eq!(view.viewport().scroll_top(), 97);

        // Fire species only: 50 remain, max scroll becomes 47.
        view.set_filters(FilterSet {
            types: TypeSet::of(ElementType::Fire),
        });
        assert_eq!(view.len(), 50);
        assert_eq!(view.viewport().scroll_top(), 47);
        let last: Vec<_> = view.rendered().map(|(s, _)| s.name.clone()).collect();
        assert_eq!(last, ["specie095", "specie097", "specie099"]);
    }

    #[test]
    fn page_and_home_keys_move_the_window_only() {
        let entries = catalog(100);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::Down);
        view.on_key(NavKey::PageDown);
        assert_eq!(view.viewport().scroll_top(), 3);
        // The previously active item left the window: stale rule applies.
        assert_eq!(view.active_id(), None);

        view.on_key(NavKey::PageUp);
        assert_eq!(view.viewport().scroll_top(), 0);
        view.on_key(NavKey::End);
        view.on_key(NavKey::Home);
        assert_eq!(view.viewport().scroll_top(), 0);
    }

    #[test]
    fn mouse_leave_and_user_refocus_deactivate() {
        let entries = catalog(10);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::Down);
        view.on_mouse_leave();
        assert_eq!(view.active_id(), None);

        view.on_key(NavKey::Down);
        // Programmatic bounce first, then a user-initiated refocus.
        view.on_input_focus_regained();
        assert_eq!(view.active_id(), Some("specie-link-specie000"));
        view.on_input_focus_regained();
        assert_eq!(view.active_id(), None);
    }

    #[test]
    fn empty_catalog_is_inert() {
        let entries: Vec<Specie> = Vec::new();
        let mut view = tight_view(&entries);
        assert!(view.is_empty());
        view.on_key(NavKey::Down);
        view.on_key(NavKey::End);
        assert_eq!(view.active_id(), None);
        assert_eq!(view.window(), WindowState::default());
    }

    #[test]
    fn active_entry_resolves_through_ids() {
        let entries = catalog(10);
        let mut view = tight_view(&entries);
        view.on_key(NavKey::Down);
        view.on_key(NavKey::Down);
        let active = view.active_entry().unwrap();
        assert_eq!(active.name, "specie001");
        assert_eq!(view.detail_link(active), "/species/specie001");
    }

    #[test]
    fn stat_sort_with_stats_orders_rendered_rows() {
        let entries = vec![
            Specie::new("A", 1).with_stats(Stats { atk: 50, ..Stats::default() }),
            Specie::new("B", 2).with_stats(Stats { atk: 90, ..Stats::default() }),
        ];
        let mut view = ListView::new(&entries, FixedViewport::new(10), WindowConfig::new(1));
        view.set_sort(SortKey::Stat(StatKey::Atk));
        let names: Vec<_> = view.rendered().map(|(s, _)| s.name.clone()).collect();
        assert_eq!(names, ["B", "A"]);
    }
}

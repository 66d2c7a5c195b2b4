#![forbid(unsafe_code)]

//! Property tests for the windowing arithmetic and the focus containment
//! invariant.
//!
//! Window contract: spacers plus rendered rows cover the content height
//! exactly, the rendered count is bounded independently of the sequence
//! length, and recomputation is idempotent. Focus contract: after any
//! event sequence, an active item is always a member of the rendered
//! slice.

use proptest::prelude::*;
use specdex_core::{ElementType, FilterSet, Specie, TypeSet};
use specdex_list::{FixedViewport, ListView, NavKey, Viewport, WindowConfig};

proptest! {
    /// `leading + rendered + trailing == total == len * h`, with no gaps
    /// or overlaps, for any geometry.
    #[test]
    fn spacers_and_rendered_rows_cover_content_exactly(
        h in 1u32..200,
        overscan in 0usize..8,
        len in 0usize..5_000,
        scroll_top in 0u32..1_000_000,
        container in 0u32..2_000,
    ) {
        let cfg = WindowConfig::new(h).with_overscan(overscan);
        let w = cfg.compute(scroll_top, container, len);

        prop_assert!(w.first_index <= w.last_index);
        prop_assert!(w.last_index <= len);
        prop_assert_eq!(w.total_height, len as u32 * h);
        prop_assert_eq!(
            w.leading_height + w.rendered_len() as u32 * h + w.trailing_height,
            w.total_height
        );
        prop_assert_eq!(w.leading_height, w.first_index as u32 * h);
        prop_assert_eq!(w.trailing_height, (len - w.last_index) as u32 * h);
    }

    /// Rendered count ≤ ceil(container/h) + 2·overscan (+1 when the
    /// offset straddles a row boundary), independent of `len`.
    #[test]
    fn rendered_count_is_bounded_independent_of_len(
        h in 1u32..200,
        overscan in 0usize..8,
        len in 0usize..100_000,
        scroll_top in 0u32..10_000_000,
        container in 0u32..2_000,
    ) {
        let cfg = WindowConfig::new(h).with_overscan(overscan);
        let w = cfg.compute(scroll_top, container, len);
        let bound = container.div_ceil(h) as usize + 2 * overscan + 1;
        prop_assert!(
            w.rendered_len() <= bound,
            "rendered {} > bound {}", w.rendered_len(), bound
        );
    }

    /// Recomputation carries no state: same inputs, same output.
    #[test]
    fn recompute_is_idempotent(
        h in 1u32..100,
        overscan in 0usize..4,
        len in 0usize..2_000,
        scroll_top in 0u32..500_000,
        container in 0u32..1_000,
    ) {
        let cfg = WindowConfig::new(h).with_overscan(overscan);
        prop_assert_eq!(
            cfg.compute(scroll_top, container, len),
            cfg.compute(scroll_top, container, len)
        );
    }

    /// Zero-height containers and empty sequences yield empty ranges,
    /// never errors.
    #[test]
    fn degenerate_geometry_is_empty_not_an_error(
        h in 1u32..100,
        len in 0usize..1_000,
        scroll_top in 0u32..100_000,
    ) {
        let cfg = WindowConfig::new(h);
        prop_assert!(cfg.compute(scroll_top, 0, len).is_empty());
        prop_assert!(cfg.compute(scroll_top, 480, 0).is_empty());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus containment under random event sequences
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Event {
    Key(NavKey),
    Scroll(i32),
    Search(String),
    Filter(bool),
    MouseLeave,
    Refocus,
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        prop_oneof![
            Just(NavKey::Up),
            Just(NavKey::Down),
            Just(NavKey::PageUp),
            Just(NavKey::PageDown),
            Just(NavKey::Home),
            Just(NavKey::End),
        ]
        .prop_map(Event::Key),
        (-40i32..40).prop_map(Event::Scroll),
        "[a-e]{0,3}".prop_map(Event::Search),
        any::<bool>().prop_map(Event::Filter),
        Just(Event::MouseLeave),
        Just(Event::Refocus),
    ]
}

proptest! {
    /// After every event, an active item id is present in the rendered
    /// slice (otherwise the machine is idle).
    #[test]
    fn focus_is_always_contained_in_the_rendered_slice(
        events in proptest::collection::vec(event_strategy(), 0..60),
    ) {
        let entries: Vec<Specie> = (0..40)
            .map(|i| {
                let ty = if i % 3 == 0 { ElementType::Fire } else { ElementType::Water };
                Specie::new(format!("{}{i:02}", ["abble", "bodd", "cree", "dill", "eska"][i % 5]), i as u32 + 1)
                    .with_types([ty])
            })
            .collect();
        let mut view = ListView::new(
            &entries,
            FixedViewport::new(5),
            WindowConfig::new(1).with_overscan(1),
        );

        for event in events {
            match event {
                Event::Key(key) => view.on_key(key),
                Event::Scroll(delta) => {
                    view.viewport_mut().scroll_by(delta);
                    view.on_scroll();
                }
                Event::Search(ref text) => view.set_search(text.clone()),
                Event::Filter(on) => view.set_filters(FilterSet {
                    types: if on { TypeSet::of(ElementType::Fire) } else { TypeSet::empty() },
                }),
                Event::MouseLeave => view.on_mouse_leave(),
                Event::Refocus => view.on_input_focus_regained(),
            }

            if let Some(active) = view.active_id() {
                let rendered: Vec<&str> = view.rendered().map(|(_, id)| id).collect();
                prop_assert!(
                    rendered.contains(&active),
                    "active {active:?} not rendered after {event:?}"
                );
            }
        }
    }
}

#![forbid(unsafe_code)]

//! Virtual-scroll windowing arithmetic.
//!
//! Given a scroll offset, a container height, a fixed per-item height and
//! the sequence length, compute the minimal contiguous index range to
//! materialize plus the spacer heights that stand in for everything else.
//!
//! The computation is pure and idempotent: it carries no state between
//! calls besides the raw scroll offset, which is owned by the scroll
//! container. It is safe to re-run on every scroll/resize/sequence event
//! without accumulating drift, and it is O(1): no scan of the sequence.
//!
//! # Invariants
//!
//! 1. `leading + rendered + trailing == total == len * item_height`.
//! 2. Rendered length ≤ `ceil(container / item_height) + 2 * overscan + 1`
//!    (the +1 covers an offset straddling a row boundary), independent of
//!    `len`.
//! 3. `container_height == 0` (unmeasured) ⇒ empty range, not an error.

use tracing::trace;

/// Windowing parameters: fixed item height and overscan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Height of every item, in layout units. Always ≥ 1.
    item_height: u32,
    /// Extra items materialized above and below the visible range to
    /// reduce pop-in during fast scroll. Non-negative by type.
    overscan: usize,
}

impl WindowConfig {
    /// Create a config with the given item height (clamped to ≥ 1) and the
    /// default overscan of 2.
    #[must_use]
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height: item_height.max(1),
            overscan: 2,
        }
    }

    /// Set the overscan count (builder).
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// The per-item height.
    #[must_use]
    pub const fn item_height(&self) -> u32 {
        self.item_height
    }

    /// The overscan count.
    #[must_use]
    pub const fn overscan(&self) -> usize {
        self.overscan
    }

    /// Total content height for a sequence of `len` items.
    #[must_use]
    pub fn total_height(&self, len: usize) -> u32 {
        (len as u32).saturating_mul(self.item_height)
    }

    /// Largest meaningful scroll offset for the given content and
    /// container. Offsets beyond this are clamped by the caller.
    #[must_use]
    pub fn max_scroll_top(&self, len: usize, container_height: u32) -> u32 {
        self.total_height(len).saturating_sub(container_height)
    }

    /// Compute the window for the current frame.
    #[must_use]
    pub fn compute(&self, scroll_top: u32, container_height: u32, len: usize) -> WindowState {
        let h = self.item_height;
        let total_height = self.total_height(len);

        if len == 0 || container_height == 0 {
            // Empty sequence or unmeasured container: nothing materializes.
            // The spacer math still covers the full content height so the
            // scroll geometry stays consistent.
            return WindowState {
                first_index: 0,
                last_index: 0,
                leading_height: 0,
                trailing_height: total_height,
                total_height,
            };
        }

        let first_visible = (scroll_top / h) as usize;
        let last_visible = scroll_top.saturating_add(container_height).div_ceil(h) as usize;

        let last_index = last_visible.saturating_add(self.overscan).min(len);
        let first_index = first_visible.saturating_sub(self.overscan).min(last_index);

        let state = WindowState {
            first_index,
            last_index,
            leading_height: (first_index as u32).saturating_mul(h),
            trailing_height: ((len - last_index) as u32).saturating_mul(h),
            total_height,
        };
        trace!(
            scroll_top,
            container_height,
            len,
            first = state.first_index,
            last = state.last_index,
            "window recomputed"
        );
        state
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The materialized window for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    /// First materialized index (inclusive).
    pub first_index: usize,
    /// One past the last materialized index.
    pub last_index: usize,
    /// Height of the spacer standing in for items before the window.
    pub leading_height: u32,
    /// Height of the spacer standing in for items after the window.
    pub trailing_height: u32,
    /// Full content height (`len * item_height`).
    pub total_height: u32,
}

impl WindowState {
    /// The materialized index range.
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.first_index..self.last_index
    }

    /// Number of materialized items.
    #[must_use]
    pub const fn rendered_len(&self) -> usize {
        self.last_index - self.first_index
    }

    /// Whether nothing is materialized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_index == self.last_index
    }

    /// Height of the materialized items.
    #[must_use]
    pub fn rendered_height(&self) -> u32 {
        self.total_height - self.leading_height - self.trailing_height
    }
}

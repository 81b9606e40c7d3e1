// SPDX-License-Identifier: MPL-2.0
//! Viewport visibility of the notification region.
//!
//! The region counts as visible when its vertical midpoint lies inside the
//! scrolled window and, for regions inside a modal dialog, inside the
//! dialog's content area as well. Midpoints exactly on an edge are visible.

/// Vertical extent in page coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VerticalSpan {
    pub top: f32,
    pub height: f32,
}

impl VerticalSpan {
    #[must_use]
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(self) -> f32 {
        self.top + self.height
    }

    #[must_use]
    pub fn midpoint(self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Returns whether `y` lies within the span, edges included.
    #[must_use]
    pub fn contains(self, y: f32) -> bool {
        !(y < self.top || y > self.bottom())
    }
}

/// Geometry needed to judge visibility, captured after rendering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSnapshot {
    /// The notification region.
    pub element: VerticalSpan,
    /// Window scroll offset and height.
    pub window: VerticalSpan,
    /// Content area of the enclosing modal dialog, if any.
    pub modal: Option<VerticalSpan>,
}

/// Supplies the current layout of a notification region.
pub trait LayoutProbe {
    fn snapshot(&self) -> LayoutSnapshot;
}

impl LayoutProbe for LayoutSnapshot {
    fn snapshot(&self) -> LayoutSnapshot {
        *self
    }
}

impl<F> LayoutProbe for F
where
    F: Fn() -> LayoutSnapshot,
{
    fn snapshot(&self) -> LayoutSnapshot {
        self()
    }
}

/// Returns whether the region is visible without scrolling.
#[must_use]
pub fn visible_without_scrolling(layout: &LayoutSnapshot) -> bool {
    let middle = layout.element.midpoint();

    // Modals scroll on their own: the window check alone is not enough.
    if let Some(modal) = layout.modal {
        if !modal.contains(middle) {
            return false;
        }
    }

    layout.window.contains(middle)
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip placement: keep the overlay inside the visible viewport.
//!
//! Coordinates follow the page model: anchors are client (viewport) coordinates
//! while the returned origin is in document coordinates, i.e. it already
//! includes the scroll offset.
//!
//! ## Algorithm
//!
//! 1. Start at the anchor plus [`POINTER_OFFSET`] on both axes, shifted by the scroll offset.
//! 2. If the content is wider than `max_width`, constrain it and re-measure its
//!    height at the narrower width.
//! 3. If the box overflows the right edge (with margin), align its right edge
//!    to `visible right - margin`.
//! 4. If it overflows the bottom edge, flip it above the anchor
//!    ([`FLIP_GAP`] above); if that crosses the visible top, pin it to the top.
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use understory_tooltip::position::{solve, AnchorPoint, Viewport};
//!
//! let viewport = Viewport::new(Size::new(1024.0, 768.0), Vec2::ZERO);
//! let placement = solve(
//!     AnchorPoint::Pointer(Point::new(500.0, 500.0)),
//!     Size::new(120.0, 20.0),
//!     |_| unreachable!("content fits"),
//!     &viewport,
//!     300.0,
//!     4.0,
//! );
//! assert_eq!(placement.origin, Point::new(510.0, 510.0));
//! ```

use kurbo::{Point, Rect, Size, Vec2};

/// Distance from the anchor to the overlay's top-left corner on both axes.
pub const POINTER_OFFSET: f64 = 10.0;

/// Gap between the anchor and the overlay's bottom edge when flipped above.
pub const FLIP_GAP: f64 = 5.0;

/// Geometric origin for tooltip placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AnchorPoint {
    /// A pointer position in client coordinates.
    Pointer(Point),
    /// No pointer context (keyboard focus, programmatic show).
    ///
    /// The overlay is placed far outside the viewport: it stays in the
    /// accessibility tree at a stable location without being seen.
    Offscreen,
}

impl AnchorPoint {
    /// The sentinel coordinate used for [`AnchorPoint::Offscreen`].
    pub const OFFSCREEN: Point = Point::new(-1000.0, -1000.0);

    /// The anchor as a concrete point.
    #[must_use]
    pub fn point(self) -> Point {
        match self {
            Self::Pointer(p) => p,
            Self::Offscreen => Self::OFFSCREEN,
        }
    }
}

/// Size and scroll state of the visible area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Size of the visible client area.
    pub client: Size,
    /// Scroll offset of the document (left, top).
    pub scroll: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(1024.0, 768.0), Vec2::ZERO)
    }
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(client: Size, scroll: Vec2) -> Self {
        Self { client, scroll }
    }

    /// The visible area in document coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.scroll.to_point(), self.client)
    }
}

/// Result of [`solve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Top-left corner in document coordinates.
    pub origin: Point,
    /// Final content size (after reflow, if any).
    pub size: Size,
    /// Width the overlay must be constrained to, when the natural width
    /// exceeded the maximum.
    pub constrained_width: Option<f64>,
}

impl Placement {
    /// The placed box in document coordinates.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Compute where to place a tooltip.
///
/// `natural` is the unconstrained content size. `reflow` is only called when
/// `natural.width > max_width`, and must return the content size when laid out
/// at the given width.
pub fn solve(
    anchor: AnchorPoint,
    natural: Size,
    reflow: impl FnOnce(f64) -> Size,
    viewport: &Viewport,
    max_width: f64,
    margin: f64,
) -> Placement {
    let mut size = clamp_size(natural);
    let mut constrained_width = None;
    if size.width > max_width {
        let width = max_width.max(0.0);
        size = Size::new(width, clamp_size(reflow(width)).height);
        constrained_width = Some(width);
    }

    let anchor = anchor.point();
    let scroll = viewport.scroll;
    let client = viewport.client;

    let mut x = anchor.x + POINTER_OFFSET + scroll.x;
    let mut y = anchor.y + POINTER_OFFSET + scroll.y;

    if x + size.width + margin - scroll.x > client.width {
        x = client.width - size.width - margin + scroll.x;
    }

    if y + size.height + margin - scroll.y > client.height {
        y = anchor.y - FLIP_GAP - size.height + scroll.y;
        if y - scroll.y < 0.0 {
            // Doesn't fit above the pointer either.
            y = scroll.y;
        }
    }

    Placement {
        origin: Point::new(x, y),
        size,
        constrained_width,
    }
}

fn clamp_size(size: Size) -> Size {
    Size::new(size.width.max(0.0), size.height.max(0.0))
}

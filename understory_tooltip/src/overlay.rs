// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tooltip overlay: rendered content, visibility, and the live region.
//!
//! [`TooltipOverlay`] keeps the headless model of the floating tooltip and
//! forwards every change to an [`OverlaySurface`], the boundary to whatever
//! actually draws the overlay (a DOM node, a layer in a scene graph, a
//! terminal cell region).
//!
//! Content is rebuilt on every [`TooltipOverlay::show`] and cleared on every
//! [`TooltipOverlay::hide`]; nothing is diffed across shows.

use alloc::format;
use alloc::string::String;
use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::{Point, Size};

use crate::TooltipInfo;
use crate::position::{AnchorPoint, Placement, Viewport, solve};

/// How assistive technology is told about changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AriaLive {
    /// Changes are not announced.
    Off,
    /// Changes are announced when the user is idle.
    Polite,
    /// Changes are announced immediately.
    Assertive,
}

/// Which changes of a live region are relevant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AriaRelevant {
    /// Added nodes.
    Additions,
    /// Removed nodes.
    Removals,
    /// Text changes.
    Text,
    /// Everything.
    All,
}

/// Accessibility marker applied to the overlay once, at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiveRegion {
    /// ARIA role.
    pub role: &'static str,
    /// `aria-live` value.
    pub live: AriaLive,
    /// `aria-relevant` value.
    pub relevant: AriaRelevant,
}

impl LiveRegion {
    /// The tooltip live region: replacing content is announced right away.
    pub const TOOLTIP: Self = Self {
        role: "tooltip",
        live: AriaLive::Assertive,
        relevant: AriaRelevant::Additions,
    };
}

/// What the overlay currently renders.
///
/// When hidden, both texts are empty and both parts are invisible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayContent {
    /// Descriptive text (markup passed through).
    pub description: String,
    /// Whether the description part is displayed.
    pub description_visible: bool,
    /// Error decoration text (markup passed through).
    pub error: String,
    /// Whether the error part is displayed.
    pub error_visible: bool,
}

impl OverlayContent {
    fn from_info(info: &TooltipInfo) -> Self {
        let (error, error_visible) = match &info.error_message {
            Some(e) => (e.clone(), true),
            None => (String::new(), false),
        };
        let description_visible = !info.message.is_empty();
        Self {
            description: info.message.clone(),
            description_visible,
            error,
            error_visible,
        }
    }

    /// Returns `true` if any part is displayed.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.description_visible || self.error_visible
    }
}

/// Outbound boundary to the rendering layer.
pub trait OverlaySurface {
    /// Apply the accessibility marker. Called once, from [`TooltipOverlay::new`].
    fn set_live_region(&mut self, region: LiveRegion);

    /// Replace the rendered content.
    fn set_content(&mut self, content: &OverlayContent);

    /// Measure the current content, either at its natural width (`None`) or
    /// reflowed to the given width.
    fn measure(&mut self, width: Option<f64>) -> Size;

    /// Constrain the overlay width, or clear the constraint.
    fn set_width(&mut self, width: Option<f64>);

    /// Show the overlay with its top-left corner at `origin`.
    fn show_at(&mut self, origin: Point);

    /// Hide the overlay and park it at `park_at`.
    fn hide(&mut self, park_at: Point);
}

static NEXT_OVERLAY_ID: AtomicU32 = AtomicU32::new(1);

/// The tooltip overlay model.
#[derive(Debug)]
pub struct TooltipOverlay<S> {
    surface: S,
    content: OverlayContent,
    visible: bool,
    origin: Point,
    placement: Option<Placement>,
    max_width: f64,
    margin: f64,
    described_by: String,
}

impl<S: OverlaySurface> TooltipOverlay<S> {
    /// Create a hidden overlay and mark `surface` as a tooltip live region.
    pub fn new(mut surface: S, max_width: f64, margin: f64) -> Self {
        surface.set_live_region(LiveRegion::TOOLTIP);
        let id = NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            surface,
            content: OverlayContent::default(),
            visible: false,
            origin: AnchorPoint::OFFSCREEN,
            placement: None,
            max_width,
            margin,
            described_by: format!("tooltip-{id}"),
        }
    }

    /// Render `info` near `anchor`.
    ///
    /// Returns `false`, and behaves like [`hide`](Self::hide), when `info` has
    /// no content.
    pub fn show(&mut self, info: &TooltipInfo, anchor: AnchorPoint, viewport: &Viewport) -> bool {
        let content = OverlayContent::from_info(info);
        if !content.has_content() {
            self.hide(anchor);
            return false;
        }
        self.surface.set_content(&content);
        self.content = content;

        let natural = self.surface.measure(None);
        let surface = &mut self.surface;
        let placement = solve(
            anchor,
            natural,
            |width| surface.measure(Some(width)),
            viewport,
            self.max_width,
            self.margin,
        );
        self.surface.set_width(placement.constrained_width);
        self.surface.show_at(placement.origin);

        self.origin = placement.origin;
        self.placement = Some(placement);
        self.visible = true;
        true
    }

    /// Hide the overlay, clear its content, and park it at `anchor`.
    ///
    /// Parking at the last anchor keeps the next measurement from being
    /// influenced by a previous position near a viewport edge.
    pub fn hide(&mut self, anchor: AnchorPoint) {
        self.content = OverlayContent::default();
        self.surface.set_content(&self.content);
        self.origin = anchor.point();
        self.surface.hide(self.origin);
        self.placement = None;
        self.visible = false;
    }

    /// Drop any width constraint so the next show measures the natural size.
    pub fn reset_width(&mut self) {
        self.surface.set_width(None);
    }

    /// Set the maximum width used by subsequent shows.
    pub fn set_max_width(&mut self, px: f64) {
        self.max_width = px;
    }

    /// Maximum width before content is wrapped.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Returns `true` while the overlay is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` while assistive technology can reach the tooltip.
    ///
    /// This holds for every shown tooltip, including ones parked off-screen
    /// for keyboard focus.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.visible && self.content.has_content()
    }

    /// Returns `true` if the shown overlay intersects the visible viewport.
    #[must_use]
    pub fn is_on_screen(&self, viewport: &Viewport) -> bool {
        self.placement
            .is_some_and(|p| viewport.visible_rect().intersect(p.rect()).area() > 0.0)
    }

    /// The rendered content.
    #[must_use]
    pub fn content(&self) -> &OverlayContent {
        &self.content
    }

    /// Top-left corner of the overlay, or its parking position while hidden.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Placement of the shown overlay.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Stable id for `aria-describedby` wiring.
    #[must_use]
    pub fn described_by(&self) -> &str {
        &self.described_by
    }

    /// The rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// An [`OverlaySurface`] with fixed glyph metrics and no real output.
///
/// Every character advances by `glyph_width`; each visible part (error,
/// description) takes at least one line and wraps when a width is imposed.
/// Useful for headless hosts, layout tests, and server-side previews.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSurface {
    /// Advance of one character.
    pub glyph_width: f64,
    /// Height of one line.
    pub line_height: f64,
    /// Padding on every side.
    pub padding: f64,
    content: OverlayContent,
    width: Option<f64>,
    origin: Point,
    visible: bool,
    live_region: Option<LiveRegion>,
    show_count: usize,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(8.0, 16.0, 4.0)
    }
}

impl HeadlessSurface {
    /// Create a surface with the given metrics.
    #[must_use]
    pub fn new(glyph_width: f64, line_height: f64, padding: f64) -> Self {
        Self {
            glyph_width,
            line_height,
            padding,
            content: OverlayContent::default(),
            width: None,
            origin: Point::ZERO,
            visible: false,
            live_region: None,
            show_count: 0,
        }
    }

    /// Last content received.
    #[must_use]
    pub fn content(&self) -> &OverlayContent {
        &self.content
    }

    /// Current width constraint.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Current position.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Whether the surface is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The applied live region, if any.
    #[must_use]
    pub fn live_region(&self) -> Option<LiveRegion> {
        self.live_region
    }

    /// How many times the surface was shown.
    #[must_use]
    pub fn show_count(&self) -> usize {
        self.show_count
    }

    fn part_lines(&self, chars: usize, inner_width: Option<f64>) -> usize {
        let Some(inner) = inner_width else {
            return 1;
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "glyphs per line is a small non-negative count"
        )]
        let per_line = (inner / self.glyph_width) as usize;
        chars.div_ceil(per_line.max(1)).max(1)
    }
}

impl OverlaySurface for HeadlessSurface {
    fn set_live_region(&mut self, region: LiveRegion) {
        self.live_region = Some(region);
    }

    fn set_content(&mut self, content: &OverlayContent) {
        self.content = content.clone();
    }

    fn measure(&mut self, width: Option<f64>) -> Size {
        let parts = [
            (self.content.error_visible, &self.content.error),
            (self.content.description_visible, &self.content.description),
        ];
        let inner = width.map(|w| (w - 2.0 * self.padding).max(self.glyph_width));
        let mut widest = 0_usize;
        let mut lines = 0_usize;
        for (visible, text) in parts {
            if !visible {
                continue;
            }
            let chars = text.chars().count();
            widest = widest.max(chars);
            lines += self.part_lines(chars, inner);
        }
        let natural = widest as f64 * self.glyph_width + 2.0 * self.padding;
        let w = width.map_or(natural, |w| w.min(natural));
        Size::new(w, lines as f64 * self.line_height + 2.0 * self.padding)
    }

    fn set_width(&mut self, width: Option<f64>) {
        self.width = width;
    }

    fn show_at(&mut self, origin: Point) {
        self.origin = origin;
        self.visible = true;
        self.show_count += 1;
    }

    fn hide(&mut self, park_at: Point) {
        self.origin = park_at;
        self.visible = false;
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close/quick-reopen timing for the tooltip overlay.
//!
//! ## States
//!
//! ```text
//!            request_show               open timer (content)
//!   Idle ───────────────────▶ Opening ─────────────────────▶ Showing
//!    ▲                          │  request_hide                 │  ▲
//!    │                          ▼                  request_hide │  │ re-entry / request_show
//!    │                     Idle / QuickReopenWindow             ▼  │
//!    │   quick-reopen timer                                   Closing
//!    └────────────────── QuickReopenWindow ◀──────────────────────┘
//!                              close timer (overlay hidden)
//! ```
//!
//! A show request while `QuickReopenWindow` is active (even after it has moved
//! on to `Opening`) waits `quick_open_delay` instead of `open_delay`.
//!
//! The controller never reads a clock: every entry point takes the current
//! timestamp in milliseconds, and [`TooltipTimerController::poll`] fires the
//! timers that are due. The overlay is shown exactly while
//! [`TimerState::overlay_visible`] holds.

use understory_timing::{TimerId, TimerQueue};

use crate::overlay::{OverlaySurface, TooltipOverlay};
use crate::position::{AnchorPoint, Viewport};
use crate::{TooltipConfig, TooltipInfo};

/// Timing state of the tooltip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Nothing shown, nothing pending.
    #[default]
    Idle,
    /// Waiting for the open delay to elapse.
    Opening,
    /// The overlay is shown.
    Showing,
    /// The overlay is still shown, waiting for the close delay to elapse.
    Closing,
    /// Recently closed: the next show uses the quick open delay.
    QuickReopenWindow,
}

impl TimerState {
    /// Whether the overlay is on display in this state.
    ///
    /// `Closing` is the tail end of `Showing`.
    #[must_use]
    pub fn overlay_visible(self) -> bool {
        matches!(self, Self::Showing | Self::Closing)
    }
}

/// What kind of event asked for the tooltip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShowTrigger {
    /// The pointer moved over the element.
    #[default]
    Pointer,
    /// The element gained keyboard focus.
    Focus,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TooltipTimer {
    Open,
    Close,
    QuickReopen,
}

/// Owns the timer state machine and the overlay.
#[derive(Debug)]
pub struct TooltipTimerController<S> {
    config: TooltipConfig,
    state: TimerState,
    timers: TimerQueue<TooltipTimer>,
    open_timer: Option<TimerId>,
    close_timer: Option<TimerId>,
    quick_reopen_timer: Option<TimerId>,
    anchor: AnchorPoint,
    trigger: ShowTrigger,
    viewport: Viewport,
    overlay: TooltipOverlay<S>,
}

impl<S: OverlaySurface> TooltipTimerController<S> {
    /// Create an idle controller rendering into `surface`.
    pub fn new(config: TooltipConfig, surface: S) -> Self {
        let overlay = TooltipOverlay::new(
            surface,
            f64::from(config.max_width),
            f64::from(config.margin),
        );
        Self {
            config,
            state: TimerState::Idle,
            timers: TimerQueue::new(),
            open_timer: None,
            close_timer: None,
            quick_reopen_timer: None,
            anchor: AnchorPoint::Offscreen,
            trigger: ShowTrigger::Pointer,
            viewport: Viewport::default(),
            overlay,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// The overlay.
    #[must_use]
    pub fn overlay(&self) -> &TooltipOverlay<S> {
        &self.overlay
    }

    /// Mutable access to the overlay's surface.
    pub fn surface_mut(&mut self) -> &mut S {
        self.overlay.surface_mut()
    }

    /// Anchor of the latest show request.
    #[must_use]
    pub fn anchor(&self) -> AnchorPoint {
        self.anchor
    }

    /// Trigger of the latest show request.
    #[must_use]
    pub fn trigger(&self) -> ShowTrigger {
        self.trigger
    }

    /// Viewport used for placement.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Update the viewport (resize or scroll). Applies to the next render.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Set the maximum overlay width. Applies to the next render.
    pub fn set_max_width(&mut self, px: u32) {
        self.config.max_width = px;
        self.overlay.set_max_width(f64::from(px));
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Returns `true` while the quick-reopen grace period is running.
    #[must_use]
    pub fn in_quick_reopen_window(&self) -> bool {
        self.quick_reopen_timer.is_some()
    }

    /// Ask for the tooltip to be shown at `anchor`.
    ///
    /// While the overlay is up, `info` replaces the content right away.
    /// Otherwise the open timer is (re)armed; the content is resolved again
    /// when it fires. `trigger` is recorded and logged; focus and pointer
    /// requests share the same timing.
    pub fn request_show(
        &mut self,
        now: u64,
        info: &TooltipInfo,
        anchor: AnchorPoint,
        trigger: ShowTrigger,
    ) {
        tracing::trace!(?trigger, state = ?self.state, "tooltip show requested");
        self.trigger = trigger;
        self.anchor = anchor;
        if self.replace_showing(info, anchor) {
            return;
        }
        if let Some(id) = self.open_timer.take() {
            self.timers.cancel(id);
        }
        let delay = if self.in_quick_reopen_window() {
            self.config.quick_open_delay
        } else {
            self.config.open_delay
        };
        self.open_timer = Some(self.timers.schedule(now, u64::from(delay), TooltipTimer::Open));
        self.transition(TimerState::Opening);
    }

    /// Re-render in place while the overlay is up, skipping the close/reopen
    /// cycle.
    ///
    /// Returns `false` (and does nothing) when the overlay is not up.
    pub fn replace_showing(&mut self, info: &TooltipInfo, anchor: AnchorPoint) -> bool {
        if !self.state.overlay_visible() {
            return false;
        }
        self.anchor = anchor;
        self.cancel_close();
        self.render(info);
        true
    }

    /// Ask for the tooltip to go away.
    ///
    /// A pending open is cancelled so the tooltip never appears; a shown
    /// tooltip starts its close delay. Otherwise this is a no-op.
    pub fn request_hide(&mut self, now: u64) {
        match self.state {
            TimerState::Opening => {
                if let Some(id) = self.open_timer.take() {
                    self.timers.cancel(id);
                }
                self.transition(self.rest_state());
            }
            TimerState::Showing => {
                let delay = u64::from(self.config.close_timeout);
                self.close_timer = Some(self.timers.schedule(now, delay, TooltipTimer::Close));
                self.transition(TimerState::Closing);
            }
            TimerState::Closing | TimerState::Idle | TimerState::QuickReopenWindow => {}
        }
    }

    /// The pointer entered the overlay itself: keep it up.
    ///
    /// Returns `true` if a pending close was cancelled.
    pub fn cancel_hide_on_reentry(&mut self) -> bool {
        if self.state != TimerState::Closing {
            return false;
        }
        self.cancel_close();
        self.transition(TimerState::Showing);
        true
    }

    /// Render `info` immediately at `anchor`, bypassing the open delay.
    pub fn show_now(&mut self, info: &TooltipInfo, anchor: AnchorPoint) {
        if let Some(id) = self.open_timer.take() {
            self.timers.cancel(id);
        }
        self.cancel_close();
        self.anchor = anchor;
        self.render(info);
    }

    /// Replace whatever is pending or shown with `info`.
    ///
    /// A closing tooltip is closed at once first. `None` leaves a shown
    /// tooltip as it is and drops a pending open.
    pub fn replace_current(&mut self, info: Option<&TooltipInfo>) {
        if let Some(id) = self.open_timer.take() {
            self.timers.cancel(id);
        }
        if self.state == TimerState::Closing {
            self.cancel_close();
            self.overlay.hide(self.anchor);
            self.overlay.reset_width();
        }
        match info {
            Some(info) => self.render(info),
            None if self.overlay.is_visible() => self.transition(TimerState::Showing),
            None => self.transition(self.rest_state()),
        }
    }

    /// Fire every timer due at `now`.
    ///
    /// `resolve` is called when the open timer fires, to fetch the content as
    /// it is *now*; the element may have changed or been detached since the
    /// request. Returns the number of timers fired.
    pub fn poll(&mut self, now: u64, mut resolve: impl FnMut() -> Option<TooltipInfo>) -> usize {
        let mut fired = 0;
        while let Some(expired) = self.timers.pop_due(now) {
            fired += 1;
            match expired.payload {
                TooltipTimer::Open => {
                    self.open_timer = None;
                    match resolve().filter(TooltipInfo::has_message) {
                        Some(info) => self.render(&info),
                        None => {
                            tracing::debug!("tooltip content vanished before opening");
                            self.transition(self.rest_state());
                        }
                    }
                }
                TooltipTimer::Close => {
                    self.close_timer = None;
                    self.overlay.hide(self.anchor);
                    self.overlay.reset_width();
                    if let Some(id) = self.quick_reopen_timer.take() {
                        self.timers.cancel(id);
                    }
                    let window = u64::from(self.config.quick_open_timeout);
                    self.quick_reopen_timer = Some(self.timers.schedule(
                        expired.deadline,
                        window,
                        TooltipTimer::QuickReopen,
                    ));
                    self.transition(TimerState::QuickReopenWindow);
                }
                TooltipTimer::QuickReopen => {
                    self.quick_reopen_timer = None;
                    if self.state == TimerState::QuickReopenWindow {
                        self.transition(TimerState::Idle);
                    }
                }
            }
        }
        fired
    }

    /// Cancel every timer, hide the overlay, and return to `Idle`.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.open_timer = None;
        self.close_timer = None;
        self.quick_reopen_timer = None;
        if self.overlay.is_visible() {
            self.overlay.hide(self.anchor);
        }
        self.overlay.reset_width();
        self.transition(TimerState::Idle);
    }

    fn render(&mut self, info: &TooltipInfo) {
        if self.overlay.show(info, self.anchor, &self.viewport) {
            self.transition(TimerState::Showing);
        } else {
            self.transition(self.rest_state());
        }
    }

    fn cancel_close(&mut self) {
        if let Some(id) = self.close_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn rest_state(&self) -> TimerState {
        if self.in_quick_reopen_window() {
            TimerState::QuickReopenWindow
        } else {
            TimerState::Idle
        }
    }

    fn transition(&mut self, to: TimerState) {
        if self.state != to {
            tracing::debug!(from = ?self.state, to = ?to, "tooltip state");
            self.state = to;
        }
    }
}

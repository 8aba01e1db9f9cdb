// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The long-lived tooltip context.
//!
//! A [`TooltipManager`] owns the [`EventRouter`] and the
//! [`TooltipTimerController`] (and through it the single overlay). Hosts create
//! one per widget surface, feed it events with timestamps, and call
//! [`TooltipManager::poll`] when [`TooltipManager::next_deadline`] passes.

use crate::controller::{TimerState, TooltipTimerController};
use crate::overlay::{OverlaySurface, TooltipOverlay};
use crate::owner::TooltipOwners;
use crate::position::{AnchorPoint, Viewport};
use crate::router::{EventRouter, Routed, TooltipEvent};
use crate::{ConfigError, TooltipConfig, TooltipInfo};

/// Tooltip state for one widget surface.
#[derive(Debug)]
pub struct TooltipManager<E, S> {
    router: EventRouter<E>,
    controller: TooltipTimerController<S>,
}

impl<E: Clone + PartialEq, S: OverlaySurface> TooltipManager<E, S> {
    /// Create a manager drawing into `surface`.
    ///
    /// The configuration is taken as given; see [`try_new`](Self::try_new).
    pub fn new(config: TooltipConfig, surface: S) -> Self {
        Self {
            router: EventRouter::new(),
            controller: TooltipTimerController::new(config, surface),
        }
    }

    /// Create a manager after validating `config`.
    pub fn try_new(config: TooltipConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, surface))
    }

    /// Handle one input event at time `now`.
    ///
    /// Timers due at `now` fire first, so an event never observes a stale
    /// state.
    pub fn handle_event<L>(&mut self, now: u64, event: &TooltipEvent<E>, owners: &L) -> Routed
    where
        L: TooltipOwners<E> + ?Sized,
    {
        self.poll(now, owners);
        self.router.handle(now, event, owners, &mut self.controller)
    }

    /// Fire every timer due at `now`. Returns how many fired.
    ///
    /// Content is resolved again when the open delay elapses, so an element
    /// that lost its tooltip (or was detached) in the meantime shows nothing.
    pub fn poll<L>(&mut self, now: u64, owners: &L) -> usize
    where
        L: TooltipOwners<E> + ?Sized,
    {
        let Self { router, controller } = self;
        controller.poll(now, || router.refresh(owners))
    }

    /// The earliest pending timer deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.controller.next_deadline()
    }

    /// Show `info` immediately at the off-screen anchor, for assistive
    /// technology only.
    pub fn show_assistive(&mut self, info: &TooltipInfo) {
        self.controller.show_now(info, AnchorPoint::Offscreen);
    }

    /// Request a hide as if the pointer left the owner.
    ///
    /// Timers due at `now` fire first, as in
    /// [`handle_event`](Self::handle_event): an open that already came due is
    /// shown and then starts closing instead of being cancelled.
    pub fn hide_tooltip<L>(&mut self, now: u64, owners: &L)
    where
        L: TooltipOwners<E> + ?Sized,
    {
        self.poll(now, owners);
        self.controller.request_hide(now);
    }

    /// Re-resolve the current element and redraw the tooltip with the result.
    ///
    /// Use this after the current owner's tooltip text changed.
    pub fn replace_current_tooltip<L>(&mut self, owners: &L)
    where
        L: TooltipOwners<E> + ?Sized,
    {
        let info = self.router.refresh(owners);
        self.controller.replace_current(info.as_ref());
    }

    /// The pointer entered the overlay. Returns `true` if a pending close was
    /// cancelled; a close already due at `now` fires first.
    pub fn pointer_entered_overlay<L>(&mut self, now: u64, owners: &L) -> bool
    where
        L: TooltipOwners<E> + ?Sized,
    {
        self.poll(now, owners);
        self.controller.cancel_hide_on_reentry()
    }

    /// Update the viewport used for placement.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    /// Change the maximum overlay width.
    pub fn set_max_width(&mut self, px: u32) {
        self.controller.set_max_width(px);
    }

    /// Drop all timers, hide the overlay and forget the current element.
    pub fn reset(&mut self) {
        self.router.reset();
        self.controller.reset();
    }

    /// Current controller state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        self.controller.state()
    }

    /// Returns `true` while the overlay is presented.
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.controller.state().overlay_visible()
    }

    /// The overlay.
    #[must_use]
    pub fn overlay(&self) -> &TooltipOverlay<S> {
        self.controller.overlay()
    }

    /// The router.
    #[must_use]
    pub fn router(&self) -> &EventRouter<E> {
        &self.router
    }

    /// The timer controller.
    #[must_use]
    pub fn controller(&self) -> &TooltipTimerController<S> {
        &self.controller
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        self.controller.surface_mut()
    }
}

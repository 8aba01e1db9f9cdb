// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input routing: turn pointer, click, key, focus and blur signals into
//! show/hide requests.
//!
//! The router remembers the last event target and whether the current tooltip
//! is owned by keyboard focus. Content is resolved with
//! [`owner::resolve`](crate::owner::resolve) and handed to the
//! [`TooltipTimerController`].

use kurbo::Point;

use crate::TooltipInfo;
use crate::controller::{ShowTrigger, TimerState, TooltipTimerController};
use crate::overlay::OverlaySurface;
use crate::owner::{TooltipOwners, resolve};
use crate::position::AnchorPoint;

/// An input signal from the watched widget surface.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipEvent<E> {
    /// The pointer moved over `target`; `position` is in client coordinates.
    PointerMove {
        /// Element under the pointer.
        target: E,
        /// Pointer position.
        position: Point,
    },
    /// `target` was clicked.
    Click {
        /// Clicked element.
        target: E,
    },
    /// A key was pressed while `target` had focus.
    KeyDown {
        /// Focused element.
        target: E,
    },
    /// `target` gained keyboard focus.
    Focus {
        /// Focused element.
        target: E,
    },
    /// `target` lost keyboard focus.
    Blur {
        /// Element losing focus.
        target: E,
    },
    /// The pointer entered the tooltip overlay itself.
    OverlayPointerEnter,
}

/// What the router did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Routed {
    /// The event repeated the current focus-owned target and was ignored.
    Ignored,
    /// Content was found and a show was requested.
    Show,
    /// A hide was requested.
    Hide,
    /// No content and nothing to hide.
    NoTooltip,
    /// The pointer entered the overlay and a pending close was cancelled.
    KeptOpen,
}

/// Routes input events into tooltip show/hide requests.
#[derive(Clone, Debug)]
pub struct EventRouter<E> {
    current_element: Option<E>,
    trigger: Option<ShowTrigger>,
    current_info: Option<TooltipInfo>,
}

impl<E> Default for EventRouter<E> {
    fn default() -> Self {
        Self {
            current_element: None,
            trigger: None,
            current_info: None,
        }
    }
}

impl<E: Clone + PartialEq> EventRouter<E> {
    /// Create a router with no current element.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of the last pointer or focus event.
    #[must_use]
    pub fn current_element(&self) -> Option<&E> {
        self.current_element.as_ref()
    }

    /// The kind of the last pointer or focus event, cleared on blur.
    #[must_use]
    pub fn trigger(&self) -> Option<ShowTrigger> {
        self.trigger
    }

    /// Returns `true` if the tooltip was triggered by keyboard focus.
    #[must_use]
    pub fn focus_owns_tooltip(&self) -> bool {
        self.trigger == Some(ShowTrigger::Focus)
    }

    /// Content resolved for the current element, if any.
    #[must_use]
    pub fn current_info(&self) -> Option<&TooltipInfo> {
        self.current_info.as_ref()
    }

    /// Route one event.
    pub fn handle<L, S>(
        &mut self,
        now: u64,
        event: &TooltipEvent<E>,
        owners: &L,
        controller: &mut TooltipTimerController<S>,
    ) -> Routed
    where
        L: TooltipOwners<E> + ?Sized,
        S: OverlaySurface,
    {
        match event {
            TooltipEvent::PointerMove { target, position } => self.show_or_hide(
                now,
                target,
                AnchorPoint::Pointer(*position),
                ShowTrigger::Pointer,
                owners,
                controller,
            ),
            TooltipEvent::Focus { target } => self.show_or_hide(
                now,
                target,
                AnchorPoint::Offscreen,
                ShowTrigger::Focus,
                owners,
                controller,
            ),
            TooltipEvent::Click { .. } | TooltipEvent::KeyDown { .. } => {
                self.hide(now, controller);
                Routed::Hide
            }
            TooltipEvent::Blur { .. } => {
                self.trigger = None;
                self.hide(now, controller);
                Routed::Hide
            }
            TooltipEvent::OverlayPointerEnter => {
                if controller.cancel_hide_on_reentry() {
                    Routed::KeptOpen
                } else {
                    Routed::Ignored
                }
            }
        }
    }

    /// Resolve the current element again.
    ///
    /// Returns `None` once the content was cleared by a hide, or when the
    /// element no longer has a tooltip (for example because it was detached).
    pub fn refresh<L>(&mut self, owners: &L) -> Option<TooltipInfo>
    where
        L: TooltipOwners<E> + ?Sized,
    {
        self.current_info.as_ref()?;
        let info = self
            .current_element
            .as_ref()
            .and_then(|element| resolve(owners, element))
            .map(|resolved| resolved.info);
        self.current_info.clone_from(&info);
        info
    }

    /// Forget the current element and content.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn show_or_hide<L, S>(
        &mut self,
        now: u64,
        target: &E,
        anchor: AnchorPoint,
        trigger: ShowTrigger,
        owners: &L,
        controller: &mut TooltipTimerController<S>,
    ) -> Routed
    where
        L: TooltipOwners<E> + ?Sized,
        S: OverlaySurface,
    {
        if self.focus_owns_tooltip() && self.current_element.as_ref() == Some(target) {
            return Routed::Ignored;
        }

        let routed = match resolve(owners, target) {
            Some(resolved) => {
                controller.request_show(now, &resolved.info, anchor, trigger);
                self.current_info = Some(resolved.info);
                Routed::Show
            }
            None => {
                let state = controller.state();
                if state.overlay_visible() || state == TimerState::Opening {
                    self.hide(now, controller);
                    Routed::Hide
                } else {
                    self.current_info = None;
                    Routed::NoTooltip
                }
            }
        };
        tracing::trace!(?routed, ?trigger, "tooltip routing");

        self.trigger = Some(trigger);
        self.current_element = Some(target.clone());
        routed
    }

    fn hide<S: OverlaySurface>(&mut self, now: u64, controller: &mut TooltipTimerController<S>) {
        controller.request_hide(now);
        self.current_info = None;
    }
}

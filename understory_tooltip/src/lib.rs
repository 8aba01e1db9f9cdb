// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tooltip --heading-base-level=0

//! Understory Tooltip: a headless, host-driven tooltip overlay manager.
//!
//! ## Overview
//!
//! One overlay per widget surface, shown after a hover delay, hidden after a
//! grace period, reopened quickly when the pointer moves between neighbouring
//! widgets, and always placed inside the visible viewport. The overlay is an
//! assertive ARIA live region, so keyboard focus and programmatic announcements
//! reach assistive technology even when nothing is drawn on screen.
//!
//! The crate does not draw and does not read a clock. Hosts provide:
//!
//! - an [`OverlaySurface`](overlay::OverlaySurface) that renders content,
//!   measures it, and moves it;
//! - a [`TooltipOwners`](owner::TooltipOwners) view of their component tree
//!   (or an [`OwnerTree`](owner::OwnerTree));
//! - monotonic timestamps in milliseconds with every call.
//!
//! ## Pieces
//!
//! - [`position`]: pure placement math for the overlay box.
//! - [`owner`]: nearest-ancestor content resolution.
//! - [`controller`]: the open/close/quick-reopen state machine.
//! - [`overlay`]: the overlay model and its live-region semantics.
//! - [`router`]: maps pointer, click, key, and focus events to requests.
//! - [`manager`]: [`TooltipManager`], the long-lived context tying them together.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_tooltip::overlay::HeadlessSurface;
//! use understory_tooltip::owner::{ComponentTooltip, OwnerKind, OwnerTree};
//! use understory_tooltip::router::TooltipEvent;
//! use understory_tooltip::{TimerState, TooltipConfig, TooltipInfo, TooltipManager};
//!
//! let mut owners = OwnerTree::new();
//! let save = owners.insert(
//!     None,
//!     OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::new("Save"))),
//! );
//! owners.bind("save-button", save);
//!
//! let mut tooltips = TooltipManager::new(TooltipConfig::default(), HeadlessSurface::default());
//! tooltips.handle_event(
//!     0,
//!     &TooltipEvent::PointerMove { target: "save-button", position: Point::new(40.0, 12.0) },
//!     &owners,
//! );
//! assert_eq!(tooltips.state(), TimerState::Opening);
//!
//! // The host sleeps until the next deadline, then polls.
//! let due = tooltips.next_deadline().unwrap();
//! tooltips.poll(due, &owners);
//! assert!(tooltips.is_showing());
//! assert_eq!(tooltips.overlay().content().description, "Save");
//! assert_eq!(tooltips.overlay().origin(), Point::new(50.0, 22.0));
//! ```
//!
//! ## Logging
//!
//! State transitions are reported with `tracing` at `debug` level and owner
//! resolution at `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod info;
pub mod manager;
pub mod overlay;
pub mod owner;
pub mod position;
pub mod router;

pub use config::{ConfigError, TooltipConfig};
pub use controller::{ShowTrigger, TimerState, TooltipTimerController};
pub use info::TooltipInfo;
pub use manager::TooltipManager;
pub use overlay::{OverlaySurface, TooltipOverlay};
pub use router::{EventRouter, TooltipEvent};

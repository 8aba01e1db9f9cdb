// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for tooltip integration tests.

#![allow(
    dead_code,
    missing_docs,
    unreachable_pub,
    reason = "Integration-test helper module; not part of the public API."
)]

use kurbo::Point;
use understory_tooltip::overlay::HeadlessSurface;
use understory_tooltip::owner::{ComponentTooltip, OwnerKind, OwnerTree};
use understory_tooltip::router::TooltipEvent;
use understory_tooltip::{TooltipConfig, TooltipInfo, TooltipManager};

/// Page background, a bare layout container.
pub const PAGE: u32 = 0;
/// "Save" button inside the toolbar.
pub const SAVE: u32 = 1;
/// "Open" button inside the toolbar.
pub const OPEN: u32 = 2;
/// Icon inside the toolbar without a tooltip of its own.
pub const ICON: u32 = 3;
/// Text field inside a form row that carries a validation error.
pub const FIELD: u32 = 4;
/// Label in a layout panel nested in the toolbar.
pub const PANEL_LABEL: u32 = 5;

pub const OPEN_DELAY: u64 = 500;
pub const QUICK_OPEN_DELAY: u64 = 50;
pub const QUICK_OPEN_TIMEOUT: u64 = 1_000;
pub const CLOSE_TIMEOUT: u64 = 200;

pub type Manager = TooltipManager<u32, HeadlessSurface>;

pub fn config() -> TooltipConfig {
    TooltipConfig::default()
        .open_delay(ms(OPEN_DELAY))
        .quick_open_delay(ms(QUICK_OPEN_DELAY))
        .quick_open_timeout(ms(QUICK_OPEN_TIMEOUT))
        .close_timeout(ms(CLOSE_TIMEOUT))
}

fn ms(value: u64) -> u32 {
    u32::try_from(value).unwrap()
}

pub fn manager() -> Manager {
    TooltipManager::try_new(config(), HeadlessSurface::default()).unwrap()
}

fn described(text: &str) -> OwnerKind<u32> {
    OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::new(text)))
}

pub fn owners() -> OwnerTree<u32> {
    let mut tree = OwnerTree::new();
    let page = tree.insert(None, OwnerKind::Layout);
    let toolbar = tree.insert(Some(page), described("Toolbar"));
    let save = tree.insert(Some(toolbar), described("Save"));
    let open = tree.insert(Some(toolbar), described("Open"));
    let icon = tree.insert(Some(toolbar), OwnerKind::Component(ComponentTooltip::new()));
    let row = tree.insert(
        Some(page),
        OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::error(
            "Name is required",
        ))),
    );
    let field = tree.insert(Some(row), OwnerKind::Component(ComponentTooltip::new()));
    let panel = tree.insert(Some(toolbar), OwnerKind::Layout);
    let label = tree.insert(Some(panel), OwnerKind::Component(ComponentTooltip::new()));

    tree.bind(PAGE, page);
    tree.bind(SAVE, save);
    tree.bind(OPEN, open);
    tree.bind(ICON, icon);
    tree.bind(FIELD, field);
    tree.bind(PANEL_LABEL, label);
    tree
}

pub fn move_to(target: u32, x: f64, y: f64) -> TooltipEvent<u32> {
    TooltipEvent::PointerMove {
        target,
        position: Point::new(x, y),
    }
}

/// Asserts that the overlay is presented exactly while the state says so.
pub fn assert_consistent(m: &Manager) {
    let visible = m.state().overlay_visible();
    assert_eq!(m.overlay().is_visible(), visible, "state {:?}", m.state());
    assert_eq!(
        m.overlay().surface().is_visible(),
        visible,
        "state {:?}",
        m.state()
    );
}

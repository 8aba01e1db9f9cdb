// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip ownership: find the nearest ancestor that supplies tooltip content.
//!
//! ## Usage
//!
//! 1) Describe your widget tree through [`TooltipOwners`], or build an
//!    [`OwnerTree`] arena that implements it.
//! 2) Call [`resolve`] with the element under the pointer (or the focused
//!    element).
//! 3) `Some(..)` carries the owner and its content; `None` is the ordinary
//!    "no tooltip here" outcome, not an error.
//!
//! ## Walk
//!
//! Starting from the owner of the element, each candidate is asked for its
//! tooltip relative to the *original* element. The first candidate returning
//! content wins. Otherwise the walk moves to the parent, but only while the
//! parent can own tooltips: a [`OwnerKind::Layout`] parent (or a missing or
//! removed one) ends the walk without a result.
//!
//! ```
//! use understory_tooltip::owner::{resolve, ComponentTooltip, OwnerKind, OwnerTree};
//! use understory_tooltip::TooltipInfo;
//!
//! let mut tree = OwnerTree::new();
//! let row = tree.insert(
//!     None,
//!     OwnerKind::Component(ComponentTooltip::with_description(TooltipInfo::error("Required"))),
//! );
//! let field = tree.insert(Some(row), OwnerKind::Component(ComponentTooltip::new()));
//! tree.bind("name-input", field);
//!
//! // The field has no tooltip of its own and inherits the row's error.
//! let resolved = resolve(&tree, &"name-input").unwrap();
//! assert_eq!(resolved.owner, row);
//! assert_eq!(resolved.info, TooltipInfo::error("Required"));
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::TooltipInfo;

/// Capability consumed from the component tree.
///
/// Parent chains must be finite and acyclic.
pub trait TooltipOwners<E> {
    /// Handle for an owner in the host's tree.
    type Owner: Copy + Eq + Debug;

    /// The owner an element belongs to, or `None` if the element is detached.
    fn owner_for(&self, element: &E) -> Option<Self::Owner>;

    /// The parent of an owner, if any.
    fn parent(&self, owner: Self::Owner) -> Option<Self::Owner>;

    /// Whether the owner takes part in tooltip resolution at all.
    ///
    /// Bare layout containers return `false` and stop the upward walk.
    fn can_own_tooltips(&self, owner: Self::Owner) -> bool;

    /// Tooltip content the owner provides for `element`.
    fn tooltip_info(&self, owner: Self::Owner, element: &E) -> Option<TooltipInfo>;

    /// Whether the owner has any tooltip content at all.
    fn has_tooltip(&self, owner: Self::Owner) -> bool;
}

/// An owner chosen by [`resolve`] together with its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOwner<O> {
    /// The owner that supplied the content.
    pub owner: O,
    /// Non-empty tooltip content.
    pub info: TooltipInfo,
}

/// Resolve the nearest owner supplying non-empty tooltip content for `element`.
pub fn resolve<E, L>(owners: &L, element: &E) -> Option<ResolvedOwner<L::Owner>>
where
    L: TooltipOwners<E> + ?Sized,
{
    let mut candidate = owners.owner_for(element)?;
    loop {
        if let Some(info) = owners
            .tooltip_info(candidate, element)
            .filter(TooltipInfo::has_message)
        {
            debug_assert!(
                owners.has_tooltip(candidate),
                "owner {candidate:?} returned tooltip content although has_tooltip() is false"
            );
            tracing::trace!(owner = ?candidate, "resolved tooltip owner");
            return Some(ResolvedOwner {
                owner: candidate,
                info,
            });
        }
        match owners.parent(candidate) {
            Some(parent) if owners.can_own_tooltips(parent) => candidate = parent,
            _ => {
                tracing::trace!(owner = ?candidate, "no tooltip owner above");
                return None;
            }
        }
    }
}

/// Identifier for an owner in an [`OwnerTree`].
///
/// A slot index plus a generation counter; removing an owner makes every
/// existing id for that slot stale, and reuse of the slot yields a new id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnerId(u32, u32);

impl OwnerId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Tooltip content held by a component owner.
///
/// A component may carry a description for itself and separate content for
/// individual elements it renders (cells of a grid, items of a menu bar).
/// Per-element content takes precedence over the description.
#[derive(Clone, Debug)]
pub struct ComponentTooltip<E> {
    description: Option<TooltipInfo>,
    elements: HashMap<E, TooltipInfo>,
}

impl<E: Eq + Hash> Default for ComponentTooltip<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash> ComponentTooltip<E> {
    /// A component without tooltip content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            description: None,
            elements: HashMap::new(),
        }
    }

    /// A component whose tooltip is the same for all of its elements.
    #[must_use]
    pub fn with_description(info: TooltipInfo) -> Self {
        let mut tooltip = Self::new();
        tooltip.description = Some(info);
        tooltip
    }

    /// Replace the component-wide description.
    pub fn set_description(&mut self, info: Option<TooltipInfo>) {
        self.description = info;
    }

    /// Set content for a single element rendered by this component.
    pub fn set_element_tooltip(&mut self, element: E, info: TooltipInfo) {
        self.elements.insert(element, info);
    }

    /// Remove per-element content, falling back to the description.
    pub fn remove_element_tooltip(&mut self, element: &E) -> Option<TooltipInfo> {
        self.elements.remove(element)
    }

    /// Content for `element`.
    #[must_use]
    pub fn info_for(&self, element: &E) -> Option<TooltipInfo> {
        self.elements
            .get(element)
            .filter(|info| info.has_message())
            .or(self.description.as_ref())
            .cloned()
    }

    /// Whether any content is present.
    #[must_use]
    pub fn has_tooltip(&self) -> bool {
        self.description
            .as_ref()
            .is_some_and(TooltipInfo::has_message)
            || self.elements.values().any(TooltipInfo::has_message)
    }
}

/// The kind of an owner in an [`OwnerTree`].
#[derive(Clone, Debug)]
pub enum OwnerKind<E> {
    /// A component that can supply tooltip content.
    Component(ComponentTooltip<E>),
    /// A structural container that is not tooltip-aware.
    Layout,
}

#[derive(Clone, Debug)]
struct Node<E> {
    parent: Option<OwnerId>,
    kind: OwnerKind<E>,
}

#[derive(Clone, Debug)]
struct Slot<E> {
    generation: u32,
    node: Option<Node<E>>,
}

/// An arena of tooltip owners with explicit parent links.
///
/// Elements (any hashable key, such as a DOM-ish node id) are bound to the
/// owner that renders them. Unbound elements resolve to no owner, which is how
/// detached elements are represented.
#[derive(Clone, Debug)]
pub struct OwnerTree<E> {
    slots: Vec<Slot<E>>,
    free: Vec<u32>,
    elements: HashMap<E, OwnerId>,
}

impl<E: Eq + Hash> Default for OwnerTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash> OwnerTree<E> {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            elements: HashMap::new(),
        }
    }

    /// Insert an owner under `parent` (or as a root).
    ///
    /// A stale `parent` is stored as-is and behaves like a missing parent.
    pub fn insert(&mut self, parent: Option<OwnerId>, kind: OwnerKind<E>) -> OwnerId {
        let node = Node { parent, kind };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            OwnerId(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "owner counts stay far below u32::MAX"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            OwnerId(idx, 1)
        }
    }

    /// Remove an owner and unbind every element bound to it.
    ///
    /// Children are kept; their parent link becomes stale, which ends
    /// resolution at them.
    pub fn remove(&mut self, id: OwnerId) -> Option<OwnerKind<E>> {
        self.node(id)?;
        let node = self.slots[id.idx()].node.take()?;
        self.free.push(id.0);
        self.elements.retain(|_, owner| *owner != id);
        Some(node.kind)
    }

    /// Returns `true` if `id` refers to a live owner.
    #[must_use]
    pub fn is_alive(&self, id: OwnerId) -> bool {
        self.node(id).is_some()
    }

    /// Bind `element` to the owner that renders it.
    pub fn bind(&mut self, element: E, owner: OwnerId) {
        self.elements.insert(element, owner);
    }

    /// Detach an element.
    pub fn unbind(&mut self, element: &E) -> Option<OwnerId> {
        self.elements.remove(element)
    }

    /// The kind of a live owner.
    #[must_use]
    pub fn kind(&self, id: OwnerId) -> Option<&OwnerKind<E>> {
        self.node(id).map(|n| &n.kind)
    }

    /// Mutable access to a live owner's kind, e.g. to update its content.
    pub fn kind_mut(&mut self, id: OwnerId) -> Option<&mut OwnerKind<E>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut().map(|n| &mut n.kind)
    }

    fn node(&self, id: OwnerId) -> Option<&Node<E>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn component(&self, id: OwnerId) -> Option<&ComponentTooltip<E>> {
        match self.kind(id)? {
            OwnerKind::Component(c) => Some(c),
            OwnerKind::Layout => None,
        }
    }
}

impl<E: Eq + Hash> TooltipOwners<E> for OwnerTree<E> {
    type Owner = OwnerId;

    fn owner_for(&self, element: &E) -> Option<OwnerId> {
        let id = *self.elements.get(element)?;
        self.is_alive(id).then_some(id)
    }

    fn parent(&self, owner: OwnerId) -> Option<OwnerId> {
        let parent = self.node(owner)?.parent?;
        self.is_alive(parent).then_some(parent)
    }

    fn can_own_tooltips(&self, owner: OwnerId) -> bool {
        self.component(owner).is_some()
    }

    fn tooltip_info(&self, owner: OwnerId, element: &E) -> Option<TooltipInfo> {
        self.component(owner)?.info_for(element)
    }

    fn has_tooltip(&self, owner: OwnerId) -> bool {
        self.component(owner).is_some_and(ComponentTooltip::has_tooltip)
    }
}

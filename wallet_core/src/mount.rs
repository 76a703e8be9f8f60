//! Click bindings for page elements.
//!
//! Content swapped in by the page-update library is scanned through
//! [`crate::Bridge::attach`]; binding the same element twice is a no-op.

use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::page::ElementId;

/// What a click on a bound element does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Connect,
    Disconnect,
    /// Sign the element's `encoded-tx` locally and submit it with its `tx-id`.
    SignAndSubmit,
    /// Prepare via the element's `data-endpoint`, then sign and send in the wallet.
    SignAndSend,
}

#[derive(Default, Debug)]
pub struct Bindings {
    actions: RefCell<HashMap<ElementId, Action>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `element` unless it already has an action. Returns `true` only
    /// for a new binding; the first action bound to an element wins.
    pub fn bind(&self, element: ElementId, action: Action) -> bool {
        match self.actions.borrow_mut().entry(element) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(action);
                true
            }
        }
    }

    pub fn action_for(&self, element: ElementId) -> Option<Action> {
        self.actions.borrow().get(&element).copied()
    }

    /// Drop bindings for elements that no longer exist.
    pub fn retain(&self, mut alive: impl FnMut(ElementId) -> bool) {
        self.actions.borrow_mut().retain(|element, _| alive(*element));
    }

    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }
}

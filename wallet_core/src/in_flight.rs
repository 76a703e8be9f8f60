//! Per-key exclusion for signing flows.
//!
//! Flows run on a single-threaded event loop, so a `RefCell` set is enough.
//! The guard is dropped when the flow future completes or is dropped.

use std::cell::RefCell;
use std::collections::HashSet;

use bridge_types::BridgeError;

#[derive(Default, Debug)]
pub struct InFlight {
    keys: RefCell<HashSet<String>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`, or fail if a flow already holds it.
    pub fn acquire(&self, key: impl Into<String>) -> Result<InFlightGuard<'_>, BridgeError> {
        let key = key.into();
        if !self.keys.borrow_mut().insert(key.clone()) {
            return Err(BridgeError::FlowInProgress(key));
        }
        Ok(InFlightGuard { owner: self, key })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.borrow().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    owner: &'a InFlight,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.keys.borrow_mut().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let in_flight = InFlight::new();
        let guard = in_flight.acquire("tx:1").unwrap();
        assert!(matches!(
            in_flight.acquire("tx:1"),
            Err(BridgeError::FlowInProgress(key)) if key == "tx:1"
        ));
        assert!(in_flight.acquire("tx:2").is_ok());
        drop(guard);
        assert!(in_flight.is_empty());
        assert!(in_flight.acquire("tx:1").is_ok());
    }
}

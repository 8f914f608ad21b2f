//! Screen state
//!
//! One explicit mutable state value owned by the session. Only the session
//! task writes it; background lookups hand their outcome back instead of
//! touching it.

use crate::coord::Coordinates;
use crate::geo::Address;
use crate::picker::address::shorten_address;

/// Transient per-session state, discarded with the session
#[derive(Debug, Clone)]
pub struct ScreenState {
    /// Last-settled camera center
    pub center: Coordinates,
    /// Addresses from the last successful lookup; `None` when the last
    /// lookup failed or returned nothing
    pub current_addresses: Option<Vec<Address>>,
    pub short_address: String,
    pub full_address: String,
}

impl ScreenState {
    pub fn new(center: Coordinates) -> Self {
        Self {
            center,
            current_addresses: None,
            short_address: String::new(),
            full_address: String::new(),
        }
    }

    /// Store a lookup's address candidates
    ///
    /// An empty list counts as "no address here" and clears instead.
    pub fn apply_addresses(&mut self, addresses: Vec<Address>) {
        match addresses.first() {
            Some(best) => {
                self.full_address = best.display_name.clone();
                self.short_address = shorten_address(&self.full_address);
                self.current_addresses = Some(addresses);
            }
            None => self.clear_addresses(),
        }
    }

    /// Forget any previously fetched addresses
    pub fn clear_addresses(&mut self) {
        self.current_addresses = None;
        self.short_address.clear();
        self.full_address.clear();
    }
}

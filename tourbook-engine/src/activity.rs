//! Activities offered at a destination.
use serde::Serialize;

use crate::error::BookingError;
use crate::numbers::format_decimal;
use crate::registry::{DestinationId, PassengerId};

/// A bookable offering with a cost and a bounded roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    name: String,
    description: String,
    cost: f64,
    /// Remaining places.
    capacity: u64,
    /// Places at construction, after clamping. Never changes.
    configured_capacity: u64,
    destination: DestinationId,
    signed_up_passengers: Vec<PassengerId>,
}

impl Activity {
    /// Build an activity. Negative capacities are clamped to 0; costs are taken as given.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        cost: f64,
        capacity: i64,
        destination: DestinationId,
    ) -> Self {
        let capacity = u64::try_from(capacity).unwrap_or(0);
        Self {
            name: name.into(),
            description: description.into(),
            cost,
            capacity,
            configured_capacity: capacity,
            destination,
            signed_up_passengers: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Places still available.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub const fn configured_capacity(&self) -> u64 {
        self.configured_capacity
    }

    #[must_use]
    pub const fn destination(&self) -> DestinationId {
        self.destination
    }

    /// Passengers on the roster, in sign-up order.
    #[must_use]
    pub fn signed_up_passengers(&self) -> &[PassengerId] {
        &self.signed_up_passengers
    }

    #[must_use]
    pub const fn has_space(&self) -> bool {
        self.capacity > 0
    }

    /// Put a passenger on the roster, consuming one place. No balance is involved.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::CapacityExhausted`] when no place is left.
    pub fn sign_up_passenger(&mut self, passenger: PassengerId) -> Result<(), BookingError> {
        if !self.has_space() {
            return Err(BookingError::CapacityExhausted {
                activity: self.name.clone(),
            });
        }
        self.signed_up_passengers.push(passenger);
        self.capacity -= 1;
        Ok(())
    }

    /// Consume one place without touching the roster. Does nothing at 0.
    pub fn decrease_capacity(&mut self) {
        self.capacity = self.capacity.saturating_sub(1);
    }

    /// One-line summary: `- {name} at {destination} (Capacity: .., Available Spaces: .., Cost: ..)`.
    ///
    /// "Capacity" is the configured capacity, so places consumed by priced
    /// sign-ups (which skip the roster) do not skew it.
    #[must_use]
    pub fn details(&self, destination_name: &str) -> String {
        format!(
            "- {} at {} (Capacity: {}, Available Spaces: {}, Cost: {})",
            self.name,
            destination_name,
            self.configured_capacity,
            self.capacity,
            format_decimal(self.cost)
        )
    }
}

//! Arena owning every destination, activity and passenger.
//!
//! Entities refer to each other through the typed ids defined here, so the
//! activity -> destination back-reference never forms an ownership cycle.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::destination::Destination;
use crate::error::BookingError;
use crate::passenger::{Passenger, PassengerNumbers, SignUpReceipt, Tier};
use crate::pricing::PricingPolicy;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(usize);

        impl $name {
            #[must_use]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

arena_id!(
    /// Handle to a [`Destination`] held by a [`Registry`].
    DestinationId
);
arena_id!(
    /// Handle to an [`Activity`] held by a [`Registry`].
    ActivityId
);
arena_id!(
    /// Handle to a [`Passenger`] held by a [`Registry`].
    PassengerId
);

#[derive(Debug, Clone, Default)]
pub struct Registry {
    destinations: Vec<Destination>,
    activities: Vec<Activity>,
    passengers: Vec<Passenger>,
    numbers: PassengerNumbers,
    policy: PricingPolicy,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: PricingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Continue passenger numbering from an existing sequence.
    #[must_use]
    pub fn with_numbers(mut self, numbers: PassengerNumbers) -> Self {
        self.numbers = numbers;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn add_destination(&mut self, destination: Destination) -> DestinationId {
        let id = DestinationId::new(self.destinations.len());
        log::debug!("registered destination {} as {id}", destination.name());
        self.destinations.push(destination);
        id
    }

    /// Create an activity located at `destination`. It is not offered there until
    /// [`Self::attach_activity`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownDestination`] if the destination id is not ours.
    pub fn create_activity(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        cost: f64,
        capacity: i64,
        destination: DestinationId,
    ) -> Result<ActivityId, BookingError> {
        self.destination(destination)?;
        let activity = Activity::new(name, description, cost, capacity, destination);
        let id = ActivityId::new(self.activities.len());
        log::debug!("registered activity {} as {id}", activity.name());
        self.activities.push(activity);
        Ok(id)
    }

    /// Offer an activity at a destination, folding its cost into the destination cost.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is unknown.
    pub fn attach_activity(
        &mut self,
        destination: DestinationId,
        activity: ActivityId,
    ) -> Result<(), BookingError> {
        let entry = self
            .activities
            .get(activity.index())
            .ok_or(BookingError::UnknownActivity(activity))?;
        let place = self
            .destinations
            .get_mut(destination.index())
            .ok_or(BookingError::UnknownDestination(destination))?;
        place.add_activity(activity, entry);
        log::debug!(
            "{} now offers {} (cost {})",
            place.name(),
            entry.name(),
            place.cost()
        );
        Ok(())
    }

    /// Register a passenger, assigning the next passenger number.
    pub fn register_passenger(
        &mut self,
        name: impl Into<String>,
        balance: f64,
        tier: Tier,
    ) -> PassengerId {
        let passenger = Passenger::new(name, balance, tier, &mut self.numbers);
        let id = PassengerId::new(self.passengers.len());
        log::debug!(
            "registered {} passenger {} with number {}",
            tier,
            passenger.name(),
            passenger.number()
        );
        self.passengers.push(passenger);
        id
    }

    /// # Errors
    ///
    /// Returns [`BookingError::UnknownDestination`] if the id is not ours.
    pub fn destination(&self, id: DestinationId) -> Result<&Destination, BookingError> {
        self.destinations
            .get(id.index())
            .ok_or(BookingError::UnknownDestination(id))
    }

    /// # Errors
    ///
    /// Returns [`BookingError::UnknownActivity`] if the id is not ours.
    pub fn activity(&self, id: ActivityId) -> Result<&Activity, BookingError> {
        self.activities
            .get(id.index())
            .ok_or(BookingError::UnknownActivity(id))
    }

    /// Mutable access for the activity's own capacity-only operations.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownActivity`] if the id is not ours.
    pub fn activity_mut(&mut self, id: ActivityId) -> Result<&mut Activity, BookingError> {
        self.activities
            .get_mut(id.index())
            .ok_or(BookingError::UnknownActivity(id))
    }

    /// # Errors
    ///
    /// Returns [`BookingError::UnknownPassenger`] if the id is not ours.
    pub fn passenger(&self, id: PassengerId) -> Result<&Passenger, BookingError> {
        self.passengers
            .get(id.index())
            .ok_or(BookingError::UnknownPassenger(id))
    }

    fn passenger_mut(&mut self, id: PassengerId) -> Result<&mut Passenger, BookingError> {
        self.passengers
            .get_mut(id.index())
            .ok_or(BookingError::UnknownPassenger(id))
    }

    /// Activities offered at a destination, in attachment order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownDestination`] if the id is not ours.
    pub fn activities_at(
        &self,
        destination: DestinationId,
    ) -> Result<impl Iterator<Item = (ActivityId, &Activity)>, BookingError> {
        let place = self.destination(destination)?;
        Ok(place
            .activities()
            .iter()
            .filter_map(move |id| self.activities.get(id.index()).map(|a| (*id, a))))
    }

    /// Put a passenger on an activity roster. Capacity only; no balance is charged.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::CapacityExhausted`] when the activity is full, or an
    /// unknown-id error.
    pub fn sign_up_passenger(
        &mut self,
        activity: ActivityId,
        passenger: PassengerId,
    ) -> Result<(), BookingError> {
        self.passenger(passenger)?;
        self.activity_mut(activity)?.sign_up_passenger(passenger)
    }

    /// Consume one place of an activity offered at `destination`.
    ///
    /// An activity attached more than once loses one place per attachment.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::ActivityNotFound`] if the destination does not offer
    /// the activity; nothing changes in that case.
    pub fn decrease_activity_capacity(
        &mut self,
        destination: DestinationId,
        activity: ActivityId,
    ) -> Result<(), BookingError> {
        let place = self.destination(destination)?;
        let occurrences = place.occurrences(activity);
        if occurrences == 0 {
            return Err(BookingError::ActivityNotFound {
                destination: place.name().to_string(),
                activity: self.activity(activity)?.name().to_string(),
            });
        }
        let entry = self.activity_mut(activity)?;
        for _ in 0..occurrences {
            entry.decrease_capacity();
        }
        Ok(())
    }

    /// Priced sign-up: charge the passenger's tier price, consume a place at the
    /// activity's destination and record the activity on the passenger.
    ///
    /// The roster is left alone; only the package path writes to it. If the
    /// activity was never attached to its destination the passenger is still
    /// charged and recorded, but no place is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::CapacityExhausted`] or
    /// [`BookingError::InsufficientBalance`] without changing anything.
    pub fn sign_up_for_activity(
        &mut self,
        passenger: PassengerId,
        activity: ActivityId,
    ) -> Result<SignUpReceipt, BookingError> {
        let policy = self.policy;
        let entry = self.activity(activity)?;
        let (cost, destination) = (entry.cost(), entry.destination());
        let traveller = self.passenger(passenger)?;

        if !entry.has_space() {
            log::warn!(
                "{} could not sign up for {}: activity is full",
                traveller.name(),
                entry.name()
            );
            return Err(BookingError::CapacityExhausted {
                activity: entry.name().to_string(),
            });
        }
        let price = traveller.tier().activity_price(cost, &policy);
        if !traveller.can_sign_up(cost, &policy) {
            log::warn!(
                "{} could not sign up for {}: balance {} below {}",
                traveller.name(),
                entry.name(),
                traveller.balance(),
                price
            );
            return Err(BookingError::InsufficientBalance {
                required: price,
                available: traveller.balance(),
            });
        }

        let activity_name = entry.name().to_string();
        let destination_name = self.destination(destination)?.name().to_string();

        match self.decrease_activity_capacity(destination, activity) {
            Ok(()) => {}
            Err(BookingError::ActivityNotFound { .. }) => log::warn!(
                "{activity_name} is not attached to {destination_name}; no place consumed"
            ),
            Err(err) => return Err(err),
        }

        let traveller = self.passenger_mut(passenger)?;
        traveller.charge(price);
        traveller.record_activity(activity);
        let receipt = SignUpReceipt {
            passenger: traveller.name().to_string(),
            tier: traveller.tier(),
            activity: activity_name,
            destination: destination_name,
            charged: price,
            remaining_balance: traveller.balance(),
        };
        log::debug!("{receipt}");
        Ok(receipt)
    }

    /// Package enrollment step: roster sign-up (full rosters are skipped) plus an
    /// unconditional entry on the passenger. Returns whether the roster took them.
    pub(crate) fn enroll_in_activity(
        &mut self,
        passenger: PassengerId,
        activity: ActivityId,
    ) -> Result<bool, BookingError> {
        let rostered = match self.sign_up_passenger(activity, passenger) {
            Ok(()) => true,
            Err(BookingError::CapacityExhausted { .. }) => false,
            Err(err) => return Err(err),
        };
        self.passenger_mut(passenger)?.record_activity(activity);
        Ok(rostered)
    }

    /// [`Activity::details`] resolved against the activity's destination.
    ///
    /// # Errors
    ///
    /// Returns an unknown-id error.
    pub fn activity_details(&self, activity: ActivityId) -> Result<String, BookingError> {
        let entry = self.activity(activity)?;
        let place = self.destination(entry.destination())?;
        Ok(entry.details(place.name()))
    }

    /// One line per activity offered at the destination, each ending in a newline.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownDestination`] if the id is not ours.
    pub fn destination_activity_details(
        &self,
        destination: DestinationId,
    ) -> Result<String, BookingError> {
        let place = self.destination(destination)?;
        Ok(self
            .activities_at(destination)?
            .map(|(_, activity)| place.activity_line(activity))
            .collect())
    }
}

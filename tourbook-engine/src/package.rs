//! Travel packages: an itinerary of destinations and a bounded passenger list.
use std::fmt;

use serde::Serialize;

use crate::error::BookingError;
use crate::numbers::{accumulate_truncated, i64_to_f64};
use crate::passenger::Passenger;
use crate::registry::{ActivityId, DestinationId, PassengerId, Registry};
use crate::report::PackageReport;

/// Outcome of a successful [`TravelPackage::add_passenger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub passenger: String,
    pub package: String,
    /// Price checked against the balance at enrollment (never charged).
    pub total_cost: i64,
    /// Activities recorded on the passenger, one per offered activity.
    pub activities_joined: usize,
    /// Activities whose roster was already full.
    pub full_rosters: Vec<ActivityId>,
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} added to {}.", self.passenger, self.package)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelPackage {
    name: String,
    passenger_capacity: usize,
    itinerary: Vec<DestinationId>,
    passengers: Vec<PassengerId>,
    base_cost: i64,
}

impl TravelPackage {
    #[must_use]
    pub fn new(name: impl Into<String>, passenger_capacity: usize) -> Self {
        Self {
            name: name.into(),
            passenger_capacity,
            itinerary: Vec::new(),
            passengers: Vec::new(),
            base_cost: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn passenger_capacity(&self) -> usize {
        self.passenger_capacity
    }

    #[must_use]
    pub fn itinerary(&self) -> &[DestinationId] {
        &self.itinerary
    }

    #[must_use]
    pub fn passengers(&self) -> &[PassengerId] {
        &self.passengers
    }

    #[must_use]
    pub const fn base_cost(&self) -> i64 {
        self.base_cost
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.passenger_capacity
    }

    /// Append a destination to the itinerary.
    ///
    /// The base cost grows by the destination cost and then by each activity
    /// offered there right now. Since the destination cost already includes its
    /// activities, they are counted twice; activities attached later are never
    /// counted.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::UnknownDestination`] if the id is not in `registry`.
    pub fn add_destination(
        &mut self,
        registry: &Registry,
        destination: DestinationId,
    ) -> Result<(), BookingError> {
        let place = registry.destination(destination)?;
        let mut base_cost = self.base_cost.saturating_add(place.cost());
        for (_, activity) in registry.activities_at(destination)? {
            base_cost = accumulate_truncated(base_cost, activity.cost());
        }
        self.itinerary.push(destination);
        self.base_cost = base_cost;
        log::debug!(
            "{} added to {} itinerary (base cost {})",
            place.name(),
            self.name,
            self.base_cost
        );
        Ok(())
    }

    /// What joining this package costs the passenger, by tier, priced with the
    /// registry's policy so enrollment and activity sign-ups share one rate.
    #[must_use]
    pub fn calculate_total_cost(&self, registry: &Registry, passenger: &Passenger) -> i64 {
        passenger
            .tier()
            .package_price(self.base_cost, registry.policy())
    }

    /// Enroll a passenger and sign them up for every activity across the itinerary.
    ///
    /// Rosters take the passenger where they have space; the passenger's own
    /// activity list gets one entry per activity either way. Nothing is charged
    /// and no duplicate check is made against earlier sign-ups.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::PackageFull`] or [`BookingError::InsufficientBalance`]
    /// without changing anything.
    pub fn add_passenger(
        &mut self,
        registry: &mut Registry,
        passenger: PassengerId,
    ) -> Result<Enrollment, BookingError> {
        let traveller = registry.passenger(passenger)?;
        if self.is_full() {
            log::warn!(
                "{} is at full capacity; cannot add {}",
                self.name,
                traveller.name()
            );
            return Err(BookingError::PackageFull {
                package: self.name.clone(),
                capacity: self.passenger_capacity,
            });
        }
        let total_cost = self.calculate_total_cost(registry, traveller);
        let required = i64_to_f64(total_cost);
        if traveller.balance() < required {
            log::warn!(
                "insufficient balance for {}; cannot add to {}",
                traveller.name(),
                self.name
            );
            return Err(BookingError::InsufficientBalance {
                required,
                available: traveller.balance(),
            });
        }
        let passenger_name = traveller.name().to_string();

        let mut offered = Vec::new();
        for destination in &self.itinerary {
            offered.extend(registry.activities_at(*destination)?.map(|(id, _)| id));
        }

        self.passengers.push(passenger);
        let mut full_rosters = Vec::new();
        for activity in &offered {
            if !registry.enroll_in_activity(passenger, *activity)? {
                full_rosters.push(*activity);
            }
        }
        if !full_rosters.is_empty() {
            log::warn!(
                "{passenger_name} joined {} without a roster place on {} activities",
                self.name,
                full_rosters.len()
            );
        }

        let enrollment = Enrollment {
            passenger: passenger_name,
            package: self.name.clone(),
            total_cost,
            activities_joined: offered.len(),
            full_rosters,
        };
        log::debug!("{enrollment}");
        Ok(enrollment)
    }

    /// Sum of [`Self::calculate_total_cost`] over the enrolled passengers, recomputed each call.
    #[must_use]
    pub fn calculate_total_cost_for_all_passengers(&self, registry: &Registry) -> i64 {
        self.passengers
            .iter()
            .filter_map(|id| registry.passenger(*id).ok())
            .map(|passenger| self.calculate_total_cost(registry, passenger))
            .sum()
    }

    /// Snapshot of the package for rendering or serialisation.
    #[must_use]
    pub fn report(&self, registry: &Registry) -> PackageReport {
        PackageReport::build(self, registry)
    }

    /// Full text report: itinerary, passengers, cost breakdown and activities.
    #[must_use]
    pub fn generate_report(&self, registry: &Registry) -> String {
        self.report(registry).render()
    }

    #[must_use]
    pub fn itinerary_text(&self, registry: &Registry) -> String {
        self.report(registry).itinerary_text().to_string()
    }

    #[must_use]
    pub fn passenger_list_text(&self, registry: &Registry) -> String {
        self.report(registry).passenger_list_text().to_string()
    }

    #[must_use]
    pub fn activity_details_text(&self, registry: &Registry) -> String {
        self.report(registry).activity_details_text().to_string()
    }
}

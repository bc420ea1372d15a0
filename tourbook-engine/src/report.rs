//! Read-side snapshots of a travel package and their text layouts.
use std::fmt;

use serde::Serialize;

use crate::activity::Activity;
use crate::numbers::format_decimal;
use crate::package::TravelPackage;
use crate::passenger::Tier;
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLine {
    pub name: String,
    pub description: String,
    pub destination: String,
    pub cost: f64,
    /// Places remaining.
    pub capacity: u64,
    pub configured_capacity: u64,
    pub roster: usize,
}

impl ActivityLine {
    fn from_activity(activity: &Activity, destination: &str) -> Self {
        Self {
            name: activity.name().to_string(),
            description: activity.description().to_string(),
            destination: destination.to_string(),
            cost: activity.cost(),
            capacity: activity.capacity(),
            configured_capacity: activity.configured_capacity(),
            roster: activity.signed_up_passengers().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryEntry {
    pub destination: String,
    pub cost: i64,
    pub activities: Vec<ActivityLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerLine {
    pub name: String,
    pub number: u64,
    pub tier: Tier,
    pub balance: f64,
    pub total_cost: i64,
    pub activities: usize,
}

/// Everything the text layouts need, captured at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageReport {
    pub name: String,
    pub passenger_capacity: usize,
    pub base_cost: i64,
    pub total_cost_all_passengers: i64,
    pub itinerary: Vec<ItineraryEntry>,
    pub passengers: Vec<PassengerLine>,
}

impl PackageReport {
    /// Capture the package as it stands. Ids missing from `registry` are skipped.
    #[must_use]
    pub fn build(package: &TravelPackage, registry: &Registry) -> Self {
        let itinerary = package
            .itinerary()
            .iter()
            .filter_map(|id| {
                let place = registry.destination(*id).ok()?;
                let activities = registry
                    .activities_at(*id)
                    .ok()?
                    .map(|(_, activity)| ActivityLine::from_activity(activity, place.name()))
                    .collect();
                Some(ItineraryEntry {
                    destination: place.name().to_string(),
                    cost: place.cost(),
                    activities,
                })
            })
            .collect();

        let passengers = package
            .passengers()
            .iter()
            .filter_map(|id| registry.passenger(*id).ok())
            .map(|passenger| PassengerLine {
                name: passenger.name().to_string(),
                number: passenger.number(),
                tier: passenger.tier(),
                balance: passenger.balance(),
                total_cost: package.calculate_total_cost(registry, passenger),
                activities: passenger.signed_up_activities().len(),
            })
            .collect();

        Self {
            name: package.name().to_string(),
            passenger_capacity: package.passenger_capacity(),
            base_cost: package.base_cost(),
            total_cost_all_passengers: package.calculate_total_cost_for_all_passengers(registry),
            itinerary,
            passengers,
        }
    }

    /// The full report layout.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub const fn itinerary_text(&self) -> ItineraryText<'_> {
        ItineraryText(self)
    }

    #[must_use]
    pub const fn passenger_list_text(&self) -> PassengerListText<'_> {
        PassengerListText(self)
    }

    #[must_use]
    pub const fn activity_details_text(&self) -> ActivityDetailsText<'_> {
        ActivityDetailsText(self)
    }

    fn activities(&self) -> impl Iterator<Item = &ActivityLine> {
        self.itinerary.iter().flat_map(|entry| entry.activities.iter())
    }
}

impl fmt::Display for PackageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Travel Package Report for {}", self.name)?;
        writeln!(f, "Itinerary:")?;
        for entry in &self.itinerary {
            writeln!(f, "  - {}", entry.destination)?;
            for activity in &entry.activities {
                writeln!(
                    f,
                    "    - {} (Cost: {}, Capacity: {})",
                    activity.name,
                    format_decimal(activity.cost),
                    activity.capacity
                )?;
            }
        }
        writeln!(f, "Passengers:")?;
        writeln!(f, "  - Total Passengers: {}", self.passengers.len())?;
        for passenger in &self.passengers {
            writeln!(
                f,
                "    - {} ({}, Balance: {}, Total Cost: {})",
                passenger.name,
                passenger.tier,
                format_decimal(passenger.balance),
                passenger.total_cost
            )?;
        }
        writeln!(f, "Cost Breakdown:")?;
        writeln!(f, "  - Base Cost: {}", self.base_cost)?;
        writeln!(
            f,
            "  - Total Cost for All Passengers: {}",
            self.total_cost_all_passengers
        )?;
        writeln!(f, "Activities:")?;
        for entry in &self.itinerary {
            writeln!(f, "  - {}", entry.destination)?;
            for activity in &entry.activities {
                writeln!(
                    f,
                    "    - {} (Capacity: {}, Available Spaces: {})",
                    activity.name, activity.capacity, activity.capacity
                )?;
            }
        }
        Ok(())
    }
}

/// Destinations in order, each followed by its activities.
#[derive(Debug, Clone, Copy)]
pub struct ItineraryText<'a>(&'a PackageReport);

impl fmt::Display for ItineraryText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Travel Package Itinerary for {}:", self.0.name)?;
        for entry in &self.0.itinerary {
            writeln!(f, "{}:", entry.destination)?;
            for activity in &entry.activities {
                writeln!(
                    f,
                    "  - {} (Cost: {}, Capacity: {}, Description: {})",
                    activity.name,
                    format_decimal(activity.cost),
                    activity.capacity,
                    activity.description
                )?;
            }
        }
        Ok(())
    }
}

/// Capacity header followed by one line per enrolled passenger.
#[derive(Debug, Clone, Copy)]
pub struct PassengerListText<'a>(&'a PackageReport);

impl fmt::Display for PassengerListText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Passenger List for Travel Package {}:", self.0.name)?;
        writeln!(f, "Passenger Capacity: {}", self.0.passenger_capacity)?;
        writeln!(f, "Number of Passengers Enrolled: {}", self.0.passengers.len())?;
        for passenger in &self.0.passengers {
            writeln!(
                f,
                "- {} (Passenger Number: {}, Balance: {})",
                passenger.name,
                passenger.number,
                format_decimal(passenger.balance)
            )?;
        }
        Ok(())
    }
}

/// Every activity across the itinerary with its remaining places.
#[derive(Debug, Clone, Copy)]
pub struct ActivityDetailsText<'a>(&'a PackageReport);

impl fmt::Display for ActivityDetailsText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Activity Details for Travel Package {}:", self.0.name)?;
        for activity in self.0.activities() {
            writeln!(
                f,
                "- {} at {} (Capacity: {}, Available Spaces: {}, Cost: {})",
                activity.name,
                activity.destination,
                activity.capacity,
                activity.capacity,
                format_decimal(activity.cost)
            )?;
        }
        Ok(())
    }
}

//! Tourbook Booking Engine
//!
//! Core booking logic for travel packages: destinations offering activities,
//! passengers of different tiers enrolling under capacity and balance
//! constraints, and packages pricing an itinerary per passenger.
//! This crate performs no I/O; callers decide how to print results.

pub mod activity;
pub mod destination;
pub mod error;
pub mod numbers;
pub mod package;
pub mod passenger;
pub mod pricing;
pub mod registry;
pub mod report;

// Re-export commonly used types
pub use activity::Activity;
pub use destination::Destination;
pub use error::{BookingError, ConfigError};
pub use package::{Enrollment, TravelPackage};
pub use passenger::{Passenger, PassengerNumbers, SignUpReceipt, Tier};
pub use pricing::{NormalPackageCharge, PricingPolicy};
pub use registry::{ActivityId, DestinationId, PassengerId, Registry};
pub use report::{
    ActivityDetailsText, ActivityLine, ItineraryEntry, ItineraryText, PackageReport, PassengerLine,
    PassengerListText,
};

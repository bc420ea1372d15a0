//! Booking outcome taxonomy.
use thiserror::Error;

use crate::registry::{ActivityId, DestinationId, PassengerId};

/// Reasons a booking operation was rejected. Every rejection leaves state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("{activity} is full")]
    CapacityExhausted { activity: String },
    #[error("insufficient balance: {required} required, {available} available")]
    InsufficientBalance { required: f64, available: f64 },
    #[error("{package} is at full capacity ({capacity} passengers)")]
    PackageFull { package: String, capacity: usize },
    #[error("{activity} is not offered at {destination}")]
    ActivityNotFound {
        destination: String,
        activity: String,
    },
    #[error("unknown destination {0}")]
    UnknownDestination(DestinationId),
    #[error("unknown activity {0}")]
    UnknownActivity(ActivityId),
    #[error("unknown passenger {0}")]
    UnknownPassenger(PassengerId),
}

impl BookingError {
    /// Whether the rejection comes from the booking rules rather than a bad id.
    #[must_use]
    pub const fn is_rule_rejection(&self) -> bool {
        matches!(
            self,
            Self::CapacityExhausted { .. }
                | Self::InsufficientBalance { .. }
                | Self::PackageFull { .. }
                | Self::ActivityNotFound { .. }
        )
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

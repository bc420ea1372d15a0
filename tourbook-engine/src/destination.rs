//! Destinations and the activities attached to them.
use serde::Serialize;

use crate::activity::Activity;
use crate::numbers::{accumulate_truncated, format_decimal};
use crate::registry::ActivityId;

/// A named place. Its cost starts at a base value and absorbs each attached activity's cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    name: String,
    activities: Vec<ActivityId>,
    cost: i64,
}

impl Destination {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_cost(name, 0)
    }

    #[must_use]
    pub fn with_cost(name: impl Into<String>, cost: i64) -> Self {
        Self {
            name: name.into(),
            activities: Vec::new(),
            cost,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base cost plus attached activity costs, each addition truncated to whole units.
    #[must_use]
    pub const fn cost(&self) -> i64 {
        self.cost
    }

    /// Attached activities in attachment order.
    #[must_use]
    pub fn activities(&self) -> &[ActivityId] {
        &self.activities
    }

    #[must_use]
    pub fn offers(&self, activity: ActivityId) -> bool {
        self.activities.contains(&activity)
    }

    /// Number of times an activity was attached here.
    #[must_use]
    pub fn occurrences(&self, activity: ActivityId) -> usize {
        self.activities.iter().filter(|id| **id == activity).count()
    }

    /// Attach an activity and fold its cost into the destination cost.
    pub fn add_activity(&mut self, id: ActivityId, activity: &Activity) {
        self.activities.push(id);
        self.cost = accumulate_truncated(self.cost, activity.cost());
    }

    /// Line used by the destination-level listing. Unlike [`Activity::details`]
    /// it shows the remaining places under both "Capacity" and "Available Spaces".
    #[must_use]
    pub fn activity_line(&self, activity: &Activity) -> String {
        format!(
            "- {} at {} (Capacity: {}, Available Spaces: {}, Cost: {})\n",
            activity.name(),
            self.name,
            activity.capacity(),
            activity.capacity(),
            format_decimal(activity.cost())
        )
    }
}

//! Passengers, their tiers and the passenger number sequence.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numbers::format_decimal;
use crate::pricing::{NormalPackageCharge, PricingPolicy};
use crate::registry::ActivityId;

/// Membership tier. Decides what an activity costs and whether balance is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Pays list price.
    Normal,
    /// Pays `silver_rate` of list price, truncated package price.
    Silver,
    /// Activities are free and never balance-checked.
    Gold,
}

impl Tier {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
        }
    }

    /// Price charged for an activity with the given list cost.
    #[must_use]
    pub fn activity_price(self, cost: f64, policy: &PricingPolicy) -> f64 {
        match self {
            Self::Normal => cost,
            Self::Silver => policy.silver_rate * cost,
            Self::Gold => 0.0,
        }
    }

    /// Price owed for joining a package with the given base cost.
    ///
    /// Gold pays the full base cost. Normal owes nothing unless the policy
    /// says otherwise; see [`NormalPackageCharge`].
    #[must_use]
    pub fn package_price(self, base_cost: i64, policy: &PricingPolicy) -> i64 {
        match self {
            Self::Gold => base_cost,
            Self::Silver => policy.silver_package_price(base_cost),
            Self::Normal => match policy.normal_package_charge {
                NormalPackageCharge::Waived => 0,
                NormalPackageCharge::BaseCost => base_cost,
            },
        }
    }

    #[must_use]
    pub const fn checks_balance(self) -> bool {
        !matches!(self, Self::Gold)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hands out passenger numbers. Numbers increase by one and are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerNumbers {
    next: u64,
}

impl PassengerNumbers {
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// The number the next call to [`Self::issue`] will return.
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }

    pub fn issue(&mut self) -> u64 {
        let number = self.next;
        self.next = self.next.saturating_add(1);
        number
    }
}

/// A traveller with a balance and the activities they joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    name: String,
    number: u64,
    balance: f64,
    signed_up_activities: Vec<ActivityId>,
    tier: Tier,
}

impl Passenger {
    /// Build a passenger, drawing the next number from `numbers`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        balance: f64,
        tier: Tier,
        numbers: &mut PassengerNumbers,
    ) -> Self {
        Self {
            name: name.into(),
            number: numbers.issue(),
            balance,
            signed_up_activities: Vec::new(),
            tier,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    #[must_use]
    pub const fn balance(&self) -> f64 {
        self.balance
    }

    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Activities joined through either enrollment path, duplicates included.
    #[must_use]
    pub fn signed_up_activities(&self) -> &[ActivityId] {
        &self.signed_up_activities
    }

    /// Whether the balance covers the tier price of an activity with list cost `cost`.
    ///
    /// Earlier versions compared the other way round (`cost >= balance`), which
    /// admitted exactly the passengers who could not pay. This checks that the
    /// balance covers the price, the same price the priced sign-up charges.
    #[must_use]
    pub fn can_sign_up(&self, cost: f64, policy: &PricingPolicy) -> bool {
        !self.tier.checks_balance() || self.balance >= self.tier.activity_price(cost, policy)
    }

    pub(crate) fn charge(&mut self, amount: f64) {
        self.balance -= amount;
    }

    pub(crate) fn record_activity(&mut self, activity: ActivityId) {
        self.signed_up_activities.push(activity);
    }
}

/// Confirmation of a priced activity sign-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignUpReceipt {
    pub passenger: String,
    pub tier: Tier,
    pub activity: String,
    pub destination: String,
    pub charged: f64,
    pub remaining_balance: f64,
}

impl fmt::Display for SignUpReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) signed up for {} at {}",
            self.passenger, self.tier, self.activity, self.destination
        )?;
        if self.tier == Tier::Gold {
            f.write_str(" for a discounted cost of 0")
        } else {
            write!(f, " for a cost of {}", format_decimal(self.charged))
        }
    }
}

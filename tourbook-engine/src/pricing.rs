//! Tier pricing policy.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::numbers::scale_truncated;

/// How a Normal-tier passenger is charged when joining a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalPackageCharge {
    /// Normal passengers owe nothing at enrollment. Long-standing behavior,
    /// kept as the default even though it undercuts the Silver tier.
    #[default]
    Waived,
    /// Normal passengers owe the full package base cost.
    BaseCost,
}

/// Pricing knobs shared by activity sign-ups and package enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Fraction of the list price a Silver passenger pays.
    #[serde(default = "PricingPolicy::default_silver_rate")]
    pub silver_rate: f64,
    #[serde(default)]
    pub normal_package_charge: NormalPackageCharge,
}

impl PricingPolicy {
    const fn default_silver_rate() -> f64 {
        0.9
    }

    /// Load a policy from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or `silver_rate` lies outside `0.0..=1.0`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if `silver_rate` is not a finite value in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.silver_rate) {
            return Err(ConfigError::RangeViolation {
                field: "silver_rate",
                min: 0.0,
                max: 1.0,
                value: self.silver_rate,
            });
        }
        Ok(())
    }

    /// Package price for a Silver passenger, truncated to whole units.
    #[must_use]
    pub fn silver_package_price(&self, base_cost: i64) -> i64 {
        scale_truncated(base_cost, self.silver_rate)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            silver_rate: Self::default_silver_rate(),
            normal_package_charge: NormalPackageCharge::default(),
        }
    }
}

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tourbook_engine::{
    ActivityId, Destination, PassengerId, PricingPolicy, Registry, Tier, TravelPackage,
};

const DEMO_SCENARIO: &str = include_str!("../assets/demo_scenario.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub name: String,
    pub passenger_capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: f64,
    pub capacity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSpec {
    pub name: String,
    #[serde(default)]
    pub base_cost: Option<i64>,
    #[serde(default)]
    pub activities: Vec<ActivitySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerSpec {
    pub name: String,
    pub balance: f64,
    #[serde(default = "default_tier")]
    pub tier: Tier,
}

const fn default_tier() -> Tier {
    Tier::Normal
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpSpec {
    pub passenger: String,
    pub activity: String,
}

/// A scripted booking session: what exists, who enrolls, who signs up for what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub package: PackageSpec,
    #[serde(default)]
    pub destinations: Vec<DestinationSpec>,
    #[serde(default)]
    pub passengers: Vec<PassengerSpec>,
    #[serde(default)]
    pub enroll: Vec<String>,
    #[serde(default)]
    pub sign_ups: Vec<SignUpSpec>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json).context("invalid scenario JSON")?;
        scenario.check_names()?;
        Ok(scenario)
    }

    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_SCENARIO).context("built-in demo scenario")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::demo();
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load {}", path.display()))
    }

    /// Every name referenced by `enroll` and `sign_ups` must be declared, and
    /// declared names must be unique so lookups are unambiguous.
    fn check_names(&self) -> Result<()> {
        let mut passengers = HashSet::new();
        for passenger in &self.passengers {
            if !passengers.insert(passenger.name.as_str()) {
                bail!("passenger {} is declared twice", passenger.name);
            }
        }
        let mut activities = HashSet::new();
        for activity in self.destinations.iter().flat_map(|d| d.activities.iter()) {
            if !activities.insert(activity.name.as_str()) {
                bail!("activity {} is declared twice", activity.name);
            }
        }
        for name in &self.enroll {
            if !passengers.contains(name.as_str()) {
                bail!("enroll names unknown passenger {name}");
            }
        }
        for sign_up in &self.sign_ups {
            if !passengers.contains(sign_up.passenger.as_str()) {
                bail!("sign-up names unknown passenger {}", sign_up.passenger);
            }
            if !activities.contains(sign_up.activity.as_str()) {
                bail!("sign-up names unknown activity {}", sign_up.activity);
            }
        }
        Ok(())
    }

    /// Register everything the scenario declares and lay out the package itinerary.
    ///
    /// Activities are attached before their destination joins the itinerary, so
    /// the package base cost sees them.
    pub fn build(&self, policy: PricingPolicy) -> Result<World> {
        let mut registry = Registry::with_policy(policy);
        let mut package = TravelPackage::new(&self.package.name, self.package.passenger_capacity);
        let mut activities = HashMap::new();
        let mut passengers = HashMap::new();

        for spec in &self.destinations {
            let destination = registry.add_destination(Destination::with_cost(
                &spec.name,
                spec.base_cost.unwrap_or(0),
            ));
            for activity in &spec.activities {
                let id = registry.create_activity(
                    &activity.name,
                    &activity.description,
                    activity.cost,
                    activity.capacity,
                    destination,
                )?;
                registry.attach_activity(destination, id)?;
                activities.insert(activity.name.clone(), id);
            }
            package.add_destination(&registry, destination)?;
        }

        for spec in &self.passengers {
            let id = registry.register_passenger(&spec.name, spec.balance, spec.tier);
            passengers.insert(spec.name.clone(), id);
        }

        Ok(World {
            registry,
            package,
            activities,
            passengers,
        })
    }
}

/// Engine state built from a [`Scenario`], with the name lookups steps need.
#[derive(Debug)]
pub struct World {
    pub registry: Registry,
    pub package: TravelPackage,
    activities: HashMap<String, ActivityId>,
    passengers: HashMap<String, PassengerId>,
}

impl World {
    pub fn passenger(&self, name: &str) -> Result<PassengerId> {
        self.passengers
            .get(name)
            .copied()
            .with_context(|| format!("unknown passenger {name}"))
    }

    pub fn activity(&self, name: &str) -> Result<ActivityId> {
        self.activities
            .get(name)
            .copied()
            .with_context(|| format!("unknown activity {name}"))
    }
}

pub fn load_pricing(path: Option<&Path>) -> Result<PricingPolicy> {
    let Some(path) = path else {
        return Ok(PricingPolicy::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read pricing {}", path.display()))?;
    PricingPolicy::from_json(&json).with_context(|| format!("invalid pricing {}", path.display()))
}

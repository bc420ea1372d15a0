use anyhow::{Context, Result};
use serde::Serialize;
use tourbook_engine::{BookingError, PackageReport, PricingPolicy};

use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Enroll,
    SignUp,
}

impl StepKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::SignUp => "sign-up",
        }
    }
}

/// One scripted action and what the engine said about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub kind: StepKind,
    pub passenger: String,
    /// Package name for enrollments, activity name for sign-ups.
    pub target: String,
    pub succeeded: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub package: String,
    pub steps: Vec<StepOutcome>,
    /// Snapshot taken once every enrollment has been attempted.
    pub after_enrollment: PackageReport,
    pub final_report: PackageReport,
}

impl RunSummary {
    pub fn failed_steps(&self) -> usize {
        self.steps.iter().filter(|step| !step.succeeded).count()
    }

    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(move |step| step.kind == kind)
    }
}

/// Play a scenario: enroll passengers in order, then run the priced sign-ups.
///
/// Booking rule rejections are recorded as failed steps. Anything else, such as
/// an id the registry does not know, aborts the run.
pub fn run_scenario(scenario: &Scenario, policy: PricingPolicy) -> Result<RunSummary> {
    let mut world = scenario.build(policy).context("failed to set up scenario")?;
    let mut steps = Vec::with_capacity(scenario.enroll.len() + scenario.sign_ups.len());

    for name in &scenario.enroll {
        let passenger = world.passenger(name)?;
        let outcome = world.package.add_passenger(&mut world.registry, passenger);
        steps.push(record(
            StepKind::Enroll,
            name,
            world.package.name(),
            outcome.map(|enrollment| enrollment.to_string()),
        )?);
    }
    let after_enrollment = world.package.report(&world.registry);

    for sign_up in &scenario.sign_ups {
        let passenger = world.passenger(&sign_up.passenger)?;
        let activity = world.activity(&sign_up.activity)?;
        let outcome = world.registry.sign_up_for_activity(passenger, activity);
        steps.push(record(
            StepKind::SignUp,
            &sign_up.passenger,
            &sign_up.activity,
            outcome.map(|receipt| receipt.to_string()),
        )?);
    }

    Ok(RunSummary {
        package: world.package.name().to_string(),
        steps,
        after_enrollment,
        final_report: world.package.report(&world.registry),
    })
}

fn record(
    kind: StepKind,
    passenger: &str,
    target: &str,
    outcome: Result<String, BookingError>,
) -> Result<StepOutcome> {
    let (succeeded, message) = match outcome {
        Ok(message) => (true, message),
        Err(err) if err.is_rule_rejection() => (false, err.to_string()),
        Err(err) => {
            return Err(err).with_context(|| {
                format!("{} step for {passenger} on {target} failed", kind.label())
            });
        }
    };
    log::info!("{} {passenger} -> {target}: {message}", kind.label());
    Ok(StepOutcome {
        kind,
        passenger: passenger.to_string(),
        target: target.to_string(),
        succeeded,
        message,
    })
}

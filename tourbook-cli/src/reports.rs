use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use tourbook_engine::numbers::format_decimal;

use crate::run::{RunSummary, StepKind, StepOutcome};

fn status_marker(step: &StepOutcome) -> colored::ColoredString {
    if step.succeeded {
        "✅".green()
    } else {
        "❌".red()
    }
}

fn write_console_steps(
    writer: &mut dyn Write,
    summary: &RunSummary,
    kind: StepKind,
    heading: &str,
) -> Result<()> {
    let mut steps = summary.steps_of(kind).peekable();
    if steps.peek().is_none() {
        return Ok(());
    }
    writeln!(writer, "{}", heading.bright_yellow().bold())?;
    for step in steps {
        let message = if step.succeeded {
            step.message.normal()
        } else {
            step.message.red()
        };
        writeln!(writer, "{} {}", status_marker(step), message)?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn generate_console_report(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    writeln!(
        writer,
        "{}",
        format!("🧳 Tourbook: {}", summary.package)
            .bright_cyan()
            .bold()
    )?;
    writeln!(writer, "{}", "==============================".cyan())?;
    writeln!(writer)?;

    write_console_steps(writer, summary, StepKind::Enroll, "Enrollment")?;

    let enrolled = &summary.after_enrollment;
    writeln!(writer, "{}", enrolled.itinerary_text())?;
    writeln!(writer, "{}", enrolled.passenger_list_text())?;
    writeln!(writer, "{}", enrolled.activity_details_text())?;

    write_console_steps(writer, summary, StepKind::SignUp, "Activity sign-ups")?;

    writeln!(writer, "{}", "📊 Final Package Report".bright_cyan().bold())?;
    writeln!(writer, "{}", "-".repeat(30).cyan())?;
    write!(writer, "{}", summary.final_report)?;
    writeln!(writer)?;

    let total = summary.steps.len();
    let failed = summary.failed_steps();
    writeln!(writer, "Steps run: {total}")?;
    writeln!(writer, "Succeeded: {}", (total - failed).to_string().green())?;
    writeln!(writer, "Rejected: {}", failed.to_string().red())?;
    Ok(())
}

pub fn generate_json_report(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    let json_output = serde_json::to_string_pretty(summary)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(writer: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    writeln!(writer, "# Tourbook Run: {}\n", summary.package)?;

    let total = summary.steps.len();
    let failed = summary.failed_steps();
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Steps run**: {total}")?;
    writeln!(writer, "- **Succeeded**: {}", total - failed)?;
    writeln!(writer, "- **Rejected**: {failed}\n")?;

    writeln!(writer, "## Steps\n")?;
    if summary.steps.is_empty() {
        writeln!(writer, "_No steps executed._\n")?;
    } else {
        writeln!(writer, "| Step | Passenger | Target | Result |")?;
        writeln!(writer, "| --- | --- | --- | --- |")?;
        for step in &summary.steps {
            let status = if step.succeeded { "✅" } else { "❌" };
            writeln!(
                writer,
                "| {} | {} | {} | {status} {} |",
                step.kind.label(),
                step.passenger,
                step.target,
                step.message
            )?;
        }
        writeln!(writer)?;
    }

    let report = &summary.final_report;
    writeln!(writer, "## Passengers\n")?;
    writeln!(writer, "| # | Name | Tier | Balance | Package Cost | Activities |")?;
    writeln!(writer, "| --- | --- | --- | --- | --- | --- |")?;
    for passenger in &report.passengers {
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {} |",
            passenger.number,
            passenger.name,
            passenger.tier,
            format_decimal(passenger.balance),
            passenger.total_cost,
            passenger.activities
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "## Final Report\n")?;
    writeln!(writer, "```text")?;
    write!(writer, "{report}")?;
    writeln!(writer, "```")?;
    Ok(())
}

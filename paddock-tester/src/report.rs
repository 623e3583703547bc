//! Report rendering for planning analysis runs.
use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use paddock_engine::{
    CalendarPlan, PlanSet, RemainingSummary, ScenarioRecommendation, Stage, StopReason,
};

/// Everything one analysis run produced, in output order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<CalendarPlan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breeding_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RemainingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<ScenarioRecommendation>,
    #[serde(skip)]
    pub logs: Vec<String>,
}

impl AnalysisReport {
    pub fn empty() -> Self {
        Self {
            plans: None,
            stop_reason: None,
            breeding_count: None,
            summary: None,
            recommendation: None,
            logs: Vec::new(),
        }
    }

    pub fn record_plans(&mut self, set: PlanSet) {
        self.stop_reason = Some(stop_label(set.stop).to_string());
        self.logs = set.logs;
        self.plans = Some(set.plans);
    }
}

pub const fn stop_label(stop: StopReason) -> &'static str {
    match stop {
        StopReason::FixedPoint => "fixed-point",
        StopReason::IterationCapReached => "iteration-cap",
    }
}

pub fn generate_json_report(out: &mut dyn Write, report: &AnalysisReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &AnalysisReport) -> Result<()> {
    writeln!(out, "# Paddock Planning Report\n")?;
    if let Some(plans) = &report.plans {
        writeln!(out, "## Plans\n")?;
        writeln!(out, "| # | Scenario | Races | Surface | Distance | Factors |")?;
        writeln!(out, "|---|----------|-------|---------|----------|---------|")?;
        for (index, plan) in plans.iter().enumerate() {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                index + 1,
                plan.scenario,
                plan.total_races,
                plan.surface.label(),
                plan.distance.label(),
                factor_line(plan)
            )?;
        }
        if let Some(stop) = &report.stop_reason {
            writeln!(out, "\nStop reason: `{stop}`")?;
        }
        writeln!(out)?;
    }
    if let Some(count) = report.breeding_count {
        writeln!(out, "## Breeding\n\nEstimated careers needed: **{count}**\n")?;
    }
    if let Some(summary) = &report.summary {
        writeln!(out, "## Remaining Races\n")?;
        if summary.all_crown {
            writeln!(out, "All graded races cleared.\n")?;
        } else {
            writeln!(out, "Total remaining: **{}**\n", summary.total)?;
        }
    }
    if let Some(rec) = &report.recommendation {
        writeln!(out, "## Recommendation\n")?;
        writeln!(out, "Scenario: **{:?}**", rec.scenario)?;
        let factors: Vec<String> = rec
            .required_factors
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        writeln!(out, "Required factors: {}\n", factors.join(", "))?;
    }
    Ok(())
}

pub fn generate_console_report(
    out: &mut dyn Write,
    report: &AnalysisReport,
    verbose: bool,
) -> Result<()> {
    if let Some(plans) = &report.plans {
        writeln!(out, "{}", "📅 Calendar Plans".bright_yellow().bold())?;
        writeln!(out, "{}", "-".repeat(30).yellow())?;
        for (index, plan) in plans.iter().enumerate() {
            writeln!(
                out,
                "{} {} - {} races, {} {} leaning, factors [{}]",
                format!("plan {}", index + 1).bright_cyan(),
                plan.scenario.to_string().green(),
                plan.total_races,
                plan.surface.label(),
                plan.distance.label(),
                factor_line(plan)
            )?;
            if verbose {
                write_tracks(out, plan)?;
            }
        }
        if let Some(stop) = &report.stop_reason {
            writeln!(out, "Stopped: {stop}")?;
        }
        if verbose {
            for line in &report.logs {
                writeln!(out, "  {}", line.dimmed())?;
            }
        }
        writeln!(out)?;
    }
    if let Some(count) = report.breeding_count {
        writeln!(
            out,
            "{} {count}",
            "🐎 Estimated careers needed:".bright_yellow().bold()
        )?;
    }
    if let Some(summary) = &report.summary {
        if summary.all_crown {
            writeln!(out, "{}", "👑 All graded races cleared".bright_green().bold())?;
        } else {
            writeln!(
                out,
                "{} {} races remaining",
                "🏇".bright_yellow(),
                summary.total
            )?;
        }
    }
    if let Some(rec) = &report.recommendation {
        let factors: Vec<String> = rec
            .required_factors
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        writeln!(
            out,
            "{} {:?} (factors: {})",
            "🧭 Recommended scenario:".bright_yellow().bold(),
            rec.scenario,
            factors.join(", ")
        )?;
    }
    Ok(())
}

fn write_tracks(out: &mut dyn Write, plan: &CalendarPlan) -> Result<()> {
    for stage in Stage::ALL {
        let filled: Vec<String> = plan
            .track(stage)
            .iter()
            .filter(|slot| !slot.is_empty())
            .map(|slot| {
                format!(
                    "{}/{} {}",
                    slot.month,
                    match slot.half {
                        paddock_engine::Half::First => "1st",
                        paddock_engine::Half::Second => "2nd",
                    },
                    slot.race_name
                )
            })
            .collect();
        if !filled.is_empty() {
            writeln!(out, "    {}: {}", stage.label(), filled.join(" | "))?;
        }
    }
    Ok(())
}

fn factor_line(plan: &CalendarPlan) -> String {
    plan.factors
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

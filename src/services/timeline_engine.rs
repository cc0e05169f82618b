use chrono::{DateTime, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::opportunity::Opportunity;
use crate::domain::planning_config::PlanningConfig;
use crate::domain::stage::Stage;
use crate::services::category_resolver::resolve_category;
use crate::services::effort_calculation::evaluate_service_line;
use crate::services::stage_scheduler::{ScheduleOutOfRange, schedule_stages};
use crate::services::timeline_types::{OpportunityTimeline, StageTimelineEntry};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("opportunity {opportunity_id} has an invalid decision date: {value}")]
    InvalidDate {
        opportunity_id: String,
        value: String,
    },
    #[error("opportunity {0} has no decision date")]
    MissingDecisionDate(String),
    #[error("opportunity {opportunity_id}: {source}")]
    ScheduleOutOfRange {
        opportunity_id: String,
        source: ScheduleOutOfRange,
    },
}

/// Outcome of one opportunity in a batch run.
#[derive(Debug, Clone)]
pub struct TimelineOutcome {
    pub opportunity_id: String,
    pub result: Result<OpportunityTimeline, TimelineError>,
}

/// Runs category resolution, offering counts, effort calculation and backward
/// scheduling for one opportunity.
///
/// Only a missing or malformed decision date fails the calculation;
/// configuration gaps and unmatched TCVs resolve to their defaults.
pub fn calculate_opportunity_timeline(
    opportunity: &Opportunity,
    config: &PlanningConfig,
) -> Result<OpportunityTimeline, TimelineError> {
    let decision_date = parse_decision_date(opportunity)?;
    let timeline_category = resolve_category(opportunity.tcv_millions, &config.categories);
    let current_stage = parse_current_stage(opportunity);

    let schedule = schedule_stages(decision_date, current_stage, &timeline_category, config)
        .map_err(|source| TimelineError::ScheduleOutOfRange {
            opportunity_id: opportunity.opportunity_id.clone(),
            source,
        })?;
    let stages: Vec<Stage> = schedule.iter().map(|scheduled| scheduled.stage).collect();

    let service_lines: Vec<_> = service_line_candidates(opportunity, config)
        .into_iter()
        .filter_map(|service_line| {
            evaluate_service_line(
                opportunity,
                config,
                service_line,
                &timeline_category,
                &stages,
            )
        })
        .collect();

    let mut entries = Vec::with_capacity(service_lines.len() * schedule.len());
    for effort in &service_lines {
        for scheduled in &schedule {
            let fte_required = effort.final_fte(scheduled.stage);
            entries.push(StageTimelineEntry {
                service_line: effort.service_line.clone(),
                stage: scheduled.stage,
                stage_start_date: scheduled.start_date,
                stage_end_date: scheduled.end_date,
                duration_weeks: scheduled.duration_weeks,
                fte_required,
                total_effort_weeks: fte_required * scheduled.duration_weeks,
            });
        }
    }

    debug!(
        opportunity = %opportunity.opportunity_id,
        timeline_category = %timeline_category,
        service_lines = service_lines.len(),
        entries = entries.len(),
        "calculated opportunity timeline"
    );

    Ok(OpportunityTimeline {
        opportunity_id: opportunity.opportunity_id.clone(),
        opportunity_name: opportunity.name.clone(),
        decision_date,
        current_stage,
        timeline_category,
        schedule,
        service_lines,
        entries,
    })
}

/// Calculates every opportunity independently; a failing opportunity is
/// reported in its own outcome and does not stop the others.
pub fn calculate_timelines(
    opportunities: &[Opportunity],
    config: &PlanningConfig,
) -> Vec<TimelineOutcome> {
    opportunities
        .iter()
        .map(|opportunity| {
            let result = calculate_opportunity_timeline(opportunity, config);
            if let Err(e) = &result {
                warn!(opportunity = %opportunity.opportunity_id, error = %e, "skipping opportunity");
            }
            TimelineOutcome {
                opportunity_id: opportunity.opportunity_id.clone(),
                result,
            }
        })
        .collect()
}

/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps, keeping the calendar date of
/// the timestamp as written.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

fn parse_decision_date(opportunity: &Opportunity) -> Result<NaiveDate, TimelineError> {
    let value = opportunity
        .decision_date
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| TimelineError::MissingDecisionDate(opportunity.opportunity_id.clone()))?;

    parse_date(value).ok_or_else(|| TimelineError::InvalidDate {
        opportunity_id: opportunity.opportunity_id.clone(),
        value: value.to_string(),
    })
}

/// Configured service lines in configuration order, followed by every other
/// service line the opportunity carries a positive TCV for.
fn service_line_candidates<'a>(
    opportunity: &'a Opportunity,
    config: &'a PlanningConfig,
) -> Vec<&'a str> {
    let mut candidates: Vec<&str> = config
        .service_lines
        .iter()
        .map(|service_line| service_line.code.as_str())
        .collect();
    for (service_line, tcv) in &opportunity.service_line_tcv {
        if *tcv > 0.0 && !candidates.contains(&service_line.as_str()) {
            warn!(
                opportunity = %opportunity.opportunity_id,
                service_line = %service_line,
                tcv,
                "service line with TCV is missing from the planning config"
            );
            candidates.push(service_line);
        }
    }
    candidates
}

fn parse_current_stage(opportunity: &Opportunity) -> Option<Stage> {
    let value = opportunity.current_stage.as_deref()?;
    let stage = Stage::from_code(value);
    if stage.is_none() {
        debug!(
            opportunity = %opportunity.opportunity_id,
            current_stage = value,
            "unknown current stage, scheduling all stages"
        );
    }
    stage
}

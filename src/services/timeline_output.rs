use std::io::{self, Write};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::domain::stage::Stage;
use crate::services::effort_calculation::{CalculationMethod, StageEffortBreakdown};
use crate::services::stage_scheduler::{StageStatus, classify_stage};
use crate::services::timeline_bucketizer::BucketSeries;
use crate::services::timeline_engine::TimelineOutcome;
use crate::services::timeline_types::OpportunityTimeline;

#[derive(Error, Debug)]
pub enum TimelineOutputError {
    #[error("failed to serialize yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Serialize)]
struct TimelineReportRecord<'a> {
    status_date: String,
    timelines: Vec<TimelineRecord<'a>>,
    failures: Vec<FailureRecord>,
}

#[derive(Serialize)]
struct TimelineRecord<'a> {
    opportunity_id: &'a str,
    opportunity_name: Option<&'a str>,
    decision_date: String,
    current_stage: Option<Stage>,
    timeline_category: &'a str,
    service_lines: Vec<ServiceLineRecord<'a>>,
    entries: Vec<EntryRecord<'a>>,
}

#[derive(Serialize)]
struct ServiceLineRecord<'a> {
    service_line: &'a str,
    method: CalculationMethod,
    resource_category: &'a str,
    service_line_tcv: f64,
    unique_offering_count: usize,
    total_effort_weeks: f64,
    peak_fte: f64,
    stages: &'a [StageEffortBreakdown],
}

#[derive(Serialize)]
struct EntryRecord<'a> {
    service_line: &'a str,
    stage: Stage,
    stage_start_date: String,
    stage_end_date: String,
    duration_weeks: f64,
    fte_required: f64,
    total_effort_weeks: f64,
    status: StageStatus,
}

#[derive(Serialize)]
struct FailureRecord {
    opportunity_id: String,
    error: String,
}

/// Writes every outcome of a batch run; successful timelines carry the stage
/// status relative to `today`, failures carry their error message.
pub fn write_timeline_report<W: Write>(
    writer: &mut W,
    outcomes: &[TimelineOutcome],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<(), TimelineOutputError> {
    let mut timelines = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(timeline) => timelines.push(timeline_to_record(timeline, today)),
            Err(e) => failures.push(FailureRecord {
                opportunity_id: outcome.opportunity_id.clone(),
                error: e.to_string(),
            }),
        }
    }

    let record = TimelineReportRecord {
        status_date: format_date(today),
        timelines,
        failures,
    };
    write_serialized(writer, &record, format)
}

pub fn write_bucket_series<W: Write>(
    writer: &mut W,
    series: &BucketSeries,
    format: OutputFormat,
) -> Result<(), TimelineOutputError> {
    write_serialized(writer, series, format)
}

fn write_serialized<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    format: OutputFormat,
) -> Result<(), TimelineOutputError> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
    };
    writer.write_all(text.as_bytes())?;
    Ok(())
}

fn timeline_to_record(timeline: &OpportunityTimeline, today: NaiveDate) -> TimelineRecord<'_> {
    TimelineRecord {
        opportunity_id: &timeline.opportunity_id,
        opportunity_name: timeline.opportunity_name.as_deref(),
        decision_date: format_date(timeline.decision_date),
        current_stage: timeline.current_stage,
        timeline_category: &timeline.timeline_category,
        service_lines: timeline
            .service_lines
            .iter()
            .map(|effort| ServiceLineRecord {
                service_line: &effort.service_line,
                method: effort.method,
                resource_category: &effort.resource_category,
                service_line_tcv: effort.service_line_tcv,
                unique_offering_count: effort.unique_offering_count,
                total_effort_weeks: timeline.total_effort_weeks(&effort.service_line),
                peak_fte: timeline.peak_fte(&effort.service_line),
                stages: &effort.stages,
            })
            .collect(),
        entries: timeline
            .entries
            .iter()
            .map(|entry| EntryRecord {
                service_line: &entry.service_line,
                stage: entry.stage,
                stage_start_date: format_date(entry.stage_start_date),
                stage_end_date: format_date(entry.stage_end_date),
                duration_weeks: entry.duration_weeks,
                fte_required: entry.fte_required,
                total_effort_weeks: entry.total_effort_weeks,
                status: classify_stage(entry.stage_end_date, today),
            })
            .collect(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

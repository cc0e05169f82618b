use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::stage::Stage;
use crate::services::effort_calculation::ServiceLineEffort;
use crate::services::stage_scheduler::ScheduledStage;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StageTimelineEntry {
    pub service_line: String,
    pub stage: Stage,
    pub stage_start_date: NaiveDate,
    pub stage_end_date: NaiveDate,
    pub duration_weeks: f64,
    pub fte_required: f64,
    pub total_effort_weeks: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OpportunityTimeline {
    pub opportunity_id: String,
    pub opportunity_name: Option<String>,
    pub decision_date: NaiveDate,
    pub current_stage: Option<Stage>,
    pub timeline_category: String,
    pub schedule: Vec<ScheduledStage>,
    pub service_lines: Vec<ServiceLineEffort>,
    pub entries: Vec<StageTimelineEntry>,
}

impl OpportunityTimeline {
    pub fn entries_for<'a>(
        &'a self,
        service_line: &'a str,
    ) -> impl Iterator<Item = &'a StageTimelineEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.service_line == service_line)
    }

    /// Sum of FTE-weeks over the remaining stages of one service line.
    pub fn total_effort_weeks(&self, service_line: &str) -> f64 {
        self.entries_for(service_line)
            .map(|entry| entry.total_effort_weeks)
            .sum()
    }

    /// Highest FTE any single stage of the service line requires.
    pub fn peak_fte(&self, service_line: &str) -> f64 {
        self.entries_for(service_line)
            .map(|entry| entry.fte_required)
            .fold(0.0, f64::max)
    }
}

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::domain::planning_config::PlanningConfig;
use crate::domain::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledStage {
    pub stage: Stage,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_weeks: f64,
}

/// A stage duration reaches past the range of representable dates.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("stage {stage} of {duration_weeks} weeks does not fit before the decision date")]
pub struct ScheduleOutOfRange {
    pub stage: Stage,
    pub duration_weeks: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Past,
    CurrentOrFuture,
}

impl ScheduledStage {
    pub fn status(&self, today: NaiveDate) -> StageStatus {
        classify_stage(self.end_date, today)
    }
}

/// A stage is current or upcoming while its end date has not passed.
pub fn classify_stage(end_date: NaiveDate, today: NaiveDate) -> StageStatus {
    if end_date >= today {
        StageStatus::CurrentOrFuture
    } else {
        StageStatus::Past
    }
}

/// Schedules the stages from `current_stage` onwards backwards from
/// `decision_date`.
///
/// The last stage ends on the decision date and every earlier stage ends
/// where its successor starts. Stages without a configured duration take
/// zero weeks and are still returned, as zero-width intervals. The result is
/// in process order.
///
/// Fails when a duration pushes a start date outside the calendar chrono
/// can represent.
pub fn schedule_stages(
    decision_date: NaiveDate,
    current_stage: Option<Stage>,
    timeline_category: &str,
    config: &PlanningConfig,
) -> Result<Vec<ScheduledStage>, ScheduleOutOfRange> {
    let remaining = Stage::remaining_from(current_stage);
    let mut scheduled = Vec::with_capacity(remaining.len());
    let mut end_date = decision_date;

    for stage in remaining.iter().rev() {
        let duration_weeks = config.duration_weeks(timeline_category, *stage).max(0.0);
        let start_date = weeks_to_days(duration_weeks)
            .and_then(|days| end_date.checked_sub_signed(days))
            .ok_or(ScheduleOutOfRange {
                stage: *stage,
                duration_weeks,
            })?;
        scheduled.push(ScheduledStage {
            stage: *stage,
            start_date,
            end_date,
            duration_weeks,
        });
        end_date = start_date;
    }

    scheduled.reverse();
    Ok(scheduled)
}

fn weeks_to_days(weeks: f64) -> Option<Duration> {
    let days = (weeks * 7.0).round();
    if !days.is_finite() {
        return None;
    }
    Duration::try_days(days as i64)
}

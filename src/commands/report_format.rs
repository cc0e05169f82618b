use chrono::NaiveDate;

use crate::services::effort_calculation::CalculationMethod;
use crate::services::stage_scheduler::{StageStatus, classify_stage};
use crate::services::timeline_types::{OpportunityTimeline, StageTimelineEntry};

pub fn format_timeline_report(timeline: &OpportunityTimeline, today: NaiveDate) -> String {
    let opportunity = match timeline.opportunity_name.as_deref() {
        Some(name) => format!("{} ({name})", timeline.opportunity_id),
        None => timeline.opportunity_id.clone(),
    };
    let current_stage = match timeline.current_stage {
        Some(stage) => stage.to_string(),
        None => "n/a".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Timeline Report".to_string());
    lines.push(format!("Opportunity: {opportunity}"));
    lines.push(format!("Decision date: {}", timeline.decision_date));
    lines.push(format!("Current stage: {current_stage}"));
    lines.push(format!("Timeline category: {}", timeline.timeline_category));
    lines.push(String::new());

    if timeline.service_lines.is_empty() {
        lines.push("No service lines with TCV or lead offering.".to_string());
        return lines.join("\n");
    }

    lines.push("Service line | Method | Category | Offerings | Effort weeks | Peak FTE".to_string());
    lines.push("-------------|--------|----------|-----------|--------------|---------".to_string());
    for effort in &timeline.service_lines {
        lines.push(format!(
            "{} | {} | {} | {} | {:.2} | {:.2}",
            effort.service_line,
            method_label(effort.method),
            effort.resource_category,
            effort.unique_offering_count,
            timeline.total_effort_weeks(&effort.service_line),
            timeline.peak_fte(&effort.service_line),
        ));
    }
    lines.push(String::new());

    lines.push("Service line | Stage | Start | End | Weeks | FTE | Effort | Status".to_string());
    lines.push("-------------|-------|-------|-----|-------|-----|--------|-------".to_string());
    for entry in &timeline.entries {
        lines.push(format_entry_row(entry, today));
    }

    lines.join("\n")
}

fn format_entry_row(entry: &StageTimelineEntry, today: NaiveDate) -> String {
    let status = match classify_stage(entry.stage_end_date, today) {
        StageStatus::Past => "Past",
        StageStatus::CurrentOrFuture => "Upcoming",
    };
    format!(
        "{} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {status}",
        entry.service_line,
        entry.stage,
        entry.stage_start_date,
        entry.stage_end_date,
        entry.duration_weeks,
        entry.fte_required,
        entry.total_effort_weeks,
    )
}

fn method_label(method: CalculationMethod) -> &'static str {
    match method {
        CalculationMethod::ServiceLineTcv => "service line TCV",
        CalculationMethod::LeadOfferingFallback => "lead offering fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::timeline_engine::calculate_opportunity_timeline;
    use crate::test_support::{build_opportunity, build_planning_config, on_date};

    fn build_timeline() -> OpportunityTimeline {
        let config = build_planning_config();
        let mut opportunity = build_opportunity("OPP-1", 12.0, "2025-06-01", "05B");
        opportunity.name = Some("Workplace renewal".to_string());
        opportunity.lead_offering_l1 = Some("ITOC".to_string());
        calculate_opportunity_timeline(&opportunity, &config).unwrap()
    }

    #[test]
    fn report_includes_header_summary_and_stage_rows() {
        let timeline = build_timeline();
        let output = format_timeline_report(&timeline, on_date(2025, 5, 28));

        assert!(output.contains("Timeline Report"));
        assert!(output.contains("Opportunity: OPP-1 (Workplace renewal)"));
        assert!(output.contains("Decision date: 2025-06-01"));
        assert!(output.contains("Current stage: 05B"));
        assert!(output.contains("Timeline category: Large"));
        assert!(output.contains("MW | service line TCV | MW Standard | 2 | 1.00 | 0.50"));
        assert!(output.contains("ITOC | lead offering fallback | Large | 0 | 0.75 | 0.50"));
        assert!(output.contains("MW | 05B | 2025-05-18 | 2025-05-25 | 1.00 | 0.50 | 0.50 | Past"));
        assert!(output.contains("MW | 06 | 2025-05-25 | 2025-06-01 | 1.00 | 0.50 | 0.50 | Upcoming"));
    }

    #[test]
    fn report_without_service_lines_says_so() {
        let config = build_planning_config();
        let mut opportunity = build_opportunity("OPP-2", 1.0, "2025-06-01", "01");
        opportunity.service_line_tcv.clear();

        let timeline = calculate_opportunity_timeline(&opportunity, &config).unwrap();
        let output = format_timeline_report(&timeline, on_date(2025, 1, 1));

        assert!(output.contains("Opportunity: OPP-2"));
        assert!(output.contains("Current stage: 01"));
        assert!(output.contains("No service lines with TCV or lead offering."));
    }
}

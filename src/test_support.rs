use chrono::NaiveDate;

use crate::domain::category::{Category, ServiceLineCategory};
use crate::domain::opportunity::{LineItem, Opportunity};
use crate::domain::planning_config::{
    OfferingMapping, PlanningConfig, ServiceLine, StageDuration, StageEffort,
};
use crate::domain::stage::Stage;
use crate::services::timeline_types::StageTimelineEntry;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_entry(
    service_line: &str,
    stage: Stage,
    start: NaiveDate,
    end: NaiveDate,
    fte: f64,
) -> StageTimelineEntry {
    let duration_weeks = (end - start).num_days() as f64 / 7.0;
    StageTimelineEntry {
        service_line: service_line.to_string(),
        stage,
        stage_start_date: start,
        stage_end_date: end,
        duration_weeks,
        fte_required: fte,
        total_effort_weeks: fte * duration_weeks,
    }
}

/// Two service lines (MW, ITOC), Small/Large opportunity bands and a full
/// duration table for Large.
pub fn build_planning_config() -> PlanningConfig {
    let mut config = PlanningConfig::new();
    for code in ["MW", "ITOC"] {
        config.service_lines.push(ServiceLine {
            code: code.to_string(),
            name: None,
        });
        config.service_line_categories.push(ServiceLineCategory {
            service_line: code.to_string(),
            name: format!("{code} Standard"),
            min_tcv: 0.0,
            max_tcv: None,
        });
    }
    config.categories = vec![
        Category {
            name: "Small".to_string(),
            min_tcv: 0.0,
            max_tcv: Some(5.0),
        },
        Category {
            name: "Large".to_string(),
            min_tcv: 5.0,
            max_tcv: None,
        },
    ];

    let large_weeks = [2.0, 3.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0];
    let mw_fte = [1.0, 2.0, 2.0, 1.5, 1.5, 1.0, 0.5, 0.5];
    let itoc_fallback_fte = [0.5, 1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0.25];
    for (idx, stage) in Stage::ALL.iter().enumerate() {
        config.stage_durations.push(StageDuration {
            category_name: "Large".to_string(),
            stage: *stage,
            duration_weeks: large_weeks[idx],
        });
        config.stage_durations.push(StageDuration {
            category_name: "Small".to_string(),
            stage: *stage,
            duration_weeks: 1.0,
        });
        config.stage_efforts.push(StageEffort {
            service_line: "MW".to_string(),
            category_name: "MW Standard".to_string(),
            stage: *stage,
            fte_required: mw_fte[idx],
        });
        config.stage_efforts.push(StageEffort {
            service_line: "ITOC".to_string(),
            category_name: "Large".to_string(),
            stage: *stage,
            fte_required: itoc_fallback_fte[idx],
        });
    }

    for offering in ["Service Desk", "Field Services"] {
        config.offering_mappings.push(OfferingMapping {
            service_line: "MW".to_string(),
            internal_service: "Workplace Services".to_string(),
            simplified_offering: offering.to_string(),
        });
    }
    config
}

/// An opportunity with MW TCV of 3.0 and two mapped MW line items.
pub fn build_opportunity(
    id: &str,
    tcv_millions: f64,
    decision_date: &str,
    current_stage: &str,
) -> Opportunity {
    let mut opportunity = Opportunity::new(id);
    opportunity.tcv_millions = Some(tcv_millions);
    opportunity.decision_date = Some(decision_date.to_string());
    opportunity.current_stage = Some(current_stage.to_string());
    opportunity.service_line_tcv.insert("MW".to_string(), 3.0);
    opportunity.line_items = vec![
        LineItem {
            internal_service: "Workplace Services".to_string(),
            simplified_offering: "Service Desk".to_string(),
            offering_tcv: Some(2.0),
        },
        LineItem {
            internal_service: "Workplace Services".to_string(),
            simplified_offering: "Field Services".to_string(),
            offering_tcv: Some(1.0),
        },
    ];
    opportunity
}

use serde::Serialize;
use tracing::debug;

use crate::domain::opportunity::Opportunity;
use crate::domain::planning_config::PlanningConfig;
use crate::domain::stage::Stage;
use crate::services::category_resolver::resolve_category;
use crate::services::offering_counter::count_offerings;

/// How a service line came to be part of an opportunity's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// The service line carries TCV of its own.
    ServiceLineTcv,
    /// The service line has no TCV but is the opportunity's lead offering.
    LeadOfferingFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageEffortBreakdown {
    pub stage: Stage,
    pub base_fte: f64,
    pub threshold_count: u32,
    pub increment_multiplier: f64,
    pub excess_offerings: usize,
    pub multiplier: f64,
    pub final_fte: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceLineEffort {
    pub service_line: String,
    pub method: CalculationMethod,
    pub resource_category: String,
    pub service_line_tcv: f64,
    pub unique_offering_count: usize,
    pub stages: Vec<StageEffortBreakdown>,
}

impl ServiceLineEffort {
    pub fn final_fte(&self, stage: Stage) -> f64 {
        self.stages
            .iter()
            .find(|breakdown| breakdown.stage == stage)
            .map(|breakdown| breakdown.final_fte)
            .unwrap_or(0.0)
    }
}

/// `1.0` up to the threshold, then `increment_multiplier` more per excess
/// offering.
pub fn calculate_multiplier(
    unique_offering_count: usize,
    threshold_count: u32,
    increment_multiplier: f64,
) -> f64 {
    let excess = unique_offering_count.saturating_sub(threshold_count as usize);
    1.0 + excess as f64 * increment_multiplier.max(0.0)
}

pub fn calculate_stage_effort(
    config: &PlanningConfig,
    service_line: &str,
    resource_category: &str,
    stage: Stage,
    unique_offering_count: usize,
) -> StageEffortBreakdown {
    let base_fte = config
        .base_fte(service_line, resource_category, stage)
        .max(0.0);
    let (threshold_count, increment_multiplier) = config.offering_threshold(service_line, stage);
    let multiplier =
        calculate_multiplier(unique_offering_count, threshold_count, increment_multiplier);

    StageEffortBreakdown {
        stage,
        base_fte,
        threshold_count,
        increment_multiplier,
        excess_offerings: unique_offering_count.saturating_sub(threshold_count as usize),
        multiplier,
        final_fte: base_fte * multiplier,
    }
}

/// Computes the effort of one service line over `stages`.
///
/// Returns `None` when the line has no TCV on the opportunity and is not its
/// lead offering. A lead-offering line without TCV is evaluated with the
/// opportunity's timeline category standing in for its resource category.
pub fn evaluate_service_line(
    opportunity: &Opportunity,
    config: &PlanningConfig,
    service_line: &str,
    timeline_category: &str,
    stages: &[Stage],
) -> Option<ServiceLineEffort> {
    let service_line_tcv = opportunity.tcv_for(service_line);

    let (method, resource_category) = if service_line_tcv > 0.0 {
        let category = resolve_category(
            Some(service_line_tcv),
            config.service_line_categories_for(service_line),
        );
        (CalculationMethod::ServiceLineTcv, category)
    } else if opportunity.has_lead_offering(service_line) {
        debug!(
            opportunity = %opportunity.opportunity_id,
            service_line,
            timeline_category,
            "service line has no TCV, using lead offering fallback"
        );
        (
            CalculationMethod::LeadOfferingFallback,
            timeline_category.to_string(),
        )
    } else {
        return None;
    };

    let unique_offering_count =
        count_offerings(&opportunity.line_items, service_line, &config.offering_mappings);
    let stages = stages
        .iter()
        .map(|stage| {
            calculate_stage_effort(
                config,
                service_line,
                &resource_category,
                *stage,
                unique_offering_count,
            )
        })
        .collect();

    Some(ServiceLineEffort {
        service_line: service_line.to_string(),
        method,
        resource_category,
        service_line_tcv,
        unique_offering_count,
        stages,
    })
}

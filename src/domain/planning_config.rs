use crate::domain::category::{Category, ServiceLineCategory};
use crate::domain::stage::Stage;

/// Offerings allowed before the multiplier applies when a service line has no
/// threshold configured for a stage.
pub const DEFAULT_THRESHOLD_COUNT: u32 = 4;
/// Multiplier increment per excess offering when no threshold is configured.
pub const DEFAULT_INCREMENT_MULTIPLIER: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceLine {
    pub code: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageDuration {
    pub category_name: String,
    pub stage: Stage,
    pub duration_weeks: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageEffort {
    pub service_line: String,
    pub category_name: String,
    pub stage: Stage,
    pub fte_required: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferingThreshold {
    pub service_line: String,
    pub stage: Stage,
    pub threshold_count: u32,
    pub increment_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferingMapping {
    pub service_line: String,
    pub internal_service: String,
    pub simplified_offering: String,
}

/// Read-only snapshot of everything the timeline engine is configured with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanningConfig {
    pub service_lines: Vec<ServiceLine>,
    pub categories: Vec<Category>,
    pub service_line_categories: Vec<ServiceLineCategory>,
    pub stage_durations: Vec<StageDuration>,
    pub stage_efforts: Vec<StageEffort>,
    pub offering_thresholds: Vec<OfferingThreshold>,
    pub offering_mappings: Vec<OfferingMapping>,
}

impl PlanningConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_line_categories_for<'a>(
        &'a self,
        service_line: &'a str,
    ) -> impl Iterator<Item = &'a ServiceLineCategory> + 'a {
        self.service_line_categories
            .iter()
            .filter(move |category| category.service_line == service_line)
    }

    /// Duration of `stage` for the timeline category, zero when unconfigured.
    pub fn duration_weeks(&self, category_name: &str, stage: Stage) -> f64 {
        self.stage_durations
            .iter()
            .find(|row| row.category_name == category_name && row.stage == stage)
            .map(|row| row.duration_weeks)
            .unwrap_or(0.0)
    }

    /// Base FTE for a service line's resource category, zero when unconfigured.
    pub fn base_fte(&self, service_line: &str, category_name: &str, stage: Stage) -> f64 {
        self.stage_efforts
            .iter()
            .find(|row| {
                row.service_line == service_line
                    && row.category_name == category_name
                    && row.stage == stage
            })
            .map(|row| row.fte_required)
            .unwrap_or(0.0)
    }

    /// Threshold and increment for a stage, falling back to the defaults.
    pub fn offering_threshold(&self, service_line: &str, stage: Stage) -> (u32, f64) {
        self.offering_thresholds
            .iter()
            .find(|row| row.service_line == service_line && row.stage == stage)
            .map(|row| (row.threshold_count, row.increment_multiplier))
            .unwrap_or((DEFAULT_THRESHOLD_COUNT, DEFAULT_INCREMENT_MULTIPLIER))
    }

    pub fn offering_mappings_for<'a>(
        &'a self,
        service_line: &'a str,
    ) -> impl Iterator<Item = &'a OfferingMapping> + 'a {
        self.offering_mappings
            .iter()
            .filter(move |mapping| mapping.service_line == service_line)
    }
}

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    pub internal_service: String,
    pub simplified_offering: String,
    pub offering_tcv: Option<f64>,
}

/// An opportunity as delivered by the CRM export.
///
/// `decision_date` and `current_stage` keep the source text; the timeline
/// engine parses them so one malformed opportunity fails on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opportunity {
    pub opportunity_id: String,
    pub name: Option<String>,
    pub tcv_millions: Option<f64>,
    pub decision_date: Option<String>,
    pub current_stage: Option<String>,
    pub lead_offering_l1: Option<String>,
    pub service_line_tcv: BTreeMap<String, f64>,
    pub line_items: Vec<LineItem>,
}

impl Opportunity {
    pub fn new(opportunity_id: &str) -> Self {
        Self {
            opportunity_id: opportunity_id.to_string(),
            ..Self::default()
        }
    }

    /// TCV booked against `service_line`, zero when the line has no entry.
    pub fn tcv_for(&self, service_line: &str) -> f64 {
        self.service_line_tcv
            .get(service_line)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn has_lead_offering(&self, service_line: &str) -> bool {
        self.lead_offering_l1
            .as_deref()
            .is_some_and(|lead| lead.trim() == service_line)
    }
}

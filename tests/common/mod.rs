use assert_fs::TempDir;
use assert_fs::prelude::*;

pub const PLANNING_YAML: &str = r#"
service_lines:
  - code: MW
    name: Modern Workplace
  - code: ITOC
    name: "Infrastructure & Cloud"
categories:
  - name: Small
    min_tcv: 0
    max_tcv: 5
  - name: Large
    min_tcv: 5
    max_tcv: null
service_line_categories:
  - service_line: MW
    name: MW Standard
    min_tcv: 0
  - service_line: ITOC
    name: ITOC Standard
    min_tcv: 0
stage_durations:
  - { category: Large, stage: "01", duration_weeks: 2 }
  - { category: Large, stage: "02", duration_weeks: 3 }
  - { category: Large, stage: "03", duration_weeks: 2 }
  - { category: Large, stage: "04A", duration_weeks: 2 }
  - { category: Large, stage: "04B", duration_weeks: 1 }
  - { category: Large, stage: "05A", duration_weeks: 1 }
  - { category: Large, stage: "05B", duration_weeks: 1 }
  - { category: Large, stage: "06", duration_weeks: 1 }
stage_efforts:
  - { service_line: MW, category: MW Standard, stage: "02", fte_required: 2.0 }
  - { service_line: MW, category: MW Standard, stage: "06", fte_required: 1.0 }
  - { service_line: ITOC, category: ITOC Standard, stage: "06", fte_required: 1.0 }
offering_thresholds:
  - { service_line: MW, stage: "02", threshold_count: 1, increment_multiplier: 0.5 }
offering_mappings:
  - { service_line: MW, internal_service: Workplace Services, simplified_offering: Service Desk }
  - { service_line: MW, internal_service: Workplace Services, simplified_offering: Field Services }
"#;

pub const OPPORTUNITIES_YAML: &str = r#"
- opportunity_id: OPP-1
  name: Workplace renewal
  tcv_millions: 12
  decision_date: "2025-06-01"
  current_stage: "05B"
  service_line_tcv:
    MW: 3.0
    ITOC: 1.0
  line_items:
    - { internal_service: Workplace Services, simplified_offering: Service Desk, offering_tcv: 2.0 }
    - { internal_service: Workplace Services, simplified_offering: Field Services, offering_tcv: 1.0 }
- opportunity_id: OPP-2
  tcv_millions: 4
  decision_date: next quarter
  current_stage: "01"
  service_line_tcv:
    MW: 4.0
- opportunity_id: OPP-3
  tcv_millions: 12
  decision_date: "2025-09-01"
  current_stage: "02"
  service_line_tcv:
    MW: 2.0
  line_items:
    - { internal_service: Workplace Services, simplified_offering: Service Desk }
    - { internal_service: Workplace Services, simplified_offering: Field Services }
"#;

/// Writes the planning config and opportunities into a temp dir and returns
/// their paths as strings.
pub fn write_inputs(temp: &TempDir) -> (String, String) {
    let config = temp.child("planning.yaml");
    config.write_str(PLANNING_YAML).unwrap();
    let opportunities = temp.child("opportunities.yaml");
    opportunities.write_str(OPPORTUNITIES_YAML).unwrap();
    (
        config.path().to_str().unwrap().to_string(),
        opportunities.path().to_str().unwrap().to_string(),
    )
}

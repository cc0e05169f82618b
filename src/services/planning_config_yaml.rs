use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::category::{Category, ServiceLineCategory};
use crate::domain::planning_config::{
    OfferingMapping, OfferingThreshold, PlanningConfig, ServiceLine, StageDuration, StageEffort,
};
use crate::domain::stage::Stage;
use crate::services::category_resolver::overlapping_bands;

#[derive(Error, Debug)]
pub enum PlanningConfigYamlError {
    #[error("failed to read planning config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse planning config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unknown stage code in {section}: {value}")]
    InvalidStage { section: &'static str, value: String },
    #[error("negative {field} in {section}: {value}")]
    NegativeValue {
        section: &'static str,
        field: &'static str,
        value: f64,
    },
    #[error("{field} in {section} must be a finite number, got {value}")]
    NonFiniteValue {
        section: &'static str,
        field: &'static str,
        value: f64,
    },
    #[error("threshold_count must be at least 1 for {service_line} stage {stage}")]
    InvalidThreshold { service_line: String, stage: Stage },
    #[error("service line entry without a code")]
    MissingServiceLineCode,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlanningConfigRecord {
    service_lines: Vec<ServiceLineRecord>,
    categories: Vec<CategoryRecord>,
    service_line_categories: Vec<ServiceLineCategoryRecord>,
    stage_durations: Vec<StageDurationRecord>,
    stage_efforts: Vec<StageEffortRecord>,
    offering_thresholds: Vec<OfferingThresholdRecord>,
    offering_mappings: Vec<OfferingMappingRecord>,
}

#[derive(Debug, Deserialize)]
struct ServiceLineRecord {
    code: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    name: String,
    min_tcv: f64,
    max_tcv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ServiceLineCategoryRecord {
    service_line: String,
    name: String,
    min_tcv: f64,
    max_tcv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StageDurationRecord {
    category: String,
    stage: String,
    duration_weeks: f64,
}

#[derive(Debug, Deserialize)]
struct StageEffortRecord {
    service_line: String,
    category: String,
    stage: String,
    fte_required: f64,
}

#[derive(Debug, Deserialize)]
struct OfferingThresholdRecord {
    service_line: String,
    stage: String,
    threshold_count: u32,
    increment_multiplier: f64,
}

#[derive(Debug, Deserialize)]
struct OfferingMappingRecord {
    service_line: String,
    internal_service: String,
    simplified_offering: String,
}

pub fn load_planning_config_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<PlanningConfig, PlanningConfigYamlError> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|source| PlanningConfigYamlError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let config = deserialize_planning_config_from_yaml_str(&contents)?;
    info!(
        path = %path.display(),
        service_lines = config.service_lines.len(),
        categories = config.categories.len(),
        stage_efforts = config.stage_efforts.len(),
        "loaded planning config"
    );
    Ok(config)
}

/// Parses and validates a planning configuration.
///
/// Every section is optional. Overlapping category bands are accepted and
/// logged, since resolution still picks the band with the highest `min_tcv`.
pub fn deserialize_planning_config_from_yaml_str(
    input: &str,
) -> Result<PlanningConfig, PlanningConfigYamlError> {
    let record: PlanningConfigRecord = if input.trim().is_empty() {
        PlanningConfigRecord::default()
    } else {
        serde_yaml::from_str(input)?
    };

    let service_lines = record
        .service_lines
        .into_iter()
        .map(|value| {
            let code = value.code.trim().to_string();
            if code.is_empty() {
                return Err(PlanningConfigYamlError::MissingServiceLineCode);
            }
            Ok(ServiceLine {
                code,
                name: value.name,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let categories = record
        .categories
        .into_iter()
        .map(|value| {
            check_non_negative("categories", "min_tcv", value.min_tcv)?;
            Ok(Category {
                name: value.name,
                min_tcv: value.min_tcv,
                max_tcv: value.max_tcv,
            })
        })
        .collect::<Result<Vec<_>, PlanningConfigYamlError>>()?;

    let service_line_categories = record
        .service_line_categories
        .into_iter()
        .map(|value| {
            check_non_negative("service_line_categories", "min_tcv", value.min_tcv)?;
            Ok(ServiceLineCategory {
                service_line: value.service_line,
                name: value.name,
                min_tcv: value.min_tcv,
                max_tcv: value.max_tcv,
            })
        })
        .collect::<Result<Vec<_>, PlanningConfigYamlError>>()?;

    let stage_durations = record
        .stage_durations
        .into_iter()
        .map(|value| {
            check_non_negative("stage_durations", "duration_weeks", value.duration_weeks)?;
            Ok(StageDuration {
                category_name: value.category,
                stage: parse_stage("stage_durations", &value.stage)?,
                duration_weeks: value.duration_weeks,
            })
        })
        .collect::<Result<Vec<_>, PlanningConfigYamlError>>()?;

    let stage_efforts = record
        .stage_efforts
        .into_iter()
        .map(|value| {
            check_non_negative("stage_efforts", "fte_required", value.fte_required)?;
            Ok(StageEffort {
                service_line: value.service_line,
                category_name: value.category,
                stage: parse_stage("stage_efforts", &value.stage)?,
                fte_required: value.fte_required,
            })
        })
        .collect::<Result<Vec<_>, PlanningConfigYamlError>>()?;

    let offering_thresholds = record
        .offering_thresholds
        .into_iter()
        .map(|value| {
            let stage = parse_stage("offering_thresholds", &value.stage)?;
            check_non_negative(
                "offering_thresholds",
                "increment_multiplier",
                value.increment_multiplier,
            )?;
            if value.threshold_count == 0 {
                return Err(PlanningConfigYamlError::InvalidThreshold {
                    service_line: value.service_line,
                    stage,
                });
            }
            Ok(OfferingThreshold {
                service_line: value.service_line,
                stage,
                threshold_count: value.threshold_count,
                increment_multiplier: value.increment_multiplier,
            })
        })
        .collect::<Result<Vec<_>, PlanningConfigYamlError>>()?;

    let offering_mappings = record
        .offering_mappings
        .into_iter()
        .map(|value| OfferingMapping {
            service_line: value.service_line,
            internal_service: value.internal_service,
            simplified_offering: value.simplified_offering,
        })
        .collect();

    let config = PlanningConfig {
        service_lines,
        categories,
        service_line_categories,
        stage_durations,
        stage_efforts,
        offering_thresholds,
        offering_mappings,
    };
    warn_about_overlapping_bands(&config);
    Ok(config)
}

fn warn_about_overlapping_bands(config: &PlanningConfig) {
    for (lower, upper) in overlapping_bands(&config.categories) {
        warn!(lower = %lower, upper = %upper, "opportunity categories overlap");
    }

    let service_lines: BTreeSet<&str> = config
        .service_line_categories
        .iter()
        .map(|category| category.service_line.as_str())
        .collect();
    for service_line in service_lines {
        for (lower, upper) in overlapping_bands(config.service_line_categories_for(service_line)) {
            warn!(service_line, lower = %lower, upper = %upper, "service line categories overlap");
        }
    }
}

fn parse_stage(section: &'static str, value: &str) -> Result<Stage, PlanningConfigYamlError> {
    Stage::from_code(value).ok_or_else(|| PlanningConfigYamlError::InvalidStage {
        section,
        value: value.to_string(),
    })
}

fn check_non_negative(
    section: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), PlanningConfigYamlError> {
    if !value.is_finite() {
        return Err(PlanningConfigYamlError::NonFiniteValue {
            section,
            field,
            value,
        });
    }
    if value < 0.0 {
        return Err(PlanningConfigYamlError::NegativeValue {
            section,
            field,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    const CONFIG_YAML: &str = r#"
service_lines:
  - code: MW
    name: Modern Workplace
  - code: ITOC
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
stage_durations:
  - category: Large
    stage: "01"
    duration_weeks: 2
  - category: Large
    stage: "04A"
    duration_weeks: 1.5
stage_efforts:
  - service_line: MW
    category: MW Standard
    stage: "02"
    fte_required: 1.25
offering_thresholds:
  - service_line: MW
    stage: "02"
    threshold_count: 3
    increment_multiplier: 0.25
offering_mappings:
  - service_line: MW
    internal_service: Workplace Services
    simplified_offering: Service Desk
"#;

    #[test]
    fn deserialize_full_config() {
        let config = deserialize_planning_config_from_yaml_str(CONFIG_YAML).unwrap();

        assert_eq!(config.service_lines.len(), 2);
        assert_eq!(config.service_lines[0].name.as_deref(), Some("Modern Workplace"));
        assert_eq!(config.categories[1].max_tcv, None);
        assert_eq!(config.categories[0].max_tcv, Some(5.0));
        assert_eq!(config.duration_weeks("Large", Stage::Stage04A), 1.5);
        assert_eq!(config.base_fte("MW", "MW Standard", Stage::Stage02), 1.25);
        assert_eq!(config.offering_threshold("MW", Stage::Stage02), (3, 0.25));
        assert_eq!(config.offering_mappings.len(), 1);
    }

    #[test]
    fn empty_document_is_an_empty_config() {
        let config = deserialize_planning_config_from_yaml_str("").unwrap();
        assert_eq!(config, PlanningConfig::new());
    }

    #[test]
    fn rejects_unknown_stage_code() {
        let yaml = r#"
stage_durations:
  - category: Large
    stage: "07"
    duration_weeks: 2
"#;
        let error = deserialize_planning_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            PlanningConfigYamlError::InvalidStage { section: "stage_durations", .. }
        ));
    }

    #[test]
    fn rejects_negative_fte() {
        let yaml = r#"
stage_efforts:
  - service_line: MW
    category: Large
    stage: "01"
    fte_required: -1
"#;
        let error = deserialize_planning_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            PlanningConfigYamlError::NegativeValue { field: "fte_required", .. }
        ));
    }

    #[test]
    fn rejects_infinite_duration() {
        let yaml = r#"
stage_durations:
  - category: Large
    stage: "06"
    duration_weeks: .inf
"#;
        let error = deserialize_planning_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            PlanningConfigYamlError::NonFiniteValue { field: "duration_weeks", .. }
        ));
    }

    #[test]
    fn rejects_zero_threshold() {
        let yaml = r#"
offering_thresholds:
  - service_line: MW
    stage: "03"
    threshold_count: 0
    increment_multiplier: 0.2
"#;
        let error = deserialize_planning_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            error,
            PlanningConfigYamlError::InvalidThreshold { stage: Stage::Stage03, .. }
        ));
    }

    #[test]
    fn rejects_blank_service_line_code() {
        let yaml = "service_lines:\n  - code: \" \"\n";
        let error = deserialize_planning_config_from_yaml_str(yaml).unwrap_err();
        assert!(matches!(error, PlanningConfigYamlError::MissingServiceLineCode));
    }

    #[test]
    fn rejects_invalid_yaml() {
        let error = deserialize_planning_config_from_yaml_str("categories: [").unwrap_err();
        assert!(matches!(error, PlanningConfigYamlError::Parse(_)));
    }

    #[test]
    fn overlapping_bands_are_accepted() {
        let yaml = r#"
categories:
  - name: A
    min_tcv: 0
    max_tcv: 10
  - name: B
    min_tcv: 5
    max_tcv: 20
"#;
        let config = deserialize_planning_config_from_yaml_str(yaml).unwrap();
        assert_eq!(config.categories.len(), 2);
    }

    #[test]
    fn load_from_file_reports_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");

        let error = load_planning_config_from_yaml_file(&missing).unwrap_err();
        assert!(matches!(error, PlanningConfigYamlError::Read { path, .. } if path == missing));
    }

    #[test]
    fn load_from_file_parses_contents() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("planning.yaml");
        file.write_str(CONFIG_YAML).unwrap();

        let config = load_planning_config_from_yaml_file(file.path()).unwrap();
        assert_eq!(config.categories.len(), 2);
    }
}

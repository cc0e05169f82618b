use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::opportunity::{LineItem, Opportunity};

#[derive(Error, Debug)]
pub enum OpportunityYamlError {
    #[error("failed to read opportunities {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse opportunities: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("opportunity without an opportunity_id")]
    MissingOpportunityId,
    #[error("duplicate opportunity_id: {0}")]
    DuplicateOpportunityId(String),
}

#[derive(Debug, Deserialize)]
struct OpportunityRecord {
    opportunity_id: String,
    name: Option<String>,
    tcv_millions: Option<f64>,
    decision_date: Option<String>,
    current_stage: Option<String>,
    lead_offering_l1: Option<String>,
    #[serde(default)]
    service_line_tcv: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    line_items: Vec<LineItemRecord>,
}

#[derive(Debug, Deserialize)]
struct LineItemRecord {
    internal_service: Option<String>,
    simplified_offering: Option<String>,
    offering_tcv: Option<f64>,
}

pub fn load_opportunities_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Opportunity>, OpportunityYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| OpportunityYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let opportunities = deserialize_opportunities_from_yaml_str(&contents)?;
    info!(path = %path.display(), opportunities = opportunities.len(), "loaded opportunities");
    Ok(opportunities)
}

/// Parses a list of opportunities.
///
/// Dates and stage codes are kept as written; they are interpreted per
/// opportunity by the timeline engine. Null service line TCVs count as zero.
pub fn deserialize_opportunities_from_yaml_str(
    input: &str,
) -> Result<Vec<Opportunity>, OpportunityYamlError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<OpportunityRecord> = serde_yaml::from_str(input)?;

    let mut opportunities: Vec<Opportunity> = Vec::with_capacity(records.len());
    for record in records {
        let opportunity_id = record.opportunity_id.trim().to_string();
        if opportunity_id.is_empty() {
            return Err(OpportunityYamlError::MissingOpportunityId);
        }
        if opportunities
            .iter()
            .any(|existing| existing.opportunity_id == opportunity_id)
        {
            return Err(OpportunityYamlError::DuplicateOpportunityId(opportunity_id));
        }

        opportunities.push(Opportunity {
            opportunity_id,
            name: record.name,
            tcv_millions: record.tcv_millions,
            decision_date: record.decision_date,
            current_stage: record.current_stage,
            lead_offering_l1: record.lead_offering_l1,
            service_line_tcv: record
                .service_line_tcv
                .into_iter()
                .map(|(service_line, tcv)| (service_line, tcv.unwrap_or(0.0)))
                .collect(),
            line_items: record.line_items.into_iter().map(line_item_from_record).collect(),
        });
    }
    Ok(opportunities)
}

fn line_item_from_record(record: LineItemRecord) -> LineItem {
    LineItem {
        internal_service: record.internal_service.unwrap_or_default(),
        simplified_offering: record.simplified_offering.unwrap_or_default(),
        offering_tcv: record.offering_tcv,
    }
}

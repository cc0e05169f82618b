use chrono::NaiveDate;

use crate::domain::opportunity::Opportunity;
use crate::domain::planning_config::PlanningConfig;
use crate::services::opportunity_yaml::load_opportunities_from_yaml_file;
use crate::services::planning_config_yaml::load_planning_config_from_yaml_file;

/// Loads the planning config and opportunities, reporting failures on stderr.
pub fn load_inputs(config: &str, input: &str) -> Option<(PlanningConfig, Vec<Opportunity>)> {
    let planning_config = match load_planning_config_from_yaml_file(config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load planning config: {e}");
            return None;
        }
    };

    let opportunities = match load_opportunities_from_yaml_file(input) {
        Ok(opportunities) => opportunities,
        Err(e) => {
            eprintln!("Failed to load opportunities: {e}");
            return None;
        }
    };

    Some((planning_config, opportunities))
}

pub fn parse_today(today: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(today, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            eprintln!("Invalid date for --today: {today} (expected YYYY-MM-DD)");
            None
        }
    }
}

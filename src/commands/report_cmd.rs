use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::inputs::{load_inputs, parse_today};
use crate::commands::report_format::format_timeline_report;
use crate::services::timeline_engine::calculate_timelines;

pub fn report_command(cmd: Commands) -> ExitCode {
    if let Commands::Report {
        config,
        input,
        today,
    } = cmd
    {
        let Some(today) = parse_today(&today) else {
            return ExitCode::FAILURE;
        };
        let Some((planning_config, opportunities)) = load_inputs(&config, &input) else {
            return ExitCode::FAILURE;
        };

        let mut reports = Vec::new();
        for outcome in calculate_timelines(&opportunities, &planning_config) {
            match outcome.result {
                Ok(timeline) => reports.push(format_timeline_report(&timeline, today)),
                Err(e) => eprintln!("Skipping opportunity {}: {e}", outcome.opportunity_id),
            }
        }
        println!("{}", reports.join("\n\n"));
    }
    ExitCode::SUCCESS
}

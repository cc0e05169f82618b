use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::inputs::{load_inputs, parse_today};
use crate::services::timeline_engine::calculate_timelines;
use crate::services::timeline_output::write_timeline_report;

pub fn timeline_command(cmd: Commands) -> ExitCode {
    if let Commands::Timeline {
        config,
        input,
        output,
        today,
        format,
    } = cmd
    {
        let Some(today) = parse_today(&today) else {
            return ExitCode::FAILURE;
        };
        let Some((planning_config, opportunities)) = load_inputs(&config, &input) else {
            return ExitCode::FAILURE;
        };

        let outcomes = calculate_timelines(&opportunities, &planning_config);
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            opportunities = outcomes.len(),
            failed, "calculated opportunity timelines"
        );

        let mut buffer = Vec::new();
        if let Err(e) = write_timeline_report(&mut buffer, &outcomes, today, format) {
            eprintln!("Failed to serialize timelines: {e}");
            return ExitCode::FAILURE;
        }

        if let Err(e) = std::fs::write(&output, buffer) {
            eprintln!("Failed to write output file: {e}");
            return ExitCode::FAILURE;
        }

        println!(
            "Timelines for {} opportunities written to {output}",
            outcomes.len() - failed
        );
        if failed > 0 {
            println!("{failed} opportunities could not be scheduled, see failures in {output}");
        }
    }
    ExitCode::SUCCESS
}

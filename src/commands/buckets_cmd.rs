use std::process::ExitCode;

use tracing::info;

use crate::commands::base_commands::Commands;
use crate::commands::inputs::load_inputs;
use crate::services::timeline_bucketizer::bucketize;
use crate::services::timeline_engine::calculate_timelines;
use crate::services::timeline_output::write_bucket_series;

pub fn buckets_command(cmd: Commands) -> ExitCode {
    if let Commands::Buckets {
        config,
        input,
        output,
        granularity,
        opportunity,
        format,
    } = cmd
    {
        let Some((planning_config, mut opportunities)) = load_inputs(&config, &input) else {
            return ExitCode::FAILURE;
        };

        if let Some(id) = opportunity.as_deref() {
            opportunities.retain(|candidate| candidate.opportunity_id == id);
            if opportunities.is_empty() {
                eprintln!("Opportunity {id} not found in {input}");
                return ExitCode::FAILURE;
            }
        }

        let mut entries = Vec::new();
        for outcome in calculate_timelines(&opportunities, &planning_config) {
            match outcome.result {
                Ok(timeline) => entries.extend(timeline.entries),
                Err(e) => eprintln!("Skipping opportunity {}: {e}", outcome.opportunity_id),
            }
        }

        let series = bucketize(&entries, granularity);
        info!(
            granularity = %granularity,
            entries = entries.len(),
            buckets = series.buckets.len(),
            "bucketized stage timeline"
        );

        let mut buffer = Vec::new();
        if let Err(e) = write_bucket_series(&mut buffer, &series, format) {
            eprintln!("Failed to serialize buckets: {e}");
            return ExitCode::FAILURE;
        }

        if let Err(e) = std::fs::write(&output, buffer) {
            eprintln!("Failed to write output file: {e}");
            return ExitCode::FAILURE;
        }

        println!(
            "{} {granularity} buckets written to {output}",
            series.buckets.len()
        );
    }
    ExitCode::SUCCESS
}

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use resource_planner::commands::base_commands::{CliArgs, Commands};
use resource_planner::commands::buckets_cmd::buckets_command;
use resource_planner::commands::report_cmd::report_command;
use resource_planner::commands::timeline_cmd::timeline_command;
use resource_planner::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Timeline { .. } => timeline_command(cmd),
        cmd @ Commands::Buckets { .. } => buckets_command(cmd),
        cmd @ Commands::Report { .. } => report_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut io::stdout());
            ExitCode::SUCCESS
        }
    }
}

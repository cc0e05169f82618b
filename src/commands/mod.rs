pub mod base_commands;
pub mod buckets_cmd;
pub mod inputs;
pub mod report_cmd;
pub mod report_format;
pub mod timeline_cmd;

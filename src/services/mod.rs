pub mod category_resolver;
pub mod effort_calculation;
pub mod offering_counter;
pub mod opportunity_yaml;
pub mod planning_config_yaml;
pub mod stage_scheduler;
pub mod timeline_bucketizer;
pub mod timeline_engine;
pub mod timeline_output;
pub mod timeline_types;

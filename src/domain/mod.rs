pub mod category;
pub mod opportunity;
pub mod planning_config;
pub mod stage;

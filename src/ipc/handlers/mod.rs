pub mod analytics;
pub mod catalog;
pub mod core;
pub mod dataset;
pub mod insights;
pub mod records;

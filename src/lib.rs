//! Showplan Analyzer Library
//!
//! This library contains the core modules for the showplan-analyzer tool.

pub mod config;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use config::{CommandLineArgs, Config};
pub use services::plan_analyzer::{
    PlanAnalysisResult, PlanError, PlanResult, ReportRenderer, RuleThresholds, analyze_file,
    analyze_plan,
};

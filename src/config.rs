use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::plan_analyzer::RuleThresholds;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Rule thresholds for plan diagnostics
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Expensive operator cutoff in percent of statement cost (default: 10.0)
    pub threshold_percentage: f64,
    /// Clustered index scans warn above this cost share (default: 20.0)
    pub clustered_scan_percentage: f64,
    /// Sorts warn above this many estimated rows (default: 100000)
    pub sort_row_limit: u64,
    /// Hash matches warn above this cost share (default: 25.0)
    pub hash_match_percentage: f64,
    /// Row estimates are off beyond this actual/estimated ratio (default: 10.0)
    pub row_estimate_ratio: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "showplan-analyzer")]
#[command(version, about = "Analyze SQL Server execution plans for performance issues")]
#[command(after_help = "Examples:
  showplan-analyzer --file execution_plan.sqlplan
  showplan-analyzer --file plan.xml --threshold 5

How to get an execution plan:
  In SQL Server Management Studio, enable \"Include Actual Execution Plan\" (Ctrl+M),
  run the query, then right-click the plan and \"Save Execution Plan As...\".
  Or wrap the query in SET SHOWPLAN_XML ON / OFF and save the XML output.")]
pub struct CommandLineArgs {
    /// Execution plan file (.sqlplan or .xml)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: PathBuf,

    /// Cost percentage threshold for expensive operators (default: 10.0)
    #[arg(short = 't', long, value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (overrides config file, e.g., "debug,showplan_analyzer=trace")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from parsed command line arguments
    ///
    /// Loading order (priority from highest to lowest):
    /// 1. Command line arguments
    /// 2. Configuration file (only when --config is given)
    /// 3. Default values
    pub fn load_from(args: &CommandLineArgs) -> Result<Self, anyhow::Error> {
        let mut config = match &args.config {
            Some(path) => Self::from_toml(path)?,
            None => Config::default(),
        };

        config.apply_cli_overrides(args);
        config.validate()?;

        Ok(config)
    }

    /// Apply command line argument overrides (highest priority)
    fn apply_cli_overrides(&mut self, args: &CommandLineArgs) {
        if let Some(threshold) = args.threshold {
            self.analysis.threshold_percentage = threshold;
            tracing::info!(
                "Override analysis.threshold_percentage from CLI: {}",
                self.analysis.threshold_percentage
            );
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
            tracing::info!("Override logging.level from CLI: {}", self.logging.level);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        // any finite cutoff is usable: above 100 lists nothing, below 0 lists everything
        let threshold = self.analysis.threshold_percentage;
        if !threshold.is_finite() {
            anyhow::bail!("analysis.threshold_percentage must be a finite number, got {}", threshold);
        }

        let percentages = [
            ("analysis.clustered_scan_percentage", self.analysis.clustered_scan_percentage),
            ("analysis.hash_match_percentage", self.analysis.hash_match_percentage),
        ];
        for (name, value) in percentages {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                anyhow::bail!("{} must be between 0 and 100, got {}", name, value);
            }
        }

        let ratio = self.analysis.row_estimate_ratio;
        if !ratio.is_finite() || ratio <= 1.0 {
            anyhow::bail!("analysis.row_estimate_ratio must be greater than 1, got {}", ratio);
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level cannot be empty");
        }

        Ok(())
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Rule thresholds for the analyzer
    pub fn to_thresholds(&self) -> RuleThresholds {
        RuleThresholds {
            expensive_percentage: self.analysis.threshold_percentage,
            clustered_scan_percentage: self.analysis.clustered_scan_percentage,
            sort_row_limit: self.analysis.sort_row_limit,
            hash_match_percentage: self.analysis.hash_match_percentage,
            row_estimate_ratio: self.analysis.row_estimate_ratio,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let thresholds = RuleThresholds::default();
        Self {
            threshold_percentage: thresholds.expensive_percentage,
            clustered_scan_percentage: thresholds.clustered_scan_percentage,
            sort_row_limit: thresholds.sort_row_limit,
            hash_match_percentage: thresholds.hash_match_percentage,
            row_estimate_ratio: thresholds.row_estimate_ratio,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

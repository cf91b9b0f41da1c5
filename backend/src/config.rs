//! Configuration management for the slag plant reporting tools
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SLAG_ prefix

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{PlantParameters, TrendPeriod, LOW_STOCK_RATIO};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Where plant records are read from
    pub data: DataConfig,

    /// Report defaults
    pub report: ReportConfig,

    /// Calculation tables; anything left out keeps its default
    #[serde(default)]
    pub parameters: PlantParameters,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Weighbridge loads (JSON array)
    pub loads_path: PathBuf,

    /// Equipment register (JSON array)
    pub equipment_path: PathBuf,

    /// Maintenance tasks (JSON array)
    pub tasks_path: PathBuf,

    /// Inventory bins (JSON array)
    pub inventory_path: PathBuf,

    /// Plant crew (JSON array)
    pub personnel_path: PathBuf,

    /// Customer invoices (JSON array)
    pub invoices_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Trend granularity when none is given on the command line
    pub default_period: TrendPeriod,

    /// Fill ratio below which a bin counts as low stock
    pub low_stock_threshold: Decimal,

    /// Number of most recent loads graded by the quality report
    pub quality_sample_size: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Same as [`Config::load`], reading the environment file from `config_dir`
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let environment = std::env::var("SLAG_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("data.loads_path", "fixtures/loads.json")?
            .set_default("data.equipment_path", "fixtures/equipment.json")?
            .set_default("data.tasks_path", "fixtures/maintenance_tasks.json")?
            .set_default("data.inventory_path", "fixtures/inventory.json")?
            .set_default("data.personnel_path", "fixtures/personnel.json")?
            .set_default("data.invoices_path", "fixtures/invoices.json")?
            .set_default("report.default_period", TrendPeriod::default().as_str())?
            .set_default("report.low_stock_threshold", LOW_STOCK_RATIO.to_string())?
            .set_default("report.quality_sample_size", 5)?
            // Load environment-specific config file
            .add_source(
                File::with_name(&config_dir.join(&environment).to_string_lossy()).required(false),
            )
            // Override with environment variables (SLAG_ prefix)
            .add_source(
                Environment::with_prefix("SLAG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_period: TrendPeriod::default(),
            low_stock_threshold: LOW_STOCK_RATIO,
            quality_sample_size: 5,
        }
    }
}

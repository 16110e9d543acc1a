pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::report::ReportFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "group-split.toml";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "group-split")]
#[command(about = "Randomly split a roster into equally sized groups, honoring pinned placements")]
pub struct CliConfig {
    /// Path to TOML roster file (falls back to the built-in roster when absent)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report formats: text, json, csv
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,

    /// Directory to write report files into instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Apply priors without checking them against the roster
    #[arg(long)]
    pub no_validate: bool,

    /// Show the configuration without splitting
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔；未指定且預設檔案不存在時使用內建名單
    pub fn load_roster(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                tracing::info!("No {} found, using the built-in roster", DEFAULT_CONFIG_PATH);
                TomlConfig::builtin()
            }
        }
    }

    /// 將命令列參數覆蓋到設定檔的值
    pub fn apply_overrides(&self, config: &mut TomlConfig) -> Result<()> {
        if let Some(seed) = self.seed {
            config.split.seed = Some(seed);
            tracing::info!("🔧 Seed overridden to: {}", seed);
        }

        if !self.format.is_empty() {
            let formats = self
                .format
                .iter()
                .map(|f| f.parse::<ReportFormat>())
                .collect::<Result<Vec<_>>>()?;
            config.report.formats = Some(formats);
        }

        if let Some(output) = &self.output {
            config.report.output_path = Some(output.clone());
        }

        if self.no_validate {
            config.split.validate = Some(false);
            tracing::warn!("Roster validation disabled, priors are applied unchecked");
        }

        Ok(())
    }
}

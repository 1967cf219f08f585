use crate::config::toml_config::TomlConfig;
use crate::config::{env, ConfigOverrides, ImportConfig, DEFAULT_ENV_FILE};
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "member-import")]
#[command(about = "Import members from a spreadsheet into the user service")]
pub struct CliConfig {
    /// Workbook to import (default: import-members.xlsx)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Directory for the CSV report (default: ./logs)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// dotenv file providing BaseURL
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Optional TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Timeout for each HTTP request (default: 30)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Password used when the row has none (default: @Default1)
    #[arg(long, conflicts_with = "no_default_password")]
    pub default_password: Option<String>,

    /// Leave the password unset when the row has none
    #[arg(long)]
    pub no_default_password: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            timeout_secs: self.timeout_secs,
            default_password: self.default_password.clone(),
            no_default_password: self.no_default_password,
        }
    }

    /// 載入 env 檔與設定檔後組出匯入設定
    pub fn load(&self) -> Result<ImportConfig> {
        env::load_env_file(&self.env_file)?;

        let settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading settings from: {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        ImportConfig::resolve(&self.overrides(), &settings)
    }
}

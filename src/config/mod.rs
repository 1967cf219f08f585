#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::transform::{TransformOptions, DEFAULT_PASSWORD};
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const BASE_URL_VAR: &str = "BaseURL";
pub const DEFAULT_ENV_FILE: &str = ".env.uat";
pub const DEFAULT_INPUT_PATH: &str = "import-members.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "./logs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 命令列覆寫值，優先於設定檔
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub default_password: Option<String>,
    pub no_default_password: bool,
}

/// 一次匯入所需的全部設定，啟動時建立後以參考傳遞
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub base_url: String,
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
    pub default_password: Option<String>,
}

impl ImportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_password: Some(DEFAULT_PASSWORD.to_string()),
        }
    }

    /// 合併設定來源：命令列 > 設定檔 > 環境變數 / 預設值
    pub fn resolve(overrides: &ConfigOverrides, settings: &TomlConfig) -> Result<Self> {
        let base_url = settings
            .base_url()
            .map(str::to_string)
            .or_else(|| env::env_var_or_none(BASE_URL_VAR))
            .ok_or_else(|| ImportError::MissingConfigError {
                field: BASE_URL_VAR.to_string(),
            })?;

        let mut config = Self::new(base_url.trim_end_matches('/'));

        if let Some(path) = overrides.input.clone().or_else(|| settings.input.path.clone()) {
            config.input_path = path;
        }
        if let Some(dir) = overrides
            .output_dir
            .clone()
            .or_else(|| settings.report.output_dir.clone())
        {
            config.output_dir = dir;
        }
        if let Some(secs) = overrides.timeout_secs.or(settings.service.timeout_seconds) {
            config.request_timeout = Duration::from_secs(secs);
        }

        config.default_password = if overrides.no_default_password {
            None
        } else {
            overrides
                .default_password
                .clone()
                .or_else(|| settings.defaults.password.clone())
                .or(config.default_password.take())
        };

        config.validate()?;
        Ok(config)
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            default_password: self.default_password.clone(),
        }
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url(BASE_URL_VAR, &self.base_url)?;
        validation::validate_path("input", &self.input_path)?;
        validation::validate_file_extension("input", &self.input_path, &WORKBOOK_EXTENSIONS)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_positive_number(
            "timeout_seconds",
            self.request_timeout.as_secs(),
            1,
        )?;
        if let Some(password) = &self.default_password {
            validation::validate_non_empty_string("default_password", password)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(toml: &str) -> TomlConfig {
        TomlConfig::from_toml_str(toml).unwrap()
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ImportConfig::resolve(
            &ConfigOverrides::default(),
            &settings("[service]\nbase_url = \"https://uat.example.com/\"\n"),
        )
        .unwrap();

        assert_eq!(config.base_url, "https://uat.example.com");
        assert_eq!(config.input_path, PathBuf::from("import-members.xlsx"));
        assert_eq!(config.output_dir, PathBuf::from("./logs"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_password.as_deref(), Some("@Default1"));
    }

    #[test]
    fn test_overrides_win_over_settings() {
        let settings = settings(
            r#"
[service]
base_url = "https://uat.example.com"
timeout_seconds = 5

[input]
path = "from-file.xlsx"

[defaults]
password = "FromFile1!"
"#,
        );
        let overrides = ConfigOverrides {
            input: Some(PathBuf::from("from-cli.xlsx")),
            timeout_secs: Some(12),
            ..Default::default()
        };

        let config = ImportConfig::resolve(&overrides, &settings).unwrap();
        assert_eq!(config.input_path, PathBuf::from("from-cli.xlsx"));
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(config.default_password.as_deref(), Some("FromFile1!"));
    }

    #[test]
    fn test_no_default_password() {
        let overrides = ConfigOverrides {
            no_default_password: true,
            default_password: Some("ignored".to_string()),
            ..Default::default()
        };
        let config = ImportConfig::resolve(
            &overrides,
            &settings("[service]\nbase_url = \"https://uat.example.com\"\n"),
        )
        .unwrap();
        assert_eq!(config.default_password, None);
        assert_eq!(config.transform_options().default_password, None);
    }

    #[test]
    fn test_missing_base_url() {
        if std::env::var(BASE_URL_VAR).is_ok() {
            return;
        }
        let err = ImportConfig::resolve(&ConfigOverrides::default(), &TomlConfig::default())
            .unwrap_err();
        assert!(matches!(err, ImportError::MissingConfigError { ref field } if field == "BaseURL"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = settings("[service]\nbase_url = \"https://uat.example.com\"\n");

        let zero_timeout = ConfigOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(ImportConfig::resolve(&zero_timeout, &base).is_err());

        let csv_input = ConfigOverrides {
            input: Some(PathBuf::from("members.csv")),
            ..Default::default()
        };
        assert!(ImportConfig::resolve(&csv_input, &base).is_err());

        let bad_url = settings("[service]\nbase_url = \"ftp://uat.example.com\"\n");
        assert!(ImportConfig::resolve(&ConfigOverrides::default(), &bad_url).is_err());
    }
}

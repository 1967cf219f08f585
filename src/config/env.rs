use crate::utils::error::{ImportError, Result};
use std::path::Path;

/// 載入 dotenv 檔案；檔案不存在不算錯誤，已存在的環境變數優先
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(true)
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Env file {} not found, using process environment", path.display());
            Ok(false)
        }
        Err(e) => Err(ImportError::ConfigError {
            message: format!("Failed to load env file {}: {}", path.display(), e),
        }),
    }
}

/// 讀取環境變數，空字串視為未設定
pub fn env_var_or_none(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

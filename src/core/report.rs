use crate::domain::model::{ImportStatus, OutcomeRecord};
use crate::utils::error::{ImportError, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const REPORT_HEADERS: [&str; 5] = ["row_number", "email", "status", "user_id", "error"];

/// CSV 報表中的一列
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    row_number: u32,
    email: &'a str,
    status: ImportStatus,
    user_id: &'a str,
    error: &'a str,
}

impl<'a> From<&'a OutcomeRecord> for ReportRow<'a> {
    fn from(record: &'a OutcomeRecord) -> Self {
        Self {
            row_number: record.row_number,
            email: &record.email,
            status: record.outcome.status(),
            user_id: record.outcome.user_id().unwrap_or(""),
            error: record.outcome.error().unwrap_or(""),
        }
    }
}

/// `<dir>/member_import_<YYYYMMDD_HHMMSS>.csv`
pub fn report_path(output_dir: &Path, started_at: DateTime<Local>) -> PathBuf {
    output_dir.join(format!(
        "member_import_{}.csv",
        started_at.format("%Y%m%d_%H%M%S")
    ))
}

/// 將每列結果寫入報表並同步輸出日誌
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// 建立報表檔（上層目錄不存在時自動建立）
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        tracing::debug!("Report file created: {}", path.display());
        Self::new(file)
    }
}

impl<W: Write> ReportWriter<W> {
    /// 先寫入標題列，沒有資料列時報表也有標題
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(REPORT_HEADERS)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// 寫入一筆結果；每筆都 flush，中斷時已處理的列仍保留在檔案中
    pub fn record(&mut self, record: &OutcomeRecord) -> Result<()> {
        self.writer.serialize(ReportRow::from(record))?;
        self.writer.flush()?;
        log_outcome(record);
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| ImportError::IoError(e.into_error()))
    }
}

fn log_outcome(record: &OutcomeRecord) {
    let row = record.row_number;
    let email = record.email.as_str();
    let user_id = record.outcome.user_id().unwrap_or("");
    let error = record.outcome.error().unwrap_or("");

    match record.outcome.status() {
        ImportStatus::Created => {
            tracing::info!("Created: Row {} → {} (ID: {})", row, email, user_id)
        }
        ImportStatus::Updated => {
            tracing::info!("Updated: Row {} → {} (ID: {})", row, email, user_id)
        }
        ImportStatus::Skipped => tracing::warn!("Skip Row {}: {}", row, error),
        ImportStatus::Failed => tracing::error!("Failed: Row {} → {} → {}", row, email, error),
        ImportStatus::Error => tracing::error!("Unexpected error at Row {}: {}", row, error),
    }
}

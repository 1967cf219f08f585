use crate::config::ImportConfig;
use crate::core::importer::MemberImporter;
use crate::core::report::{report_path, ReportWriter};
use crate::core::user_service::HttpUserService;
use crate::domain::model::{ImportSummary, Sheet};
use crate::utils::error::Result;
use chrono::Local;
use std::path::PathBuf;

/// 一次匯入的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub report_path: PathBuf,
    pub summary: ImportSummary,
}

pub struct ImportEngine<'a> {
    config: &'a ImportConfig,
}

impl<'a> ImportEngine<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<ImportReport> {
        tracing::info!("Starting member import from {}", self.config.input_path.display());

        // 先讀活頁簿，讀取失敗時不會產生報表檔
        let sheet = Sheet::open(&self.config.input_path)?;
        tracing::info!("Loaded {} rows from workbook", sheet.rows.len());

        let directory = HttpUserService::new(&self.config.base_url, self.config.request_timeout)?;
        let importer = MemberImporter::new(directory, self.config.transform_options());

        let report_path = report_path(&self.config.output_dir, Local::now());
        let mut report = ReportWriter::create(&report_path)?;

        let summary = importer.run(&sheet, &mut report).await?;
        report.finish()?;

        tracing::info!("📊 Import finished: {}", summary);
        tracing::info!("Report saved to: {}", report_path.display());

        Ok(ImportReport {
            report_path,
            summary,
        })
    }
}

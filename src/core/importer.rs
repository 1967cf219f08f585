use crate::core::report::ReportWriter;
use crate::core::transform::{cell_text, transform, TransformOptions};
use crate::core::user_service::create_or_update;
use crate::domain::model::{
    ColumnMap, ImportSummary, MemberField, Outcome, OutcomeRecord, RawRow, Sheet,
};
use crate::domain::ports::UserDirectory;
use crate::utils::error::{ImportError, Result};
use std::io::Write;

/// 逐列處理工作表：轉換 → 呼叫服務 → 寫入報表
pub struct MemberImporter<D: UserDirectory> {
    directory: D,
    options: TransformOptions,
}

impl<D: UserDirectory> MemberImporter<D> {
    pub fn new(directory: D, options: TransformOptions) -> Self {
        Self { directory, options }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// 單列失敗不會中止迴圈；只有報表寫入失敗會回傳錯誤
    pub async fn run<W: Write>(
        &self,
        sheet: &Sheet,
        report: &mut ReportWriter<W>,
    ) -> Result<ImportSummary> {
        let columns = ColumnMap::from_headers(&sheet.headers);
        for field in columns.missing_fields() {
            tracing::warn!("Column '{}' not found in header row", field.header());
        }

        tracing::info!("Importing {} rows", sheet.rows.len());

        let mut summary = ImportSummary::default();
        for row in &sheet.rows {
            let record = self.process_row(row, &columns).await;
            summary.record(record.outcome.status());
            report.record(&record)?;
        }

        Ok(summary)
    }

    async fn process_row(&self, row: &RawRow, columns: &ColumnMap) -> OutcomeRecord {
        // 轉換失敗時仍盡量保留 email 以便對照
        let email = cell_text(row, columns, MemberField::Email)
            .ok()
            .flatten()
            .unwrap_or_default()
            .to_string();

        let outcome = match transform(row, columns, &self.options) {
            Ok(payload) => create_or_update(&self.directory, &payload).await,
            Err(e @ ImportError::ValidationError { .. }) => Outcome::Skipped {
                error: e.report_message(),
            },
            Err(e) => Outcome::Error {
                error: e.report_message(),
            },
        };

        OutcomeRecord {
            row_number: row.row_number,
            email,
            outcome,
        }
    }
}

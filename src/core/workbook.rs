use crate::domain::model::{CellValue, RawRow, Sheet};
use crate::utils::error::{ImportError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 儲存格轉文字；整數型的浮點數不保留小數點
fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Text(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Text((*f as i64).to_string())
            } else {
                CellValue::Text(f.to_string())
            }
        }
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Invalid(e.to_string()),
    }
}

fn header_text(cell: &Data) -> String {
    match cell_to_value(cell) {
        CellValue::Text(text) => text.trim().to_string(),
        CellValue::Empty | CellValue::Invalid(_) => String::new(),
    }
}

impl Sheet {
    /// 開啟活頁簿並讀取第一個工作表
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Opening workbook: {}", path.display());

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::ProcessingError {
                message: format!("Workbook has no worksheets: {}", path.display()),
            })??;

        // range 從第一個非空儲存格開始，列號需加上起始偏移
        let first_row = range.start().map(|(row, _)| row).unwrap_or(0);
        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(header_text).collect(),
            None => return Ok(Sheet::default()),
        };

        let rows = rows
            .enumerate()
            .map(|(offset, cells)| RawRow {
                row_number: first_row + offset as u32 + 2,
                cells: cells.iter().map(cell_to_value).collect(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Loaded {} data rows with headers: {:?}",
            rows.len(),
            headers
        );

        Ok(Sheet { headers, rows })
    }
}

use crate::domain::model::{CellValue, ColumnMap, MemberField, MemberPayload, RawRow};
use crate::utils::error::{ImportError, Result};

pub const PLACEHOLDER: &str = "-";
pub const DEFAULT_PASSWORD: &str = "@Default1";
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields: First Name or Email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// `None` 時不補預設密碼，欄位留空不送出
    pub default_password: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            default_password: Some(DEFAULT_PASSWORD.to_string()),
        }
    }
}

/// 依欄位名稱取出修剪後的文字，空白視同未設定
pub fn cell_text<'a>(
    row: &'a RawRow,
    columns: &ColumnMap,
    field: MemberField,
) -> Result<Option<&'a str>> {
    let Some(index) = columns.column(field) else {
        return Ok(None);
    };

    match row.cells.get(index) {
        None | Some(CellValue::Empty) => Ok(None),
        Some(CellValue::Text(text)) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then_some(trimmed))
        }
        Some(CellValue::Invalid(code)) => Err(ImportError::ProcessingError {
            message: format!(
                "Invalid cell value {} in column '{}' at row {}",
                code,
                field.header(),
                row.row_number
            ),
        }),
    }
}

/// 將一列試算表資料轉成會員資料
pub fn transform(
    row: &RawRow,
    columns: &ColumnMap,
    options: &TransformOptions,
) -> Result<MemberPayload> {
    let title = cell_text(row, columns, MemberField::Title)?;
    let first_name = cell_text(row, columns, MemberField::FirstName)?;
    let last_name = cell_text(row, columns, MemberField::LastName)?;
    let password = cell_text(row, columns, MemberField::Password)?;
    let email = cell_text(row, columns, MemberField::Email)?;

    let (Some(first_name), Some(email)) = (first_name, email) else {
        return Err(ImportError::ValidationError {
            message: MISSING_REQUIRED_FIELDS.to_string(),
        });
    };

    Ok(MemberPayload {
        title: title.unwrap_or(PLACEHOLDER).to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.unwrap_or(PLACEHOLDER).to_string(),
        email: email.to_string(),
        password: password
            .map(str::to_string)
            .or_else(|| options.default_password.clone()),
    })
}

use serde::Serialize;
use std::fmt;

/// 固定送出的 MFA 強制啟用旗標
pub const FORCE_FACTOR_ACTIVATION: &str = "true";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Text(String),
    /// 試算表的錯誤儲存格，例如 `#DIV/0!`
    Invalid(String),
}

/// 工作表中的一列資料，欄位順序與標題列一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: u32,
    pub cells: Vec<CellValue>,
}

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// 會員欄位與試算表標題名稱的對應
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    Title,
    FirstName,
    LastName,
    Password,
    Email,
}

impl MemberField {
    pub const ALL: [MemberField; 5] = [
        MemberField::Title,
        MemberField::FirstName,
        MemberField::LastName,
        MemberField::Password,
        MemberField::Email,
    ];

    pub fn header(self) -> &'static str {
        match self {
            MemberField::Title => "Title",
            MemberField::FirstName => "First Name",
            MemberField::LastName => "Last Name",
            MemberField::Password => "password",
            MemberField::Email => "Email",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// 每張工作表建立一次的欄位索引
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; 5],
}

impl ColumnMap {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut indices = [None; 5];
        for field in MemberField::ALL {
            indices[field.slot()] = headers.iter().position(|h| h == field.header());
        }
        Self { indices }
    }

    pub fn column(&self, field: MemberField) -> Option<usize> {
        self.indices[field.slot()]
    }

    pub fn missing_fields(&self) -> Vec<MemberField> {
        MemberField::ALL
            .into_iter()
            .filter(|field| self.column(*field).is_none())
            .collect()
    }
}

/// 送往 CreateUser 的會員資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberPayload {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
}

impl MemberPayload {
    /// 表單欄位，未設定的欄位不會送出
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("title", self.title.as_str()),
            ("firstName", self.first_name.as_str()),
            ("lastName", self.last_name.as_str()),
            ("email", self.email.as_str()),
        ];
        if let Some(password) = &self.password {
            fields.push(("password", password.as_str()));
        }
        fields.push(("isFactorForceActivated", FORCE_FACTOR_ACTIVATION));
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Created,
    Updated,
    Failed,
    Skipped,
    Error,
}

impl ImportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportStatus::Created => "created",
            ImportStatus::Updated => "updated",
            ImportStatus::Failed => "failed",
            ImportStatus::Skipped => "skipped",
            ImportStatus::Error => "error",
        }
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 單列的最終結果，每種狀態只帶自己需要的欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { user_id: String },
    Updated { user_id: String },
    Failed { error: String },
    Skipped { error: String },
    Error { error: String },
}

impl Outcome {
    pub fn status(&self) -> ImportStatus {
        match self {
            Outcome::Created { .. } => ImportStatus::Created,
            Outcome::Updated { .. } => ImportStatus::Updated,
            Outcome::Failed { .. } => ImportStatus::Failed,
            Outcome::Skipped { .. } => ImportStatus::Skipped,
            Outcome::Error { .. } => ImportStatus::Error,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Outcome::Created { user_id } | Outcome::Updated { user_id } => Some(user_id),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Failed { error } | Outcome::Skipped { error } | Outcome::Error { error } => {
                Some(error)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub row_number: u32,
    pub email: String,
    pub outcome: Outcome,
}

/// 匯入結束時的統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl ImportSummary {
    pub fn record(&mut self, status: ImportStatus) {
        match status {
            ImportStatus::Created => self.created += 1,
            ImportStatus::Updated => self.updated += 1,
            ImportStatus::Failed => self.failed += 1,
            ImportStatus::Skipped => self.skipped += 1,
            ImportStatus::Error => self.errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.failed + self.skipped + self.errors
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} created, {} updated, {} failed, {} skipped, {} errors",
            self.total(),
            self.created,
            self.updated,
            self.failed,
            self.skipped,
            self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_map_by_name() {
        let map = ColumnMap::from_headers(&headers(&["Email", "Phone", "First Name"]));
        assert_eq!(map.column(MemberField::Email), Some(0));
        assert_eq!(map.column(MemberField::FirstName), Some(2));
        assert_eq!(map.column(MemberField::Title), None);
        assert_eq!(
            map.missing_fields(),
            vec![
                MemberField::Title,
                MemberField::LastName,
                MemberField::Password
            ]
        );
    }

    #[test]
    fn test_column_map_is_case_sensitive() {
        let map = ColumnMap::from_headers(&headers(&["email", "Password"]));
        assert_eq!(map.column(MemberField::Email), None);
        assert_eq!(map.column(MemberField::Password), None);
    }

    #[test]
    fn test_form_fields_strip_unset_password() {
        let payload = MemberPayload {
            title: "-".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            password: None,
        };
        let fields = payload.form_fields();
        assert_eq!(fields.len(), 5);
        assert!(fields.iter().all(|(key, _)| *key != "password"));
        assert_eq!(fields.last(), Some(&("isFactorForceActivated", "true")));
    }

    #[test]
    fn test_outcome_fields_follow_status() {
        let created = Outcome::Created {
            user_id: "U1".to_string(),
        };
        assert_eq!(created.status(), ImportStatus::Created);
        assert_eq!(created.user_id(), Some("U1"));
        assert_eq!(created.error(), None);

        let skipped = Outcome::Skipped {
            error: "missing".to_string(),
        };
        assert_eq!(skipped.status().to_string(), "skipped");
        assert_eq!(skipped.user_id(), None);
        assert_eq!(skipped.error(), Some("missing"));
    }

    #[test]
    fn test_summary_display() {
        let mut summary = ImportSummary::default();
        summary.record(ImportStatus::Created);
        summary.record(ImportStatus::Created);
        summary.record(ImportStatus::Skipped);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            summary.to_string(),
            "3 rows: 2 created, 0 updated, 0 failed, 1 skipped, 0 errors"
        );
    }
}

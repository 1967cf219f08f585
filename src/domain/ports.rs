use crate::domain::model::MemberPayload;
use crate::utils::error::Result;
use async_trait::async_trait;

/// CreateUser 回應的三種結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserResponse {
    Created { user_id: String },
    DuplicateEmail,
    Rejected { detail: String },
}

/// 遠端使用者服務。傳輸層錯誤以 `Err` 回傳，由呼叫端轉成 `failed`
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn create_user(&self, payload: &MemberPayload) -> Result<CreateUserResponse>;

    async fn find_user_id_by_email(&self, email: &str) -> Result<Option<String>>;

    /// 回傳 HTTP 狀態碼
    async fn update_user_profile(&self, user_id: &str, payload: &MemberPayload) -> Result<u16>;
}

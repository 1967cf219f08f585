use crate::domain::model::{MemberPayload, Outcome};
use crate::domain::ports::{CreateUserResponse, UserDirectory};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const CREATE_USER_PATH: &str = "/api/User/CreateUser";
pub const SEARCH_USER_PATH: &str = "/api/Lookup/SearchUser";
pub const UPDATE_PROFILE_PATH: &str = "/api/User/UpdateUserProfile";

pub const DUPLICATE_EMAIL_CODE: &str = "email_duplicate";
pub const USER_NOT_FOUND_FOR_UPDATE: &str = "User not found for update";

/// 透過 HTTP 呼叫使用者管理服務
#[derive(Debug, Clone)]
pub struct HttpUserService {
    base_url: String,
    client: Client,
}

impl HttpUserService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// id 可能是字串或數字
fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 錯誤回應的說明：errorMessage > error > 整個 body
fn rejection_detail(body: &Value) -> String {
    body.get("errorMessage")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

pub(crate) fn parse_create_response(body: &Value) -> CreateUserResponse {
    if body.get("success").and_then(Value::as_bool) == Some(true) {
        let user_id = body
            .get("value")
            .and_then(|value| value.get("id"))
            .and_then(id_to_string)
            .unwrap_or_default();
        return CreateUserResponse::Created { user_id };
    }

    if body.get("errorMessage").and_then(Value::as_str) == Some(DUPLICATE_EMAIL_CODE) {
        return CreateUserResponse::DuplicateEmail;
    }

    CreateUserResponse::Rejected {
        detail: rejection_detail(body),
    }
}

#[async_trait::async_trait]
impl UserDirectory for HttpUserService {
    async fn create_user(&self, payload: &MemberPayload) -> Result<CreateUserResponse> {
        let url = self.endpoint(CREATE_USER_PATH);
        tracing::debug!("POST {} for {}", url, payload.email);

        let response = self
            .client
            .post(&url)
            .form(&payload.form_fields())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("CreateUser response status: {}", status);

        if status != StatusCode::OK {
            return Ok(CreateUserResponse::Rejected {
                detail: format!("HTTP {}: {}", status.as_u16(), text),
            });
        }

        let body: Value = serde_json::from_str(&text)?;
        Ok(parse_create_response(&body))
    }

    async fn find_user_id_by_email(&self, email: &str) -> Result<Option<String>> {
        let url = self.endpoint(SEARCH_USER_PATH);
        tracing::debug!("GET {} for {}", url, email);

        let response = self
            .client
            .get(&url)
            .query(&[("types", "email"), ("username", email)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::warn!(
                "User lookup for {} returned HTTP {}",
                email,
                response.status()
            );
            return Ok(None);
        }

        let users: Value = response.json().await?;
        Ok(users
            .as_array()
            .and_then(|users| users.first())
            .and_then(|user| user.get("id"))
            .and_then(id_to_string))
    }

    async fn update_user_profile(&self, user_id: &str, payload: &MemberPayload) -> Result<u16> {
        let url = self.endpoint(UPDATE_PROFILE_PATH);
        tracing::debug!("POST {} for user {}", url, user_id);

        let form = [
            ("userId", user_id),
            ("personalTitle", payload.title.as_str()),
            ("firstName", payload.first_name.as_str()),
            ("lastName", payload.last_name.as_str()),
        ];

        let response = self.client.post(&url).form(&form).send().await?;
        Ok(response.status().as_u16())
    }
}

/// 建立會員；email 重複時改為查詢後更新個人資料
///
/// 只會回傳 `Created`、`Updated` 或 `Failed`。
pub async fn create_or_update<D: UserDirectory + ?Sized>(
    directory: &D,
    payload: &MemberPayload,
) -> Outcome {
    let response = match directory.create_user(payload).await {
        Ok(response) => response,
        Err(e) => {
            return Outcome::Failed {
                error: e.to_string(),
            }
        }
    };

    match response {
        CreateUserResponse::Created { user_id } => {
            if user_id.is_empty() {
                tracing::warn!("CreateUser succeeded for {} without a user id", payload.email);
            }
            Outcome::Created { user_id }
        }
        CreateUserResponse::Rejected { detail } => Outcome::Failed { error: detail },
        CreateUserResponse::DuplicateEmail => {
            tracing::debug!("Duplicate email {}, switching to profile update", payload.email);
            update_existing(directory, payload).await
        }
    }
}

async fn update_existing<D: UserDirectory + ?Sized>(
    directory: &D,
    payload: &MemberPayload,
) -> Outcome {
    let user_id = match directory.find_user_id_by_email(&payload.email).await {
        Ok(Some(user_id)) => user_id,
        Ok(None) => {
            // 服務回報重複卻查不到使用者
            tracing::error!(
                "CreateUser reported {} as duplicate but the lookup found no user",
                payload.email
            );
            return Outcome::Failed {
                error: USER_NOT_FOUND_FOR_UPDATE.to_string(),
            };
        }
        Err(e) => {
            tracing::error!("Error fetching user by email {}: {}", payload.email, e);
            return Outcome::Failed {
                error: format!("User lookup failed: {}", e),
            };
        }
    };

    match directory.update_user_profile(&user_id, payload).await {
        Ok(200) => Outcome::Updated { user_id },
        Ok(status) => Outcome::Failed {
            error: format!("Profile update for user {} returned HTTP {}", user_id, status),
        },
        Err(e) => Outcome::Failed {
            error: format!("Profile update for user {} failed: {}", user_id, e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_created() {
        let body = json!({"success": true, "value": {"id": "U1"}});
        assert_eq!(
            parse_create_response(&body),
            CreateUserResponse::Created {
                user_id: "U1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_created_numeric_and_missing_id() {
        let numeric = json!({"success": true, "value": {"id": 42}});
        assert_eq!(
            parse_create_response(&numeric),
            CreateUserResponse::Created {
                user_id: "42".to_string()
            }
        );

        let missing = json!({"success": true});
        assert_eq!(
            parse_create_response(&missing),
            CreateUserResponse::Created {
                user_id: String::new()
            }
        );
    }

    #[test]
    fn test_parse_duplicate() {
        let body = json!({"success": false, "errorMessage": "email_duplicate"});
        assert_eq!(
            parse_create_response(&body),
            CreateUserResponse::DuplicateEmail
        );
    }

    #[test]
    fn test_parse_rejections() {
        let with_message = json!({"success": false, "errorMessage": "password_too_weak"});
        assert_eq!(
            parse_create_response(&with_message),
            CreateUserResponse::Rejected {
                detail: "password_too_weak".to_string()
            }
        );

        let with_error = json!({"success": false, "error": "bad request"});
        assert_eq!(
            parse_create_response(&with_error),
            CreateUserResponse::Rejected {
                detail: "bad request".to_string()
            }
        );

        let bare = json!({"success": false});
        assert_eq!(
            parse_create_response(&bare),
            CreateUserResponse::Rejected {
                detail: r#"{"success":false}"#.to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let service =
            HttpUserService::new("http://users.example.com/", Duration::from_secs(30)).unwrap();
        assert_eq!(
            service.endpoint(CREATE_USER_PATH),
            "http://users.example.com/api/User/CreateUser"
        );
    }
}

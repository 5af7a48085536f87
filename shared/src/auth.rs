//! 登录与注册表单
//!
//! 表单在发请求前做完全部校验；请求失败时按状态码映射成页面上的提示。

use std::sync::LazyLock;

use regex::Regex;

use crate::client::{ApiClient, Navigator};
use crate::error::{ApiError, ApiResult, ValidationError};
use crate::protocol::{AuthResponse, LoginRequest, RegisterRequest};
use crate::request::HttpClient;
use crate::session::KeyValueStore;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const NAME_MIN_LEN: usize = 2;
pub const PASSWORD_MIN_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =========================================================
// 表单
// =========================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if is_blank(&self.email) || is_blank(&self.password) {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// 检查顺序：必填 → 姓名长度 → 邮箱格式 → 密码长度 → 两次密码一致
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if is_blank(&self.name) || is_blank(&self.email) || is_blank(&self.password) {
            return Err(ValidationError::MissingFields);
        }
        // 只在长度检查时去掉首尾空白，提交的是原样输入
        if self.name.trim().chars().count() < NAME_MIN_LEN {
            return Err(ValidationError::NameTooShort);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

// =========================================================
// 结果
// =========================================================

/// 注册成功后的去向
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// 响应带了凭据，直接登录
    SignedIn { credential: String },
    /// 没有凭据，转去登录页
    LoginRequired,
}

/// 登录失败时页面显示的文本
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(e) => e.to_string(),
        ApiError::Unauthorized => "Invalid email or password".to_string(),
        _ => err.user_message("Login failed. Please try again."),
    }
}

/// 注册失败时页面显示的文本
pub fn register_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(e) => e.to_string(),
        ApiError::Status { status: 400, .. } => err
            .server_message()
            .unwrap_or("User already exists")
            .to_string(),
        _ => err.user_message("Registration failed. Please try again."),
    }
}

// =========================================================
// API 动作
// =========================================================

impl<C, S, N> ApiClient<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    /// 成功时返回凭据；会话的写入由调用方完成
    pub async fn login(&self, form: &LoginForm) -> ApiResult<String> {
        let request = form.validate()?;
        let AuthResponse { token, .. } = self.call(&request).await?;
        token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode("login response carries no token".to_string()))
    }

    pub async fn register(&self, form: &RegisterForm) -> ApiResult<Registration> {
        let request = form.validate()?;
        let AuthResponse { token, message } = self.call(&request).await?;
        if let Some(message) = message {
            log::info!("register: {}", message);
        }
        Ok(match token.filter(|t| !t.is_empty()) {
            Some(credential) => Registration::SignedIn { credential },
            None => Registration::LoginRequired,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use crate::request::HttpMethod;
    use crate::session::MemoryStore;
    use crate::{LOGIN_PATH, STORAGE_TOKEN_KEY};
    use serde_json::json;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Ada".into(),
            email: "ada@home.io".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.io"));
        assert!(!is_valid_email("@c.io"));
    }

    #[test]
    fn login_validation_order() {
        let form = LoginForm {
            email: " ".into(),
            password: "x".into(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingFields);

        let form = LoginForm {
            email: "not-an-email".into(),
            password: "x".into(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidEmail);
    }

    #[test]
    fn register_validation_order() {
        let cases = [
            (RegisterForm { name: "".into(), ..register_form() }, ValidationError::MissingFields),
            (RegisterForm { name: " A ".into(), ..register_form() }, ValidationError::NameTooShort),
            (RegisterForm { email: "ada@home".into(), ..register_form() }, ValidationError::InvalidEmail),
            (
                RegisterForm {
                    password: "12345".into(),
                    confirm_password: "12345".into(),
                    ..register_form()
                },
                ValidationError::PasswordTooShort,
            ),
            (
                RegisterForm {
                    confirm_password: "secret2".into(),
                    ..register_form()
                },
                ValidationError::PasswordMismatch,
            ),
        ];
        for (form, expected) in cases {
            assert_eq!(form.validate().unwrap_err(), expected);
        }
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn register_sends_name_as_typed() {
        let form = RegisterForm {
            name: "  Ada Lovelace ".into(),
            ..register_form()
        };
        let request = form.validate().unwrap();
        assert_eq!(request.name, "  Ada Lovelace ");
        assert_eq!(request.email, "ada@home.io");
    }

    #[test]
    fn register_messages() {
        let bad_request = ApiError::Status {
            status: 400,
            message: None,
        };
        assert_eq!(register_error_message(&bad_request), "User already exists");

        let conflict = ApiError::Status {
            status: 409,
            message: Some("Email taken".into()),
        };
        assert_eq!(register_error_message(&conflict), "Email taken");

        let down = ApiError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(register_error_message(&down), "Registration failed. Please try again.");
    }

    #[tokio::test]
    async fn invalid_login_is_intercepted_globally() {
        let client = test_client(MemoryStore::with(&[(STORAGE_TOKEN_KEY, "stale")]));
        client.http().mock_response(
            HttpMethod::Post,
            "http://hub.test/api/auth/login",
            401,
            json!({ "message": "Invalid credentials" }),
        );
        let form = LoginForm {
            email: "ada@home.io".into(),
            password: "wrong".into(),
        };

        let err = client.login(&form).await.unwrap_err();

        assert_eq!(login_error_message(&err), "Invalid email or password");
        assert_eq!(client.redirects(), vec![LOGIN_PATH.to_string()]);
        assert!(client.store().get(STORAGE_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn login_requires_a_token() {
        let client = test_client(MemoryStore::default());
        client.http().mock_response(
            HttpMethod::Post,
            "http://hub.test/api/auth/login",
            200,
            json!({ "message": "ok" }),
        );
        let form = LoginForm {
            email: "ada@home.io".into(),
            password: "secret1".into(),
        };

        let err = client.login(&form).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert_eq!(login_error_message(&err), "Login failed. Please try again.");
    }

    #[tokio::test]
    async fn register_with_and_without_token() {
        let client = test_client(MemoryStore::default());
        client.http().mock_response(
            HttpMethod::Post,
            "http://hub.test/api/auth/register",
            201,
            json!({ "token": "fresh", "message": "created" }),
        );
        assert_eq!(
            client.register(&register_form()).await.unwrap(),
            Registration::SignedIn {
                credential: "fresh".into()
            }
        );

        client.http().mock_response(
            HttpMethod::Post,
            "http://hub.test/api/auth/register",
            201,
            json!({ "message": "created" }),
        );
        assert_eq!(
            client.register(&register_form()).await.unwrap(),
            Registration::LoginRequired
        );
    }
}

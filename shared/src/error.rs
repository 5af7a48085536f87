use thiserror::Error;

// =========================================================
// 表单校验错误 (请求发出前拦截)
// =========================================================

/// 校验失败不会发出任何网络请求，`Display` 即为界面上显示的文本
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Device name is required")]
    DeviceNameRequired,
    #[error("Room is required")]
    RoomRequired,
}

// =========================================================
// 传输层错误
// =========================================================

/// 由 `HttpClient` 实现返回
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 请求构建失败
    #[error("request build failed: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    Network(String),
    /// 响应体读取失败
    #[error("failed to read response body: {0}")]
    Body(String),
}

// =========================================================
// API 调用错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401：会话已被拦截器清除，页面正在跳转登录
    #[error("authentication rejected")]
    Unauthorized,
    /// 其它非 2xx 响应，`message` 取自响应体（如果有）
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// 响应结构无法容错解析
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 服务端在错误响应体中给出的 `message`
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// 界面上展示的文本；没有更具体的信息时使用 `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_ignores_blank_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("  ".into()),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn validation_message_is_display_text() {
        let err: ApiError = ValidationError::RoomRequired.into();
        assert_eq!(err.to_string(), "Room is required");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Device exists".into()),
        };
        assert_eq!(err.user_message("Failed"), "Device exists");

        let err = ApiError::Transport(TransportError::Network("offline".into()));
        assert_eq!(err.user_message("Failed"), "Failed");
        assert_eq!(
            ApiError::from(ValidationError::PasswordMismatch).user_message("Failed"),
            "Passwords do not match"
        );
    }
}

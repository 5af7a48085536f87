//! SmartHome Hub 共享核心
//!
//! 与运行目标无关的部分都放在这里，前端只负责把浏览器 API 接到下面这些接缝上：
//! - `request`: HTTP 抽象（`HttpClient` trait）
//! - `session`: 凭据持久化约定（`KeyValueStore` trait）
//! - `client`: 带凭据注入与 401 拦截的 API 客户端
//! - `devices` / `logs`: 领域模型与集合操作
//! - `view`: 资源视图的加载状态机

pub mod auth;
pub mod client;
pub mod config;
pub mod date;
pub mod devices;
pub mod error;
pub mod health;
pub mod lenient;
pub mod logs;
pub mod protocol;
pub mod request;
pub mod session;
pub mod view;

pub use client::{ApiClient, Navigator};
pub use config::ClientConfig;
pub use devices::{AcMode, AcSettings, Device, DeviceCounts, DeviceDraft, DeviceStatus, DeviceType};
pub use error::{ApiError, ApiResult, TransportError, ValidationError};
pub use health::HealthStatus;
pub use logs::{DeviceNames, LogEntry, LogTime};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::{KeyValueStore, Session};
pub use view::ResourceView;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 凭据在持久化存储中的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 用户标签（登录邮箱）在持久化存储中的键
pub const STORAGE_USER_KEY: &str = "user";
/// 携带凭据的请求头，值为原始 token，不带 `Bearer` 前缀
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 认证失败时整页跳转的目标
pub const LOGIN_PATH: &str = "/login";

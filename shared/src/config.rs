//! 客户端运行配置

use std::time::Duration;

/// 未配置时使用的后端地址
pub const DEFAULT_API_BASE_URL: &str = "https://smart-home-iot-mern-api.onrender.com/api";
/// 健康探测的固定轮询间隔
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 后端 REST 根路径（含 `/api`），不带结尾 `/`
    pub api_base_url: String,
    pub health_interval: Duration,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            health_interval: HEALTH_POLL_INTERVAL,
        }
    }

    /// 拼接完整 URL
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ClientConfig::new("http://localhost:5000/api/");
        assert_eq!(config.endpoint("/devices"), "http://localhost:5000/api/devices");
        assert_eq!(config.endpoint("logs"), "http://localhost:5000/api/logs");
    }

    #[test]
    fn default_polls_every_thirty_seconds() {
        let config = ClientConfig::default();
        assert_eq!(config.health_interval, Duration::from_secs(30));
        assert!(config.api_base_url.ends_with("/api"));
    }
}

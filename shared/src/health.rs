//! 后端存活探测

use crate::client::{ApiClient, Navigator};
use crate::error::ApiResult;
use crate::protocol::HealthCheck;
use crate::request::HttpClient;
use crate::session::KeyValueStore;

/// 三态：首次结果返回前为 `Unknown`，此时指示器不渲染
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Online,
    Offline,
}

impl HealthStatus {
    /// 任何失败都视为离线
    pub fn from_result<T>(result: &ApiResult<T>) -> Self {
        if result.is_ok() {
            HealthStatus::Online
        } else {
            HealthStatus::Offline
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, HealthStatus::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "",
            HealthStatus::Online => "System Online",
            HealthStatus::Offline => "System Offline",
        }
    }
}

impl<C, S, N> ApiClient<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub async fn check_health(&self) -> HealthStatus {
        let status = HealthStatus::from_result(&self.call(&HealthCheck).await);
        log::debug!("health check: {:?}", status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use crate::request::HttpMethod;
    use crate::session::MemoryStore;
    use serde_json::json;

    const HEALTH_URL: &str = "http://hub.test/api/health";

    #[tokio::test]
    async fn health_check_maps_outcomes() {
        let client = test_client(MemoryStore::default());
        client
            .http()
            .mock_response(HttpMethod::Get, HEALTH_URL, 200, json!({ "status": "ok" }));
        assert_eq!(client.check_health().await, HealthStatus::Online);

        client
            .http()
            .mock_response(HttpMethod::Get, HEALTH_URL, 503, json!({}));
        assert_eq!(client.check_health().await, HealthStatus::Offline);

        let client = test_client(MemoryStore::default());
        client.http().mock_network_failure(HttpMethod::Get, HEALTH_URL);
        assert_eq!(client.check_health().await, HealthStatus::Offline);
    }

    #[test]
    fn unknown_renders_nothing() {
        assert!(!HealthStatus::default().is_known());
        assert_eq!(HealthStatus::Online.label(), "System Online");
        assert_eq!(HealthStatus::Offline.label(), "System Offline");
    }
}

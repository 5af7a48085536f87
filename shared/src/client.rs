//! API 客户端
//!
//! 所有请求都经过 `ApiClient::call`：
//! - 发送时从持久化存储读取最新凭据，原样放入 `Authorization` 头（无前缀）
//! - 收到 401 时清除持久化会话并整页跳转到登录页，不经过应用内路由；
//!   这是全局副作用，与发起请求的页面无关
//! - 其它失败不重试，交给调用方处理

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::protocol::Endpoint;
use crate::request::{HttpClient, HttpRequest};
use crate::session::{KeyValueStore, Session, stored_credential};
use crate::{HEADER_AUTHORIZATION, LOGIN_PATH};

/// 绕过应用内路由的整页跳转
pub trait Navigator {
    fn hard_redirect(&self, path: &str);
}

#[derive(Clone)]
pub struct ApiClient<C, S, N> {
    config: ClientConfig,
    http: C,
    store: S,
    navigator: N,
}

impl<C, S, N> ApiClient<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(config: ClientConfig, http: C, store: S, navigator: N) -> Self {
        Self {
            config,
            http,
            store,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 发送一个接口请求并解码响应
    pub async fn call<E: Endpoint>(&self, endpoint: &E) -> ApiResult<E::Response> {
        let path = endpoint.path();
        let url = self.config.endpoint(&path);

        let mut req = HttpRequest::new(&url, E::METHOD).with_header("Content-Type", "application/json");
        if let Some(credential) = stored_credential(&self.store) {
            req = req.with_header(HEADER_AUTHORIZATION, &credential);
        }
        if let Some(body) = endpoint.body() {
            req = req.with_body(body);
        }

        log::debug!("{} {}", E::METHOD.as_str(), path);
        let resp = self.http.send(req).await.map_err(|e| {
            log::warn!("{} {} failed: {}", E::METHOD.as_str(), path, e);
            ApiError::from(e)
        })?;

        if resp.status == 401 {
            log::warn!("{} {} rejected with 401, clearing session", E::METHOD.as_str(), path);
            Session::clear_persisted(&self.store);
            self.navigator.hard_redirect(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }

        let body = resp.json_value();
        if !resp.ok() {
            let message = body
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string);
            log::warn!(
                "{} {} returned {}: {}",
                E::METHOD.as_str(),
                path,
                resp.status,
                message.as_deref().unwrap_or("-")
            );
            return Err(ApiError::Status {
                status: resp.status,
                message,
            });
        }

        E::decode(body)
    }
}

// =========================================================
// 测试工具: RecordingNavigator
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn hard_redirect(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
    }
}

#[cfg(test)]
pub type TestClient =
    ApiClient<crate::request::MockHttpClient, crate::session::MemoryStore, RecordingNavigator>;

#[cfg(test)]
pub fn test_client(store: crate::session::MemoryStore) -> TestClient {
    ApiClient::new(
        ClientConfig::new("http://hub.test/api"),
        crate::request::MockHttpClient::new(),
        store,
        RecordingNavigator::default(),
    )
}

#[cfg(test)]
impl TestClient {
    pub fn http(&self) -> &crate::request::MockHttpClient {
        &self.http
    }

    pub fn redirects(&self) -> Vec<String> {
        self.navigator.visits.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{HealthCheck, ListDevices, ListLogs};
    use crate::request::HttpMethod;
    use crate::session::MemoryStore;
    use crate::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
    use serde_json::json;

    #[tokio::test]
    async fn credential_is_attached_without_prefix() {
        let client = test_client(MemoryStore::with(&[(STORAGE_TOKEN_KEY, "raw-token")]));
        client
            .http()
            .mock_response(HttpMethod::Get, "http://hub.test/api/health", 200, json!({}));

        client.call(&HealthCheck).await.unwrap();

        let req = client.http().last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("raw-token"));
    }

    #[tokio::test]
    async fn credential_is_read_fresh_for_every_request() {
        let client = test_client(MemoryStore::default());
        client
            .http()
            .mock_response(HttpMethod::Get, "http://hub.test/api/health", 200, json!({}));

        client.call(&HealthCheck).await.unwrap();
        assert_eq!(client.http().last_request().unwrap().header("Authorization"), None);

        client.store().set(STORAGE_TOKEN_KEY, "later");
        client.call(&HealthCheck).await.unwrap();
        assert_eq!(
            client.http().last_request().unwrap().header("Authorization"),
            Some("later")
        );
    }

    #[tokio::test]
    async fn unauthorized_clears_storage_and_redirects() {
        for (method, url, endpoint_is_logs) in [
            (HttpMethod::Get, "http://hub.test/api/devices", false),
            (HttpMethod::Get, "http://hub.test/api/logs", true),
        ] {
            let client = test_client(MemoryStore::with(&[
                (STORAGE_TOKEN_KEY, "expired"),
                (STORAGE_USER_KEY, "me@x.io"),
            ]));
            client
                .http()
                .mock_response(method, url, 401, json!({ "message": "Token expired" }));

            let err = if endpoint_is_logs {
                client.call(&ListLogs { device_id: None }).await.unwrap_err()
            } else {
                client.call(&ListDevices).await.unwrap_err()
            };

            assert_eq!(err, ApiError::Unauthorized);
            assert!(client.store().get(STORAGE_TOKEN_KEY).is_none());
            assert!(client.store().get(STORAGE_USER_KEY).is_none());
            assert_eq!(client.redirects(), vec![LOGIN_PATH.to_string()]);
        }
    }

    #[tokio::test]
    async fn server_message_is_surfaced() {
        let client = test_client(MemoryStore::default());
        client.http().mock_response(
            HttpMethod::Get,
            "http://hub.test/api/devices",
            500,
            json!({ "message": "db down" }),
        );

        let err = client.call(&ListDevices).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.server_message(), Some("db down"));
        assert!(client.redirects().is_empty());
    }

    #[tokio::test]
    async fn network_failure_is_not_retried() {
        let client = test_client(MemoryStore::default());
        client
            .http()
            .mock_network_failure(HttpMethod::Get, "http://hub.test/api/health");

        let err = client.call(&HealthCheck).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(client.http().request_count(), 1);
    }
}

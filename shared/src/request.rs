use serde::de::DeserializeOwned;

use crate::error::TransportError;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// 响应体按 JSON 读取；空体或非 JSON（如纯文本 ack）视为 `null`
    pub fn json_value(&self) -> serde_json::Value {
        if self.body.trim().is_empty() {
            return serde_json::Value::Null;
        }
        self.json().unwrap_or_else(|e| {
            log::debug!("response body is not JSON ({}), treating as null", e);
            serde_json::Value::Null
        })
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器 fetch 返回的 future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD URL", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 模拟网络故障的请求
    failures: RefCell<Vec<String>>,
    /// 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            failures: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn route(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::route(method, url), (status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::route(method, url), (status, body.to_string()));
    }

    pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
        self.failures.borrow_mut().push(Self::route(method, url));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let route = Self::route(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        if self.failures.borrow().contains(&route) {
            return Err(TransportError::Network("connection refused".to_string()));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&route) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_body_reads_as_null() {
        let resp = HttpResponse {
            status: 200,
            body: "OK".to_string(),
        };
        assert!(resp.ok());
        assert_eq!(resp.json_value(), serde_json::Value::Null);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = HttpRequest::new("http://x/api", HttpMethod::Get).with_header("Authorization", "abc");
        assert_eq!(req.header("authorization"), Some("abc"));
        assert_eq!(req.header("X-Other"), None);
    }
}

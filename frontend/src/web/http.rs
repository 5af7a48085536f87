//! HTTP 传输实现
//!
//! 用 `gloo-net` 发送请求，实现共享层的 `HttpClient` trait。
//! 凭据注入与 401 拦截都在共享层的 `ApiClient` 中完成，这里只负责传输。

use gloo_net::http::{Request, RequestBuilder};
use smarthome_shared::{HttpClient, HttpMethod, HttpRequest, HttpResponse, TransportError};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Patch => Request::patch(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = req
            .headers
            .iter()
            .fold(Self::builder(req.method, &req.url), |builder, (key, value)| {
                builder.header(key, value)
            });

        let response = match req.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| TransportError::RequestBuild(e.to_string()))?
                .send()
                .await,
            None => builder
                .build()
                .map_err(|e| TransportError::RequestBuild(e.to_string()))?
                .send()
                .await,
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

//! 后端 REST 接口定义
//!
//! 每个接口是一个实现了 `Endpoint` 的请求结构：方法、路径、请求体以及
//! 响应的容错解码都集中在这里，`ApiClient` 只负责发送和拦截。

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::devices::{AcSettings, Device, DeviceDraft, DeviceStatus};
use crate::error::ApiResult;
use crate::lenient;
use crate::logs::LogEntry;
use crate::request::HttpMethod;

/// 定义请求与响应关系及元数据的 trait
pub trait Endpoint {
    /// 解码后的响应类型
    type Response;
    /// HTTP 方法
    const METHOD: HttpMethod;

    /// 相对于 API 根路径的路径
    fn path(&self) -> String;

    /// JSON 请求体
    fn body(&self) -> Option<Value> {
        None
    }

    /// 解码 2xx 响应体（空体为 `null`）
    fn decode(body: Value) -> ApiResult<Self::Response>;
}

// =========================================================
// 认证
// =========================================================

/// 登录 / 注册的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    fn decode(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_else(|e| {
            log::warn!("unexpected auth response shape: {}", e);
            Self::default()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Endpoint for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }

    fn decode(body: Value) -> ApiResult<AuthResponse> {
        Ok(AuthResponse::decode(body))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Endpoint for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }

    fn decode(body: Value) -> ApiResult<AuthResponse> {
        Ok(AuthResponse::decode(body))
    }
}

// =========================================================
// 健康检查
// =========================================================

pub struct HealthCheck;

impl Endpoint for HealthCheck {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/health".to_string()
    }

    fn decode(_: Value) -> ApiResult<()> {
        Ok(())
    }
}

// =========================================================
// 设备
// =========================================================

/// `GET /devices → {devices: Device[]}`
pub struct ListDevices;

impl Endpoint for ListDevices {
    type Response = Vec<Device>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/devices".to_string()
    }

    fn decode(body: Value) -> ApiResult<Vec<Device>> {
        match lenient::array_at(&body, "devices") {
            Some(items) => Ok(lenient::collect(items, "device")),
            None => {
                log::warn!("device list response has no `devices` array, using empty list");
                Ok(Vec::new())
            }
        }
    }
}

/// `POST /devices {name,room,type} → Device`（也接受 `{device: Device}`）
///
/// 返回体里没有可用的设备（例如缺少 `_id`）时为 `None`，由调用方重新拉取列表。
pub struct CreateDevice(pub DeviceDraft);

impl Endpoint for CreateDevice {
    type Response = Option<Device>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/devices".to_string()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(&self.0).ok()
    }

    fn decode(body: Value) -> ApiResult<Option<Device>> {
        let candidate = match body.get("device") {
            Some(inner) if inner.is_object() => inner.clone(),
            _ => body,
        };
        match serde_json::from_value::<Device>(candidate) {
            Ok(device) if !device.id.is_empty() => Ok(Some(device)),
            Ok(_) => {
                log::warn!("created device has an empty id");
                Ok(None)
            }
            Err(e) => {
                log::warn!("create response carries no usable device: {}", e);
                Ok(None)
            }
        }
    }
}

/// `PATCH /devices/{id}/toggle → {device: Device}`
///
/// 只关心返回的 `status`；结构不符时为 `None`，由调用方本地翻转。
pub struct ToggleDevice {
    pub id: String,
}

impl Endpoint for ToggleDevice {
    type Response = Option<DeviceStatus>;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/devices/{}/toggle", self.id)
    }

    fn decode(body: Value) -> ApiResult<Option<DeviceStatus>> {
        let status = body
            .get("device")
            .and_then(|device| device.get("status"))
            .and_then(|status| serde_json::from_value(status.clone()).ok());
        if status.is_none() {
            log::warn!("toggle response carries no device status");
        }
        Ok(status)
    }
}

/// `PATCH /devices/{id}/ac-settings {acSettings:{temperature,mode}}`
pub struct UpdateAcSettings {
    pub id: String,
    pub settings: AcSettings,
}

impl Endpoint for UpdateAcSettings {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/devices/{}/ac-settings", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "acSettings": self.settings }))
    }

    fn decode(_: Value) -> ApiResult<()> {
        Ok(())
    }
}

/// `DELETE /devices/{id}`
pub struct DeleteDevice {
    pub id: String,
}

impl Endpoint for DeleteDevice {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/devices/{}", self.id)
    }

    fn decode(_: Value) -> ApiResult<()> {
        Ok(())
    }
}

// =========================================================
// 日志
// =========================================================

/// `GET /logs` 或 `GET /logs/{deviceId}`
///
/// 响应可能是裸数组，也可能是 `{logs: [...]}`。
pub struct ListLogs {
    pub device_id: Option<String>,
}

impl Endpoint for ListLogs {
    type Response = Vec<LogEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match &self.device_id {
            Some(id) => format!("/logs/{}", id),
            None => "/logs".to_string(),
        }
    }

    fn decode(body: Value) -> ApiResult<Vec<LogEntry>> {
        let items = match &body {
            Value::Array(items) => Some(items.as_slice()),
            other => lenient::array_at(other, "logs"),
        };
        match items {
            Some(items) => Ok(lenient::collect(items, "log")),
            None => {
                log::warn!("log response is neither an array nor `{{logs: [...]}}`");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{AcMode, DeviceType};

    #[test]
    fn device_list_defaults_to_empty() {
        assert!(ListDevices::decode(json!({})).unwrap().is_empty());
        assert!(ListDevices::decode(json!({ "devices": "nope" })).unwrap().is_empty());
        assert!(ListDevices::decode(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn device_list_skips_malformed_entries() {
        let body = json!({ "devices": [
            { "_id": "1", "name": "Lamp", "type": "light", "status": "off", "room": "Hall" },
            "garbage",
            { "_id": "2", "name": "Fan", "type": "fan", "status": "on", "room": "Bed" }
        ]});
        let devices = ListDevices::decode(body).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1].kind, DeviceType::Fan);
    }

    #[test]
    fn create_accepts_bare_and_wrapped_device() {
        let bare = json!({ "_id": "9", "name": "TV", "room": "Den", "type": "tv", "status": "off" });
        assert_eq!(CreateDevice::decode(bare.clone()).unwrap().unwrap().id, "9");
        assert_eq!(CreateDevice::decode(json!({ "device": bare })).unwrap().unwrap().id, "9");
    }

    #[test]
    fn create_without_id_is_not_an_error() {
        assert_eq!(CreateDevice::decode(json!({ "ok": true })).unwrap(), None);
        let no_id = json!({ "device": { "name": "TV", "room": "Den", "type": "tv", "status": "off" } });
        assert_eq!(CreateDevice::decode(no_id).unwrap(), None);
        let empty_id = json!({ "_id": "", "name": "TV", "room": "Den", "type": "tv", "status": "off" });
        assert_eq!(CreateDevice::decode(empty_id).unwrap(), None);
    }

    #[test]
    fn toggle_reads_nested_status() {
        let status = ToggleDevice::decode(json!({ "device": { "_id": "1", "status": "on" } })).unwrap();
        assert_eq!(status, Some(DeviceStatus::On));
        assert_eq!(ToggleDevice::decode(json!({ "ok": true })).unwrap(), None);
    }

    #[test]
    fn ac_settings_body_is_wrapped() {
        let req = UpdateAcSettings {
            id: "ac1".into(),
            settings: AcSettings {
                temperature: 22,
                mode: AcMode::Dry,
            },
        };
        assert_eq!(req.path(), "/devices/ac1/ac-settings");
        assert_eq!(
            req.body(),
            Some(json!({ "acSettings": { "temperature": 22, "mode": "dry" } }))
        );
    }

    #[test]
    fn logs_accept_both_shapes() {
        let entry = json!({ "_id": "l1", "action": "turned on", "timestamp": "2025-01-05T10:00:00Z" });
        assert_eq!(ListLogs::decode(json!([entry.clone()])).unwrap().len(), 1);
        assert_eq!(ListLogs::decode(json!({ "logs": [entry] })).unwrap().len(), 1);
        assert!(ListLogs::decode(json!({ "message": "x" })).unwrap().is_empty());
    }

    #[test]
    fn log_path_is_scoped_by_device() {
        assert_eq!(ListLogs { device_id: None }.path(), "/logs");
        assert_eq!(
            ListLogs {
                device_id: Some("d7".into())
            }
            .path(),
            "/logs/d7"
        );
    }

    #[test]
    fn auth_response_tolerates_missing_token() {
        let resp = RegisterRequest::decode(json!({ "message": "created" })).unwrap();
        assert_eq!(resp.token, None);
        assert_eq!(resp.message.as_deref(), Some("created"));
    }
}

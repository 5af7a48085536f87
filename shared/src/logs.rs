//! 设备活动日志
//!
//! 日志只读。设备名和时间都按固定的回退顺序解析，任何一条日志都不会
//! 因为字段缺失而渲染失败。

use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::client::{ApiClient, Navigator};
use crate::date::{format_instant, parse_instant};
use crate::devices::Device;
use crate::error::ApiResult;
use crate::lenient;
use crate::protocol::ListLogs;
use crate::request::HttpClient;
use crate::session::KeyValueStore;

/// 时间字段的查找顺序
pub const TIMESTAMP_FIELDS: [&str; 4] = ["timestamp", "createdAt", "updatedAt", "time"];

pub const UNKNOWN_DEVICE: &str = "Unknown Device";
pub const UNKNOWN_TIME: &str = "Unknown Time";
pub const INVALID_DATE: &str = "Invalid Date";

// =========================================================
// 日志条目
// =========================================================

/// 日志中的设备引用：可能只是 id，也可能是内嵌的设备对象
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeviceRef {
    Id(String),
    Embedded {
        #[serde(rename = "_id", alias = "id", default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl DeviceRef {
    fn id(&self) -> Option<&str> {
        match self {
            DeviceRef::Id(id) => Some(id),
            DeviceRef::Embedded { id, .. } => id.as_deref(),
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            DeviceRef::Id(_) => None,
            DeviceRef::Embedded { name, .. } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::option")]
    pub device_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub device: Option<DeviceRef>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub details: Option<Value>,
    /// 其余字段，时间字段从这里按 `TIMESTAMP_FIELDS` 查找
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogEntry {
    /// 设备名：`deviceName` → 内嵌 `device.name` → 按 id 查设备集合 → 占位符
    ///
    /// 日志自带的名字永远优先，查表只用于补缺。
    pub fn device_label(&self, names: &DeviceNames) -> String {
        non_blank(self.device_name.as_deref())
            .or_else(|| non_blank(self.device.as_ref().and_then(DeviceRef::name)))
            .or_else(|| {
                self.device
                    .as_ref()
                    .and_then(DeviceRef::id)
                    .or(self.device_id.as_deref())
                    .and_then(|id| names.get(id))
            })
            .unwrap_or(UNKNOWN_DEVICE)
            .to_string()
    }

    /// 第一个能解析的时间字段
    pub fn occurred_at(&self) -> LogTime {
        let mut candidates = TIMESTAMP_FIELDS
            .iter()
            .filter_map(|field| self.extra.get(*field))
            .filter(|value| !value.is_null())
            .peekable();

        if candidates.peek().is_none() {
            return LogTime::Missing;
        }
        candidates
            .find_map(parse_instant)
            .map_or(LogTime::Invalid, LogTime::At)
    }

    pub fn tone(&self) -> ActionTone {
        ActionTone::classify(&self.action)
    }

    /// 没有详情时为 `-`；字符串原样显示，其它结构格式化为 JSON
    pub fn details_text(&self) -> String {
        format_details(self.details.as_ref())
    }

    pub fn has_details(&self) -> bool {
        self.details.as_ref().is_some_and(is_truthy)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// =========================================================
// 设备名查找表
// =========================================================

/// id → 设备名
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceNames(HashMap<String, String>);

impl DeviceNames {
    pub fn from_devices(devices: &[Device]) -> Self {
        Self(
            devices
                .iter()
                .map(|d| (d.id.clone(), d.name.clone()))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        non_blank(self.0.get(id).map(String::as_str))
    }
}

// =========================================================
// 时间
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTime {
    /// 没有任何时间字段
    Missing,
    /// 有时间字段但都无法解析
    Invalid,
    At(DateTime<Utc>),
}

impl LogTime {
    pub fn render<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            LogTime::Missing => UNKNOWN_TIME.to_string(),
            LogTime::Invalid => INVALID_DATE.to_string(),
            LogTime::At(at) => format_instant(at, tz),
        }
    }
}

// =========================================================
// 展示辅助
// =========================================================

/// 动作标签的配色分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTone {
    Positive,
    Negative,
    Accent,
    Muted,
}

impl ActionTone {
    /// 不区分大小写的关键字匹配，按顺序检查
    pub fn classify(action: &str) -> Self {
        let action = action.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| action.contains(w));

        if has_any(&["on", "add", "create"]) {
            ActionTone::Positive
        } else if has_any(&["off", "delete", "remove"]) {
            ActionTone::Negative
        } else if has_any(&["update", "change", "setting"]) {
            ActionTone::Accent
        } else {
            ActionTone::Muted
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ActionTone::Positive => "badge badge-positive",
            ActionTone::Negative => "badge badge-negative",
            ActionTone::Accent => "badge badge-accent",
            ActionTone::Muted => "badge badge-muted",
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn format_details(details: Option<&Value>) -> String {
    match details {
        Some(value) if is_truthy(value) => match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        },
        _ => "-".to_string(),
    }
}

/// `Showing 1 log entry` / `Showing 3 log entries`
pub fn entry_count_label(count: usize) -> String {
    if count == 1 {
        "Showing 1 log entry".to_string()
    } else {
        format!("Showing {} log entries", count)
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
    /// 指定设备时只取该设备的日志
    pub async fn fetch_logs(&self, device_id: Option<&str>) -> ApiResult<Vec<LogEntry>> {
        self.call(&ListLogs {
            device_id: device_id.map(str::to_string),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use crate::devices::{DeviceStatus, DeviceType};
    use crate::request::HttpMethod;
    use crate::session::MemoryStore;
    use serde_json::json;

    fn entry(value: Value) -> LogEntry {
        serde_json::from_value(value).unwrap()
    }

    fn names() -> DeviceNames {
        DeviceNames::from_devices(&[Device {
            id: "d1".into(),
            name: "Desk Lamp".into(),
            room: "Office".into(),
            kind: DeviceType::Light,
            status: DeviceStatus::Off,
            ac_settings: None,
        }])
    }

    #[test]
    fn carried_name_wins_over_lookup() {
        let log = entry(json!({ "deviceName": "Porch", "device": "d1", "action": "on" }));
        assert_eq!(log.device_label(&names()), "Porch");

        let log = entry(json!({ "device": { "_id": "d1", "name": "Renamed" }, "action": "on" }));
        assert_eq!(log.device_label(&names()), "Renamed");
    }

    #[test]
    fn lookup_fills_missing_names() {
        let by_ref = entry(json!({ "device": "d1", "action": "on" }));
        let by_embedded_id = entry(json!({ "device": { "_id": "d1" }, "action": "on" }));
        let by_device_id = entry(json!({ "deviceId": "d1", "action": "on" }));
        for log in [by_ref, by_embedded_id, by_device_id] {
            assert_eq!(log.device_label(&names()), "Desk Lamp");
        }

        let orphan = entry(json!({ "deviceId": "gone", "action": "on" }));
        assert_eq!(orphan.device_label(&names()), UNKNOWN_DEVICE);
        assert_eq!(orphan.device_label(&DeviceNames::default()), UNKNOWN_DEVICE);
    }

    #[test]
    fn timestamp_falls_back_through_fields() {
        let log = entry(json!({ "action": "x", "createdAt": "2025-01-05T15:04:05Z" }));
        assert_eq!(log.occurred_at().render(&Utc), "Jan 5, 2025, 03:04:05 PM");

        let log = entry(json!({ "timestamp": "nope", "time": 1736089445000i64 }));
        assert_eq!(log.occurred_at().render(&Utc), "Jan 5, 2025, 03:04:05 PM");

        let log = entry(json!({ "timestamp": "2025-01-05T15:04:05Z", "createdAt": "2020-01-01T00:00:00Z" }));
        assert!(log.occurred_at().render(&Utc).starts_with("Jan 5, 2025"));
    }

    #[test]
    fn timestamp_placeholders() {
        assert_eq!(entry(json!({})).occurred_at().render(&Utc), UNKNOWN_TIME);
        assert_eq!(
            entry(json!({ "timestamp": null })).occurred_at(),
            LogTime::Missing
        );
        assert_eq!(
            entry(json!({ "updatedAt": "soon" })).occurred_at().render(&Utc),
            INVALID_DATE
        );
    }

    #[test]
    fn action_tone_checks_keywords_in_order() {
        assert_eq!(ActionTone::classify("Turned ON"), ActionTone::Positive);
        assert_eq!(ActionTone::classify("device_added"), ActionTone::Positive);
        assert_eq!(ActionTone::classify("Deleted"), ActionTone::Negative);
        assert_eq!(ActionTone::classify("turned off"), ActionTone::Negative);
        assert_eq!(ActionTone::classify("AC settings updated"), ActionTone::Accent);
        assert_eq!(ActionTone::classify("ping"), ActionTone::Muted);
    }

    #[test]
    fn details_formatting() {
        assert_eq!(format_details(None), "-");
        assert_eq!(format_details(Some(&json!(""))), "-");
        assert_eq!(format_details(Some(&json!("manual"))), "manual");
        assert_eq!(
            format_details(Some(&json!({ "temperature": 22 }))),
            "{\n  \"temperature\": 22\n}"
        );
    }

    #[test]
    fn entry_counter_pluralises() {
        assert_eq!(entry_count_label(1), "Showing 1 log entry");
        assert_eq!(entry_count_label(0), "Showing 0 log entries");
        assert_eq!(entry_count_label(5), "Showing 5 log entries");
    }

    #[tokio::test]
    async fn bare_array_with_created_at_renders_valid_times() {
        let client = test_client(MemoryStore::default());
        client.http().mock_response(
            HttpMethod::Get,
            "http://hub.test/api/logs",
            200,
            json!([
                { "_id": "a", "deviceName": "Lamp", "action": "turned on", "createdAt": "2025-03-01T08:00:00Z" },
                { "_id": "b", "deviceName": "Fan", "action": "turned off", "createdAt": "2025-03-01T09:30:00.000Z" }
            ]),
        );

        let logs = client.fetch_logs(None).await.unwrap();

        assert_eq!(logs.len(), 2);
        let rendered: Vec<String> = logs.iter().map(|l| l.occurred_at().render(&Utc)).collect();
        assert_eq!(
            rendered,
            vec!["Mar 1, 2025, 08:00:00 AM", "Mar 1, 2025, 09:30:00 AM"]
        );
    }

    #[tokio::test]
    async fn scoped_fetch_hits_device_path() {
        let client = test_client(MemoryStore::default());
        client.http().mock_response(
            HttpMethod::Get,
            "http://hub.test/api/logs/d1",
            200,
            json!({ "logs": [{ "_id": "a", "device": "d1", "action": "turned on" }] }),
        );

        let logs = client.fetch_logs(Some("d1")).await.unwrap();

        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].device_label(&names()), "Desk Lamp");
    }
}

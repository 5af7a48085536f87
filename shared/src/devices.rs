//! 设备模型、本地集合操作与设备相关的 API 动作
//!
//! 本地集合只是服务端状态的缓存：变更动作成功后按响应就地修补，
//! 失败时保持原样。

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{ApiClient, Navigator};
use crate::error::{ApiResult, ValidationError};
use crate::lenient;
use crate::protocol::{CreateDevice, DeleteDevice, ListDevices, ToggleDevice, UpdateAcSettings};
use crate::request::HttpClient;
use crate::session::KeyValueStore;


// =========================================================
// 设备类型
// =========================================================

/// 设备类型；无法识别的值原样保留
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceType {
    #[default]
    Light,
    Fan,
    Ac,
    Tv,
    Sensor,
    Door,
    Other(String),
}

impl DeviceType {
    /// 新增设备表单可选的类型
    pub const SELECTABLE: [DeviceType; 6] = [
        DeviceType::Light,
        DeviceType::Fan,
        DeviceType::Ac,
        DeviceType::Tv,
        DeviceType::Sensor,
        DeviceType::Door,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DeviceType::Light => "light",
            DeviceType::Fan => "fan",
            DeviceType::Ac => "ac",
            DeviceType::Tv => "tv",
            DeviceType::Sensor => "sensor",
            DeviceType::Door => "door",
            DeviceType::Other(raw) => raw,
        }
    }

    /// 界面显示名
    pub fn label(&self) -> &str {
        match self {
            DeviceType::Light => "Light",
            DeviceType::Fan => "Fan",
            DeviceType::Ac => "AC",
            DeviceType::Tv => "TV",
            DeviceType::Sensor => "Sensor",
            DeviceType::Door => "Door",
            DeviceType::Other(raw) => raw,
        }
    }

    pub fn is_ac(&self) -> bool {
        matches!(self, DeviceType::Ac)
    }
}

impl From<String> for DeviceType {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "light" => DeviceType::Light,
            "fan" => DeviceType::Fan,
            "ac" => DeviceType::Ac,
            "tv" => DeviceType::Tv,
            "sensor" => DeviceType::Sensor,
            "door" => DeviceType::Door,
            _ => DeviceType::Other(raw),
        }
    }
}

impl From<DeviceType> for String {
    fn from(kind: DeviceType) -> Self {
        match kind {
            DeviceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// =========================================================
// 设备状态
// =========================================================

/// `on` / `off` 之外的值保留在 `Other` 中，统计时算作离线
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum DeviceStatus {
    On,
    #[default]
    Off,
    Other(String),
}

impl DeviceStatus {
    pub fn is_on(&self) -> bool {
        matches!(self, DeviceStatus::On)
    }

    /// 本地翻转：`on → off`，其余一律 `on`
    pub fn flipped(&self) -> Self {
        match self {
            DeviceStatus::On => DeviceStatus::Off,
            _ => DeviceStatus::On,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DeviceStatus::On => "on",
            DeviceStatus::Off => "off",
            DeviceStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "on" => DeviceStatus::On,
            "off" => DeviceStatus::Off,
            _ => DeviceStatus::Other(raw),
        }
    }
}

impl From<DeviceStatus> for String {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // 部分后端版本用布尔值表示开关
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawStatus {
            Text(String),
            Flag(bool),
        }

        Ok(match RawStatus::deserialize(deserializer)? {
            RawStatus::Text(raw) => DeviceStatus::from(raw),
            RawStatus::Flag(true) => DeviceStatus::On,
            RawStatus::Flag(false) => DeviceStatus::Off,
        })
    }
}

// =========================================================
// 空调设置
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcMode {
    #[default]
    Cool,
    Auto,
    Fan,
    Dry,
}

impl AcMode {
    pub const ALL: [AcMode; 4] = [AcMode::Cool, AcMode::Auto, AcMode::Fan, AcMode::Dry];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcMode::Cool => "cool",
            AcMode::Auto => "auto",
            AcMode::Fan => "fan",
            AcMode::Dry => "dry",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AcMode::Cool => "Cool",
            AcMode::Auto => "Auto",
            AcMode::Fan => "Fan",
            AcMode::Dry => "Dry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AcSettings {
    pub temperature: i32,
    pub mode: AcMode,
}

impl AcSettings {
    pub const TEMP_MIN: i32 = 16;
    pub const TEMP_MAX: i32 = 30;
    pub const DEFAULT_TEMPERATURE: i32 = 24;

    pub fn clamp_temperature(t: i32) -> i32 {
        t.clamp(Self::TEMP_MIN, Self::TEMP_MAX)
    }

    /// 温度已钳制到合法区间的副本
    pub fn clamped(self) -> Self {
        Self {
            temperature: Self::clamp_temperature(self.temperature),
            ..self
        }
    }
}

impl Default for AcSettings {
    fn default() -> Self {
        Self {
            temperature: Self::DEFAULT_TEMPERATURE,
            mode: AcMode::default(),
        }
    }
}

// =========================================================
// 设备
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room: String,
    #[serde(rename = "type", default)]
    pub kind: DeviceType,
    #[serde(default)]
    pub status: DeviceStatus,
    /// 仅对空调有意义；结构不对时丢弃
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ac_settings: Option<AcSettings>,
}

impl Device {
    /// 编辑器的初始值：已有设置或固定默认值
    pub fn ac_settings_or_default(&self) -> AcSettings {
        self.ac_settings.unwrap_or_default()
    }
}

/// 新增设备表单提交的内容
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceDraft {
    pub name: String,
    pub room: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
}

impl DeviceDraft {
    /// 去除首尾空白并检查必填项
    pub fn validate(&self) -> Result<DeviceDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::DeviceNameRequired);
        }
        let room = self.room.trim();
        if room.is_empty() {
            return Err(ValidationError::RoomRequired);
        }
        Ok(DeviceDraft {
            name: name.to_string(),
            room: room.to_string(),
            kind: self.kind.clone(),
        })
    }
}

// =========================================================
// 本地集合操作
// =========================================================

/// 只修补匹配设备的 `status`；响应里没有状态时本地翻转
///
/// 返回是否找到该设备。
pub fn apply_toggle(devices: &mut [Device], id: &str, confirmed: Option<DeviceStatus>) -> bool {
    match devices.iter_mut().find(|d| d.id == id) {
        Some(device) => {
            device.status = confirmed.unwrap_or_else(|| device.status.flipped());
            true
        }
        None => false,
    }
}

pub fn apply_ac_settings(devices: &mut [Device], id: &str, settings: AcSettings) -> bool {
    match devices.iter_mut().find(|d| d.id == id) {
        Some(device) => {
            device.ac_settings = Some(settings);
            true
        }
        None => false,
    }
}

pub fn remove_device(devices: &mut Vec<Device>, id: &str) -> bool {
    let before = devices.len();
    devices.retain(|d| d.id != id);
    devices.len() != before
}

/// 仪表盘统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCounts {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
}

impl DeviceCounts {
    /// `offline` 由总数减去 `online` 得到，未知状态都归入离线
    pub fn of(devices: &[Device]) -> Self {
        let total = devices.len();
        let online = devices.iter().filter(|d| d.status.is_on()).count();
        Self {
            total,
            online,
            offline: total - online,
        }
    }
}

// =========================================================
// API 动作
// =========================================================

pub const DELETE_CONFIRMATION: &str =
    "Are you sure you want to delete this device? This action cannot be undone.";

/// 删除动作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// 用户取消，未发出请求
    Cancelled,
    Removed,
}

impl<C, S, N> ApiClient<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub async fn fetch_devices(&self) -> ApiResult<Vec<Device>> {
        self.call(&ListDevices).await
    }

    /// 返回服务端确认的新状态（响应结构不符时为 `None`）
    pub async fn toggle_device(&self, id: &str) -> ApiResult<Option<DeviceStatus>> {
        self.call(&ToggleDevice { id: id.to_string() }).await
    }

    /// 发送前钳制温度，成功时返回实际发送的设置
    pub async fn save_ac_settings(&self, id: &str, settings: AcSettings) -> ApiResult<AcSettings> {
        let settings = settings.clamped();
        self.call(&UpdateAcSettings {
            id: id.to_string(),
            settings,
        })
        .await?;
        Ok(settings)
    }

    /// 校验失败时直接返回 `ApiError::Validation`，不发请求
    ///
    /// 服务端没有回传可用设备时为 `Ok(None)`
    pub async fn add_device(&self, draft: &DeviceDraft) -> ApiResult<Option<Device>> {
        let draft = draft.validate()?;
        self.call(&CreateDevice(draft)).await
    }

    /// `confirm` 返回 false 时不发请求
    pub async fn remove_device<F>(&self, id: &str, confirm: F) -> ApiResult<Removal>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_CONFIRMATION) {
            log::debug!("delete of device {} cancelled", id);
            return Ok(Removal::Cancelled);
        }
        self.call(&DeleteDevice { id: id.to_string() }).await?;
        Ok(Removal::Removed)
    }
}

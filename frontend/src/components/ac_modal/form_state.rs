//! 空调设置表单状态
//!
//! 温度在写入状态前就钳制到合法区间，表单里永远不会出现越界值。

use leptos::prelude::*;
use smarthome_shared::{AcMode, AcSettings, Device};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct AcFormState {
    pub temperature: RwSignal<i32>,
    pub mode: RwSignal<AcMode>,
    /// 提交进行中，提交按钮禁用
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl AcFormState {
    pub fn new() -> Self {
        let defaults = AcSettings::default();
        Self {
            temperature: RwSignal::new(defaults.temperature),
            mode: RwSignal::new(defaults.mode),
            submitting: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// 按目标设备的当前设置（或默认值）重新初始化
    pub fn reset_from(&self, device: Option<&Device>) {
        let settings = device.map(Device::ac_settings_or_default).unwrap_or_default();
        self.temperature.set(AcSettings::clamp_temperature(settings.temperature));
        self.mode.set(settings.mode);
        self.submitting.set(false);
        self.error.set(None);
    }

    pub fn set_temperature(&self, t: i32) {
        self.temperature.set(AcSettings::clamp_temperature(t));
    }

    /// 步进按钮
    pub fn step(&self, delta: i32) {
        self.set_temperature(self.temperature.get_untracked().saturating_add(delta));
    }

    /// 数字输入框；无法解析时回到默认温度
    pub fn set_temperature_input(&self, raw: &str) {
        let t = raw
            .trim()
            .parse::<i32>()
            .unwrap_or(AcSettings::DEFAULT_TEMPERATURE);
        self.set_temperature(t);
    }

    pub fn to_settings(&self) -> AcSettings {
        AcSettings {
            temperature: self.temperature.get_untracked(),
            mode: self.mode.get_untracked(),
        }
    }
}

impl Default for AcFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_shared::{DeviceStatus, DeviceType};

    fn bedroom_ac(settings: Option<AcSettings>) -> Device {
        Device {
            id: "ac1".into(),
            name: "Bedroom AC".into(),
            room: "Bedroom".into(),
            kind: DeviceType::Ac,
            status: DeviceStatus::On,
            ac_settings: settings,
        }
    }

    #[test]
    fn stepper_stops_at_both_ends() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AcFormState::new();
            state.set_temperature(29);
            state.step(1);
            state.step(1);
            assert_eq!(state.temperature.get_untracked(), 30);

            state.set_temperature(17);
            state.step(-1);
            state.step(-1);
            assert_eq!(state.temperature.get_untracked(), 16);
        });
    }

    #[test]
    fn typed_temperature_is_clamped_or_defaulted() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AcFormState::new();
            state.set_temperature_input("45");
            assert_eq!(state.temperature.get_untracked(), 30);
            state.set_temperature_input("-3");
            assert_eq!(state.temperature.get_untracked(), 16);
            state.set_temperature_input(" 18 ");
            assert_eq!(state.temperature.get_untracked(), 18);
            state.set_temperature_input("warm");
            assert_eq!(state.temperature.get_untracked(), AcSettings::DEFAULT_TEMPERATURE);
        });
    }

    #[test]
    fn reset_follows_target_device() {
        let owner = Owner::new();
        owner.with(|| {
            let state = AcFormState::new();
            state.submitting.set(true);
            state.error.set(Some("Failed to update AC settings".into()));

            let device = bedroom_ac(Some(AcSettings {
                temperature: 40,
                mode: AcMode::Dry,
            }));
            state.reset_from(Some(&device));
            assert_eq!(state.temperature.get_untracked(), 30);
            assert_eq!(state.mode.get_untracked(), AcMode::Dry);
            assert!(!state.submitting.get_untracked());
            assert_eq!(state.error.get_untracked(), None);

            state.reset_from(Some(&bedroom_ac(None)));
            assert_eq!(state.to_settings(), AcSettings::default());
        });
    }
}

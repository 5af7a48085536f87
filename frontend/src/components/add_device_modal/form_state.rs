//! 新增设备表单状态
//!
//! 将零散的 signal 整合为 `DeviceFormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换（含校验）

use leptos::prelude::*;
use smarthome_shared::{DeviceDraft, DeviceType, ValidationError};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct DeviceFormState {
    pub name: RwSignal<String>,
    pub room: RwSignal<String>,
    pub kind: RwSignal<DeviceType>,
    /// 提交进行中，提交按钮禁用
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl DeviceFormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            room: RwSignal::new(String::new()),
            kind: RwSignal::new(DeviceType::default()),
            submitting: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.room.set(String::new());
        self.kind.set(DeviceType::default());
        self.error.set(None);
    }

    /// 校验并转换为请求对象（名称和房间已去除首尾空白）
    pub fn to_draft(&self) -> Result<DeviceDraft, ValidationError> {
        DeviceDraft {
            name: self.name.get_untracked(),
            room: self.room.get_untracked(),
            kind: self.kind.get_untracked(),
        }
        .validate()
    }
}

impl Default for DeviceFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_fail_validation() {
        let owner = Owner::new();
        owner.with(|| {
            let state = DeviceFormState::new();
            state.room.set("Hall".into());
            assert_eq!(state.to_draft(), Err(ValidationError::DeviceNameRequired));

            state.name.set("Lamp".into());
            state.room.set("   ".into());
            assert_eq!(state.to_draft(), Err(ValidationError::RoomRequired));
        });
    }

    #[test]
    fn draft_is_trimmed_then_reset_clears_everything() {
        let owner = Owner::new();
        owner.with(|| {
            let state = DeviceFormState::new();
            state.name.set("  Lamp ".into());
            state.room.set(" Hall".into());
            state.kind.set(DeviceType::Fan);

            let draft = state.to_draft().unwrap();
            assert_eq!(draft.name, "Lamp");
            assert_eq!(draft.room, "Hall");
            assert_eq!(draft.kind, DeviceType::Fan);

            state.error.set(Some("Failed to add device. Please try again.".into()));
            state.reset();
            assert_eq!(state.name.get_untracked(), "");
            assert_eq!(state.room.get_untracked(), "");
            assert_eq!(state.kind.get_untracked(), DeviceType::Light);
            assert_eq!(state.error.get_untracked(), None);
        });
    }
}

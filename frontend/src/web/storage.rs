//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现共享层的 `KeyValueStore`。
//! 浏览器 API 出错时退化为 `None` / `false`，不向上抛出。

use smarthome_shared::KeyValueStore;

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let ok = Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some();
        if !ok {
            log::warn!("localStorage write failed for key `{}`", key);
        }
        ok
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

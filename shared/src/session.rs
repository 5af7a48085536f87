//! 会话状态与持久化约定
//!
//! 凭据和用户标签总是成对写入、成对清除。客户端不校验凭据结构或过期时间，
//! 后端是唯一的判定者。

use crate::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};

/// 持久化键值存储（浏览器中即 LocalStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 认证状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// 后端签发的不透明凭据
    pub credential: Option<String>,
    /// 用户标签（登录时的邮箱），仅在凭据存在时有意义
    pub label: Option<String>,
}

impl Session {
    /// 从持久化存储恢复；只有一个字段存在时照样采用
    pub fn restore<S: KeyValueStore>(store: &S) -> Self {
        Self {
            credential: store.get(STORAGE_TOKEN_KEY),
            label: store.get(STORAGE_USER_KEY),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// 无条件覆盖当前会话并立即持久化
    pub fn login<S: KeyValueStore>(&mut self, store: &S, credential: String, label: String) {
        store.set(STORAGE_TOKEN_KEY, &credential);
        store.set(STORAGE_USER_KEY, &label);
        self.credential = Some(credential);
        self.label = Some(label);
    }

    pub fn logout<S: KeyValueStore>(&mut self, store: &S) {
        Self::clear_persisted(store);
        self.credential = None;
        self.label = None;
    }

    /// 只清除持久化部分；401 拦截在整页跳转前调用
    pub fn clear_persisted<S: KeyValueStore>(store: &S) {
        store.delete(STORAGE_TOKEN_KEY);
        store.delete(STORAGE_USER_KEY);
    }
}

/// 请求发出时读取的最新凭据（不缓存）
pub fn stored_credential<S: KeyValueStore>(store: &S) -> Option<String> {
    store.get(STORAGE_TOKEN_KEY).filter(|c| !c.is_empty())
}

// =========================================================
// 测试工具: MemoryStore
// =========================================================

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (k, v) in entries {
            store.set(k, v);
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_persists_both_fields() {
        let store = MemoryStore::default();
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.login(&store, "tok-1".into(), "a@b.io".into());

        assert!(session.is_authenticated());
        assert_eq!(store.get(STORAGE_TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(store.get(STORAGE_USER_KEY).as_deref(), Some("a@b.io"));
        assert_eq!(Session::restore(&store), session);
    }

    #[test]
    fn login_overwrites_previous_session() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "old"), (STORAGE_USER_KEY, "old@x.io")]);
        let mut session = Session::restore(&store);

        session.login(&store, "new".into(), "new@x.io".into());

        assert_eq!(session.credential.as_deref(), Some("new"));
        assert_eq!(store.get(STORAGE_USER_KEY).as_deref(), Some("new@x.io"));
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let store = MemoryStore::default();
        let mut session = Session::default();
        session.login(&store, "tok".into(), "me@x.io".into());

        session.logout(&store);

        assert_eq!(session, Session::default());
        assert!(store.is_empty());
    }

    #[test]
    fn partial_state_is_adopted_on_restore() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "only-token")]);
        let session = Session::restore(&store);
        assert!(session.is_authenticated());
        assert_eq!(session.label, None);

        let store = MemoryStore::with(&[(STORAGE_USER_KEY, "only-label")]);
        let session = Session::restore(&store);
        assert!(!session.is_authenticated());
        assert_eq!(session.label.as_deref(), Some("only-label"));
    }

    #[test]
    fn empty_credential_is_not_sent() {
        let store = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "")]);
        assert_eq!(stored_credential(&store), None);
        assert!(!Session::restore(&store).is_authenticated());
    }
}

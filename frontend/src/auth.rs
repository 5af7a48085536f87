//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::web::LocalStorage;
use leptos::prelude::*;
use smarthome_shared::Session;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。会话的持久化约定
/// （两个字段同写同删）由共享层的 `Session` 保证。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<Session>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<Session>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(Session::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(Session::is_authenticated))
    }

    /// 用户标签（登录邮箱）
    pub fn label_signal(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.label.clone()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 恢复凭据和用户标签；只有一项存在时也照样采用。
pub fn init_auth(ctx: &AuthContext) {
    let session = Session::restore(&LocalStorage);
    log::debug!(
        "session restored (authenticated: {})",
        session.is_authenticated()
    );
    ctx.set_state.set(session);
}

/// 登录：覆盖当前会话并立即持久化
pub fn login(ctx: &AuthContext, credential: String, label: String) {
    ctx.set_state
        .update(|session| session.login(&LocalStorage, credential, label));
    log::info!("signed in");
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.set_state.update(|session| session.logout(&LocalStorage));
    log::info!("signed out");
}

//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程，验证部分由
//! `route::guard` 完成。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, GuardDecision, guard};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// History 状态里携带被守卫拦截的原始路径
fn history_state(from: Option<&str>) -> JsValue {
    from.map(JsValue::from_str).unwrap_or(JsValue::NULL)
}

/// 写入 History（`use_push` 为 false 时替换当前条目）
fn write_history(path: &str, from: Option<&str>, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let state = history_state(from);
    let result = if use_push {
        history.push_state_with_url(&state, "", Some(path))
    } else {
        history.replace_state_with_url(&state, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[Router] history update failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 最近一次被守卫拦截的原始路径
    redirected_from: RwSignal<Option<String>>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样经过守卫：直接打开受保护地址时替换为登录页。
    fn new(is_authenticated: Signal<bool>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let redirected_from = RwSignal::new(None);

        let initial_route = match guard(requested, is_authenticated.get_untracked()) {
            GuardDecision::Allow(route) => route,
            GuardDecision::Redirect { to, from } => {
                log::info!("[Router] initial route guarded, redirecting to {}", to);
                write_history(&to.to_path(), from.as_deref(), false);
                redirected_from.set(from);
                to
            }
        };
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            redirected_from,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 守卫记录的原始路径（登录后不会自动恢复）
    pub fn redirected_from(&self) -> Signal<Option<String>> {
        self.redirected_from.into()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    pub fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        Self::apply(
            guard(target_route, is_auth),
            use_push,
            self.set_route,
            self.redirected_from,
        );
    }

    fn apply(
        decision: GuardDecision,
        use_push: bool,
        set_route: WriteSignal<AppRoute>,
        redirected_from: RwSignal<Option<String>>,
    ) {
        match decision {
            GuardDecision::Allow(route) => {
                write_history(&route.to_path(), None, use_push);
                set_route.set(route);
            }
            GuardDecision::Redirect { to, from } => {
                log::info!(
                    "[Router] access to {} redirected to {}",
                    from.as_deref().unwrap_or("-"),
                    to
                );
                write_history(&to.to_path(), from.as_deref(), use_push);
                redirected_from.set(from);
                set_route.set(to);
            }
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let redirected_from = self.redirected_from;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑
            match guard(target_route, is_authenticated.get_untracked()) {
                // 浏览器已切换了地址，只需更新状态
                GuardDecision::Allow(route) => set_route.set(route),
                decision => Self::apply(decision, false, set_route, redirected_from),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时重新评估当前路由
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let redirected_from = self.redirected_from;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            let decision = guard(route, is_auth);
            if matches!(decision, GuardDecision::Redirect { .. }) {
                log::info!(
                    "[Router] auth state changed (authenticated: {}), re-routing",
                    is_auth
                );
                Self::apply(decision, true, set_route, redirected_from);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 应用内链接：拦截点击，经路由服务导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(into, optional)] class: MaybeProp<String>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}

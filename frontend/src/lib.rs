//! SmartHome Hub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 共享层 `ApiClient` 的浏览器实例
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod ac_modal;
    pub mod add_device_modal;
    pub mod dashboard;
    pub mod device_card;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod logs;
    pub mod navbar;
    pub mod register;
    pub mod server_status;
    pub mod toast;
}

use crate::api::provide_api;
use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::logs::LogsPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;
use crate::components::server_status::ServerStatus;

use leptos::prelude::*;

// 浏览器 API 封装模块
// 共享层只定义接缝（HttpClient / KeyValueStore / Navigator），
// 这里提供它们在浏览器中的实现。
pub(crate) mod web {
    mod http;
    mod navigator;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchClient;
    pub use navigator::{BrowserNavigator, confirm};
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Logs { device_id } => view! { <LogsPage device_id=device_id /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh]">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link to="/" class="btn btn-primary">"Back to Home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 恢复会话
    init_auth(&auth_ctx);

    // 3. API 客户端（凭据在每次请求时从存储读取）
    provide_api();

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <Navbar />
                <main>
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
            <ServerStatus />
        </Router>
    }
}

use crate::auth::{logout, use_auth};
use crate::components::icons::{Activity, Close, FileText, HomeIcon, LogOut, Menu};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 导航项：当前所在分组高亮
#[component]
fn NavLink(
    to: &'static str,
    /// 对应 `AppRoute::section`
    section: &'static str,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let class = move || {
        if router.current_route().with(AppRoute::section) == section {
            "btn btn-primary btn-sm gap-2"
        } else {
            "btn btn-ghost btn-sm gap-2"
        }
    };
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();
    let (menu_open, set_menu_open) = signal(false);

    let on_logout = move |_: web_sys::MouseEvent| {
        logout(&auth);
        set_menu_open.set(false);
        router.navigate_to_route(AppRoute::Login, true);
    };

    // 桌面端与移动端共用同一组链接
    let links = move || {
        if is_authenticated.get() {
            view! {
                <NavLink to="/dashboard" section="dashboard">
                    <Activity attr:class="h-4 w-4" />
                    "Dashboard"
                </NavLink>
                <NavLink to="/logs" section="logs">
                    <FileText attr:class="h-4 w-4" />
                    "Logs"
                </NavLink>
                <button class="btn btn-ghost btn-sm gap-2 text-error" on:click=on_logout>
                    <LogOut attr:class="h-4 w-4" />
                    "Logout"
                </button>
            }
            .into_any()
        } else {
            view! {
                <Link to="/login" class="btn btn-ghost btn-sm">"Login"</Link>
                <Link to="/register" class="btn btn-primary btn-sm">"Get Started"</Link>
            }
            .into_any()
        }
    };

    view! {
        <nav class="navbar bg-base-100 shadow-sm sticky top-0 z-50 px-4">
            <div class="flex-1">
                <Link to="/" class="btn btn-ghost text-xl gap-2">
                    <span class="p-1 rounded-lg bg-primary text-primary-content">
                        <HomeIcon attr:class="h-5 w-5" />
                    </span>
                    "SmartHome Hub"
                </Link>
            </div>
            <div class="hidden md:flex items-center gap-2">{links}</div>
            <button
                class="btn btn-ghost btn-square md:hidden"
                on:click=move |_| set_menu_open.update(|open| *open = !*open)
            >
                {move || if menu_open.get() {
                    view! { <Close attr:class="h-6 w-6" /> }.into_any()
                } else {
                    view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                }}
            </button>
        </nav>
        <Show when=move || menu_open.get()>
            // 点击任意项后收起菜单
            <div
                class="md:hidden flex flex-col gap-2 p-4 bg-base-100 border-t border-base-200 shadow"
                on:click=move |_| set_menu_open.set(false)
            >
                {links}
            </div>
        </Show>
    }
}

//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的访问要求以及守卫判定。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    /// 设备面板 (需要认证)
    Dashboard,
    /// 活动日志 (需要认证)，可限定到单个设备
    Logs { device_id: Option<String> },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/logs" => Self::Logs { device_id: None },
            _ => match trimmed.strip_prefix("/logs/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Logs {
                    device_id: Some(id.to_string()),
                },
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Logs { device_id: None } => "/logs".to_string(),
            Self::Logs {
                device_id: Some(id),
            } => format!("/logs/{}", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 导航栏高亮用的分组：`/logs` 与 `/logs/{id}` 视为同一项
    pub fn section(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Logs { .. } => "logs",
            Self::NotFound => "not-found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Logs { .. })
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行，渲染目标路由
    Allow(AppRoute),
    /// 重定向；`from` 记录最初请求的路径
    ///
    /// 登录成功后并不会跳回 `from`，这里只负责记录。
    Redirect { to: AppRoute, from: Option<String> },
}

/// 只依赖当前认证状态的纯函数，不缓存、不异步
pub fn guard(target: AppRoute, authenticated: bool) -> GuardDecision {
    if target.requires_auth() && !authenticated {
        return GuardDecision::Redirect {
            from: Some(target.to_path()),
            to: AppRoute::auth_failure_redirect(),
        };
    }
    if target.should_redirect_when_authenticated() && authenticated {
        return GuardDecision::Redirect {
            to: AppRoute::auth_success_redirect(),
            from: None,
        };
    }
    GuardDecision::Allow(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/logs"), AppRoute::Logs { device_id: None });
        assert_eq!(
            AppRoute::from_path("/logs/65f0c2"),
            AppRoute::Logs {
                device_id: Some("65f0c2".into())
            }
        );
        assert_eq!(AppRoute::from_path("/logs/a/b"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Logs { device_id: None },
            AppRoute::Logs {
                device_id: Some("d1".into()),
            },
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn protected_routes_redirect_and_record_origin() {
        let decision = guard(
            AppRoute::Logs {
                device_id: Some("d1".into()),
            },
            false,
        );
        assert_eq!(
            decision,
            GuardDecision::Redirect {
                to: AppRoute::Login,
                from: Some("/logs/d1".into())
            }
        );
        assert_eq!(
            guard(AppRoute::Dashboard, true),
            GuardDecision::Allow(AppRoute::Dashboard)
        );
    }

    #[test]
    fn public_routes_pass_through() {
        for authed in [true, false] {
            assert_eq!(guard(AppRoute::Home, authed), GuardDecision::Allow(AppRoute::Home));
            assert_eq!(
                guard(AppRoute::NotFound, authed),
                GuardDecision::Allow(AppRoute::NotFound)
            );
        }
    }

    #[test]
    fn signed_in_users_skip_auth_pages() {
        assert_eq!(
            guard(AppRoute::Register, true),
            GuardDecision::Redirect {
                to: AppRoute::Dashboard,
                from: None
            }
        );
        assert_eq!(guard(AppRoute::Login, false), GuardDecision::Allow(AppRoute::Login));
    }
}

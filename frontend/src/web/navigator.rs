//! 整页跳转与阻塞式确认框

use smarthome_shared::Navigator;

/// 通过 `location.href` 整页跳转，绕过应用内路由
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn hard_redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(path) {
            log::error!("redirect to {} failed: {:?}", path, e);
        }
    }
}

/// `window.confirm`；无法弹窗时按取消处理
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

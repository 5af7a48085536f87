use leptos::prelude::*;
use smarthome_shared::{ApiClient, ClientConfig};

use crate::web::{BrowserNavigator, FetchClient, LocalStorage};

/// 浏览器环境下的 API 客户端
pub type SmartHomeApi = ApiClient<FetchClient, LocalStorage, BrowserNavigator>;

/// 编译期通过 `SMARTHOME_API_URL` 覆盖后端地址
fn client_config() -> ClientConfig {
    match option_env!("SMARTHOME_API_URL") {
        Some(url) if !url.trim().is_empty() => ClientConfig::new(url),
        _ => ClientConfig::default(),
    }
}

/// 创建客户端并放入 Context
pub fn provide_api() {
    let config = client_config();
    log::info!("API base url: {}", config.api_base_url);
    provide_context(SmartHomeApi::new(
        config,
        FetchClient,
        LocalStorage,
        BrowserNavigator,
    ));
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> SmartHomeApi {
    use_context::<SmartHomeApi>().expect("SmartHomeApi should be provided")
}

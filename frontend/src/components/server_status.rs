use crate::api::use_api;
use crate::web::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::HealthStatus;

/// 右下角的后端存活指示器
///
/// 挂载时探测一次，之后按固定间隔轮询；失败不退避。
#[component]
pub fn ServerStatus() -> impl IntoView {
    let api = use_api();
    let status = RwSignal::new(HealthStatus::Unknown);

    let poll = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                status.set(api.check_health().await);
            });
        }
    };

    poll();

    let millis = u32::try_from(api.config().health_interval.as_millis()).unwrap_or(u32::MAX);
    let timer = StoredValue::new_local(Interval::new(millis, poll));
    on_cleanup(move || timer.update_value(|t| *t = None));

    move || {
        let current = status.get();
        current.is_known().then(|| {
            let online = current == HealthStatus::Online;
            let (badge, dot) = if online {
                ("border-success/20 bg-success/10 text-success", "bg-success")
            } else {
                ("border-error/20 bg-error/10 text-error", "bg-error")
            };
            view! {
                <div class="fixed bottom-4 right-4 z-50">
                    <div class=format!(
                        "flex items-center gap-2 px-3 py-1.5 rounded-full text-xs font-medium shadow-lg border {}",
                        badge,
                    )>
                        <span class="relative flex h-2 w-2">
                            <span class=format!(
                                "animate-ping absolute inline-flex h-full w-full rounded-full opacity-75 {}",
                                dot,
                            )></span>
                            <span class=format!("relative inline-flex rounded-full h-2 w-2 {}", dot)></span>
                        </span>
                        <span>{current.label()}</span>
                    </div>
                </div>
            }
        })
    }
}

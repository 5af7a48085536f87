use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::ac_modal::AcModal;
use crate::components::add_device_modal::AddDeviceModal;
use crate::components::device_card::DeviceCard;
use crate::components::icons::*;
use crate::components::toast::{ToastHost, Toasts};
use crate::web::confirm;
use futures::FutureExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::devices::{self, Removal};
use smarthome_shared::{AcSettings, Device, DeviceCounts, DeviceDraft, ResourceView};

const LOAD_FAILED: &str = "Failed to load devices. Please try again.";

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let label = use_auth().label_signal();
    let toasts = Toasts::new();

    let view_state = RwSignal::new(ResourceView::<Device>::default());
    // 正在编辑空调设置的设备
    let ac_target = RwSignal::new(Option::<Device>::None);
    let add_open = RwSignal::new(false);

    let load_devices = {
        let api = api.clone();
        move || {
            view_state.update(ResourceView::start);
            let api = api.clone();
            spawn_local(async move {
                match api.fetch_devices().await {
                    Ok(items) => view_state.update(|v| v.finish_ok(items)),
                    Err(e) => {
                        log::error!("loading devices failed: {}", e);
                        view_state.update(|v| v.finish_err(LOAD_FAILED));
                    }
                }
            });
        }
    };

    // 初始加载
    load_devices();

    // 不做乐观预翻转：只有服务端确认后才更新
    let on_toggle = Callback::new({
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.toggle_device(&id).await {
                    Ok(confirmed) => {
                        view_state.update(|v| {
                            devices::apply_toggle(&mut v.items, &id, confirmed);
                        });
                        toasts.success("Device status updated!");
                    }
                    Err(e) => {
                        log::error!("toggle {} failed: {}", id, e);
                        toasts.error("Failed to toggle device");
                    }
                }
            });
        }
    });

    let on_save_ac = Callback::new({
        let api = api.clone();
        move |(id, settings): (String, AcSettings)| {
            let api = api.clone();
            async move {
                match api.save_ac_settings(&id, settings).await {
                    Ok(applied) => {
                        view_state.update(|v| {
                            devices::apply_ac_settings(&mut v.items, &id, applied);
                        });
                        ac_target.set(None);
                        toasts.success("AC settings updated!");
                        Ok(())
                    }
                    Err(e) => {
                        // 编辑器保持打开
                        log::error!("saving AC settings for {} failed: {}", id, e);
                        toasts.error("Failed to update AC settings");
                        Err(e.user_message("Failed to update AC settings"))
                    }
                }
            }
            .boxed_local()
        }
    });

    // 失败时既提示也把错误交回表单
    let on_add = Callback::new({
        let api = api.clone();
        let reload = load_devices.clone();
        move |draft: DeviceDraft| {
            let api = api.clone();
            let reload = reload.clone();
            async move {
                match api.add_device(&draft).await {
                    Ok(created) => {
                        match created {
                            Some(device) => view_state.update(|v| v.items.push(device)),
                            // 服务端没有回传设备，重新拉取列表
                            None => reload(),
                        }
                        add_open.set(false);
                        toasts.success("Device added successfully!");
                        Ok(())
                    }
                    Err(e) => {
                        log::error!("adding device failed: {}", e);
                        toasts.error("Failed to add device");
                        Err(e.user_message("Failed to add device"))
                    }
                }
            }
            .boxed_local()
        }
    });

    let on_delete = Callback::new({
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                match api.remove_device(&id, confirm).await {
                    Ok(Removal::Removed) => {
                        view_state.update(|v| {
                            devices::remove_device(&mut v.items, &id);
                        });
                        toasts.success("Device deleted successfully");
                    }
                    Ok(Removal::Cancelled) => {}
                    Err(e) => {
                        log::error!("deleting {} failed: {}", id, e);
                        toasts.error("Failed to delete device");
                    }
                }
            });
        }
    });

    let counts = Memo::new(move |_| view_state.with(|v| DeviceCounts::of(&v.items)));
    let loading = move || view_state.with(|v| v.loading);
    let refreshing = move || view_state.with(|v| v.refreshing);
    let error = move || view_state.with(|v| v.error.clone());
    let is_empty = move || view_state.with(|v| v.items.is_empty());

    let greeting = move || match label.get() {
        Some(label) if !label.is_empty() => {
            format!("Welcome back, {}! Manage your smart devices.", label)
        }
        _ => "Welcome back! Manage your smart devices.".to_string(),
    };

    let refresh = load_devices.clone();

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <ToastHost toasts=toasts />

            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="opacity-70">{greeting}</p>
                </div>
                <div class="flex gap-2">
                    <button
                        class="btn btn-outline gap-2"
                        disabled=move || view_state.with(ResourceView::is_busy)
                        on:click=move |_| refresh()
                    >
                        <RefreshCw attr:class=move || {
                            if refreshing() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                        } />
                        "Refresh"
                    </button>
                    <button class="btn btn-primary gap-2" on:click=move |_| add_open.set(true)>
                        <Plus attr:class="h-4 w-4" />
                        "Add Device"
                    </button>
                </div>
            </div>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <Cpu attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Devices"</div>
                    <div class="stat-value">{move || counts.get().total}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure text-success">
                        <Power attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Online"</div>
                    <div class="stat-value text-success">{move || counts.get().online}</div>
                </div>
                <div class="stat">
                    <div class="stat-figure opacity-60">
                        <Power attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Offline"</div>
                    <div class="stat-value opacity-70">{move || counts.get().offline}</div>
                </div>
            </div>

            <Show when=loading>
                <div class="flex flex-col items-center py-16 gap-4">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <p class="opacity-70">"Loading devices..."</p>
                </div>
            </Show>

            // 出错时保留上一次成功加载的列表
            {
                let retry = load_devices.clone();
                move || {
                    let retry = retry.clone();
                    error()
                        .filter(|_| !loading())
                        .map(|message| {
                            view! {
                                <div role="alert" class="alert alert-error">
                                    <AlertCircle attr:class="h-6 w-6" />
                                    <div>
                                        <h3 class="font-bold">"Something went wrong"</h3>
                                        <div class="text-sm">{message}</div>
                                    </div>
                                    <button class="btn btn-sm" on:click=move |_| retry()>
                                        "Try Again"
                                    </button>
                                </div>
                            }
                        })
                }
            }

            <Show when=move || !loading() && error().is_none() && is_empty()>
                <div class="card bg-base-100 shadow">
                    <div class="card-body items-center text-center">
                        <h3 class="card-title">"No devices yet"</h3>
                        <p class="opacity-70">"Add your first smart device to get started."</p>
                        <button class="btn btn-primary gap-2 mt-2" on:click=move |_| add_open.set(true)>
                            <Plus attr:class="h-4 w-4" />
                            "Add Device"
                        </button>
                    </div>
                </div>
            </Show>

            <div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">
                // 以整个设备为 key：状态或设置变化时重新渲染卡片
                <For
                    each=move || view_state.with(|v| v.items.clone())
                    key=|device| device.clone()
                    children=move |device| {
                        view! {
                            <DeviceCard
                                device=device
                                on_toggle=on_toggle
                                on_settings=move |device: Device| ac_target.set(Some(device))
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>

            <AcModal
                device=ac_target
                on_close=move |_| ac_target.set(None)
                on_save=on_save_ac
            />
            <AddDeviceModal
                open=add_open
                on_close=move |_| add_open.set(false)
                on_add=on_add
            />
        </div>
    }
}

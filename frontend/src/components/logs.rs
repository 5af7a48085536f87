use crate::api::use_api;
use crate::components::icons::*;
use crate::web::router::Link;
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::logs::entry_count_label;
use smarthome_shared::{DeviceNames, LogEntry, ResourceView};

const LOAD_FAILED: &str = "Failed to load logs. Please try again.";

/// 一行日志的展示数据
#[derive(Clone, PartialEq)]
struct LogRow {
    device: String,
    action: String,
    tone: &'static str,
    time: String,
    details: Option<String>,
}

impl LogRow {
    fn build(entry: &LogEntry, names: &DeviceNames) -> Self {
        Self {
            device: entry.device_label(names),
            action: entry.action.clone(),
            tone: entry.tone().css_class(),
            time: entry.occurred_at().render(&Local),
            details: entry.has_details().then(|| entry.details_text()),
        }
    }
}

#[component]
pub fn LogsPage(
    /// 只看某个设备的日志；`None` 时显示全部
    device_id: Option<String>,
) -> impl IntoView {
    let api = use_api();
    let view_state = RwSignal::new(ResourceView::<LogEntry>::default());
    // 仅用于补全缺失的设备名
    let names = RwSignal::new(DeviceNames::default());
    let scoped = device_id.is_some();

    let load_logs = {
        let api = api.clone();
        move || {
            view_state.update(ResourceView::start);
            let api = api.clone();
            let device_id = device_id.clone();
            spawn_local(async move {
                let (logs, devices) =
                    futures::join!(api.fetch_logs(device_id.as_deref()), api.fetch_devices());

                match devices {
                    Ok(devices) => names.set(DeviceNames::from_devices(&devices)),
                    Err(e) => log::warn!("device names unavailable: {}", e),
                }
                match logs {
                    Ok(items) => view_state.update(|v| v.finish_ok(items)),
                    Err(e) => {
                        log::error!("loading logs failed: {}", e);
                        view_state.update(|v| v.finish_err(LOAD_FAILED));
                    }
                }
            });
        }
    };

    load_logs();

    let loading = move || view_state.with(|v| v.loading);
    let refreshing = move || view_state.with(|v| v.refreshing);
    let error = move || view_state.with(|v| v.error.clone());
    let rows = Memo::new(move |_| {
        names.with(|names| {
            view_state.with(|v| {
                v.items
                    .iter()
                    .map(|entry| LogRow::build(entry, names))
                    .collect::<Vec<_>>()
            })
        })
    });
    let has_rows = move || rows.with(|r| !r.is_empty());

    let subtitle = if scoped {
        "Activity history for this device"
    } else {
        "Track all device activities and changes"
    };

    let refresh = load_logs.clone();
    let retry = load_logs.clone();

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Activity Logs"</h1>
                    <p class="opacity-70">{subtitle}</p>
                </div>
                <div class="flex gap-2">
                    <Show when=move || scoped>
                        <Link to="/logs" class="btn btn-ghost gap-2">
                            <ArrowLeft attr:class="h-4 w-4" />
                            "All Logs"
                        </Link>
                    </Show>
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
                </div>
            </div>

            <Show when=loading>
                <div class="flex flex-col items-center py-16 gap-4">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <p class="opacity-70">"Loading activity logs..."</p>
                </div>
            </Show>

            {move || {
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
            }}

            <Show when=move || !loading() && error().is_none() && !has_rows()>
                <div class="flex flex-col items-center py-16 gap-4 text-center">
                    <div class="p-5 rounded-full bg-base-200">
                        <FileText attr:class="h-10 w-10 opacity-60" />
                    </div>
                    <h3 class="text-xl font-semibold">"No activity yet"</h3>
                    <p class="opacity-70 max-w-md">
                        "Activity logs will appear here when you interact with your devices."
                    </p>
                </div>
            </Show>

            // 刷新期间保留已渲染的列表
            <Show when=has_rows>
                <div class="hidden md:block card bg-base-100 shadow overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Device"</th>
                                <th>"Action"</th>
                                <th>"Time"</th>
                                <th>"Details"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                rows.get()
                                    .into_iter()
                                    .map(|row| {
                                        view! {
                                            <tr class="hover">
                                                <td class="font-medium">{row.device}</td>
                                                <td>
                                                    <span class=row.tone>{row.action}</span>
                                                </td>
                                                <td class="text-sm opacity-70">{row.time}</td>
                                                <td class="font-mono text-sm opacity-70">
                                                    {match row.details {
                                                        Some(text) => view! {
                                                            <code class="bg-base-200 px-2 py-1 rounded text-xs whitespace-pre-wrap">
                                                                {text}
                                                            </code>
                                                        }
                                                        .into_any(),
                                                        None => "-".into_any(),
                                                    }}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>

                <div class="md:hidden space-y-4">
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body p-4 gap-2">
                                            <div class="flex items-start justify-between">
                                                <span class="font-medium">{row.device}</span>
                                                <span class=row.tone>{row.action}</span>
                                            </div>
                                            <div class="flex items-center gap-2 text-sm opacity-70">
                                                <Clock attr:class="h-4 w-4" />
                                                {row.time}
                                            </div>
                                            {row.details.map(|text| view! {
                                                <div class="flex items-start gap-2 text-sm">
                                                    <Info attr:class="h-4 w-4 mt-0.5 opacity-60" />
                                                    <code class="bg-base-200 px-2 py-1 rounded text-xs flex-1 overflow-auto whitespace-pre-wrap">
                                                        {text}
                                                    </code>
                                                </div>
                                            })}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <div class="text-center text-sm opacity-70">
                    {move || entry_count_label(rows.with(Vec::len))}
                </div>
            </Show>
        </div>
    }
}

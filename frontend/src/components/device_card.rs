use crate::components::icons::*;
use crate::web::router::Link;
use leptos::prelude::*;
use smarthome_shared::{Device, DeviceType};

/// 按设备类型选择图标
fn device_icon(kind: &DeviceType) -> AnyView {
    match kind {
        DeviceType::Light => view! { <Lightbulb attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Fan => view! { <FanIcon attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Ac => view! { <Snowflake attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Tv => view! { <TvIcon attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Sensor => view! { <Thermometer attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Door => view! { <DoorOpen attr:class="h-8 w-8" /> }.into_any(),
        DeviceType::Other(_) => view! { <Cpu attr:class="h-8 w-8" /> }.into_any(),
    }
}

#[component]
pub fn DeviceCard(
    device: Device,
    #[prop(into)] on_toggle: Callback<String>,
    #[prop(into)] on_settings: Callback<Device>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let is_on = device.status.is_on();
    let is_ac = device.kind.is_ac();
    let logs_path = format!("/logs/{}", device.id);

    let toggle_id = device.id.clone();
    let delete_id = device.id.clone();
    let settings_target = device.clone();

    let ac_summary = device
        .ac_settings
        .filter(|_| is_ac)
        .map(|settings| {
            view! {
                <div class="bg-base-200 rounded-lg p-3 text-sm space-y-1">
                    <div class="flex justify-between">
                        <span class="opacity-70">"Temperature"</span>
                        <span class="font-medium">{format!("{}°C", settings.temperature)}</span>
                    </div>
                    <div class="flex justify-between">
                        <span class="opacity-70">"Mode"</span>
                        <span class="font-medium">{settings.mode.label()}</span>
                    </div>
                </div>
            }
        });

    view! {
        <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
            <div class="card-body gap-4">
                <div class="flex items-start justify-between">
                    <div class=if is_on {
                        "p-3 rounded-xl bg-primary/10 text-primary"
                    } else {
                        "p-3 rounded-xl bg-base-200 opacity-60"
                    }>{device_icon(&device.kind)}</div>
                    <span class=if is_on { "badge badge-success" } else { "badge badge-ghost" }>
                        {if is_on { "ON" } else { "OFF" }}
                    </span>
                </div>

                <div>
                    <h3 class="card-title">{device.name.clone()}</h3>
                    <p class="text-sm opacity-70">
                        {format!("{} • {}", device.room, device.kind.label())}
                    </p>
                </div>

                {ac_summary}

                <div class="card-actions items-center">
                    <button
                        class=if is_on {
                            "btn btn-error btn-outline flex-1 gap-2"
                        } else {
                            "btn btn-success btn-outline flex-1 gap-2"
                        }
                        on:click=move |_| on_toggle.run(toggle_id.clone())
                    >
                        <Power attr:class="h-4 w-4" />
                        {if is_on { "Turn Off" } else { "Turn On" }}
                    </button>
                    {is_ac
                        .then(|| {
                            view! {
                                <button
                                    class="btn btn-square btn-ghost"
                                    title="AC Settings"
                                    on:click=move |_| on_settings.run(settings_target.clone())
                                >
                                    <Settings attr:class="h-4 w-4" />
                                </button>
                            }
                        })}
                    <Link to=logs_path class="btn btn-square btn-ghost">
                        <FileText attr:class="h-4 w-4" />
                    </Link>
                    <button
                        class="btn btn-square btn-ghost text-error"
                        title="Delete device"
                        on:click=move |_| on_delete.run(delete_id.clone())
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}

mod form_state;

use crate::components::icons::{AlertCircle, Minus, Plus, Snowflake};
use form_state::AcFormState;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::{AcMode, AcSettings, Device};

/// 保存回调：返回的 future 结束前提交按钮保持禁用
pub type SaveAcSettings = Callback<(String, AcSettings), LocalBoxFuture<'static, Result<(), String>>>;

#[component]
pub fn AcModal(
    /// 正在编辑的设备；`None` 时对话框关闭
    #[prop(into)]
    device: Signal<Option<Device>>,
    #[prop(into)] on_close: Callback<()>,
    on_save: SaveAcSettings,
) -> impl IntoView {
    let state = AcFormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 目标设备变化时重置表单
    Effect::new(move |_| {
        device.with(|target| state.reset_from(target.as_ref()));
    });

    Effect::new(move |_| {
        let open = device.with(Option::is_some);
        if let Some(dialog) = dialog_ref.get() {
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(target) = device.get_untracked() else {
            return;
        };
        if state.submitting.get_untracked() {
            return;
        }
        state.submitting.set(true);
        state.error.set(None);

        let pending = on_save.run((target.id, state.to_settings()));
        spawn_local(async move {
            let result = pending.await;
            // 成功与失败都释放提交状态
            state.submitting.set(false);
            if let Err(message) = result {
                state.error.set(Some(message));
            }
        });
    };

    let title = move || device.with(|d| d.as_ref().map(|d| d.name.clone()).unwrap_or_default());

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box">
                <div class="flex items-center gap-3 mb-4">
                    <div class="p-2 rounded-xl bg-primary/10 text-primary">
                        <Snowflake attr:class="h-6 w-6" />
                    </div>
                    <div>
                        <h3 class="font-bold text-lg">"AC Settings"</h3>
                        <p class="text-sm opacity-70">{title}</p>
                    </div>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    <Show when=move || state.error.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <AlertCircle attr:class="h-5 w-5" />
                            <span>{move || state.error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="ac_temperature">
                            <span class="label-text">"Temperature (°C)"</span>
                        </label>
                        <div class="join w-full">
                            <button type="button" class="btn join-item" on:click=move |_| state.step(-1)>
                                <Minus attr:class="h-4 w-4" />
                            </button>
                            <input
                                id="ac_temperature"
                                type="number"
                                min=AcSettings::TEMP_MIN.to_string()
                                max=AcSettings::TEMP_MAX.to_string()
                                class="input input-bordered join-item w-full text-center"
                                prop:value=move || state.temperature.get().to_string()
                                on:change=move |ev| state.set_temperature_input(&event_target_value(&ev))
                            />
                            <button type="button" class="btn join-item" on:click=move |_| state.step(1)>
                                <Plus attr:class="h-4 w-4" />
                            </button>
                        </div>
                        <label class="label">
                            <span class="label-text-alt opacity-60">
                                {format!("Range: {}°C - {}°C", AcSettings::TEMP_MIN, AcSettings::TEMP_MAX)}
                            </span>
                        </label>
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Mode"</span>
                        </label>
                        <div class="grid grid-cols-4 gap-2">
                            {AcMode::ALL
                                .into_iter()
                                .map(|mode| {
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if state.mode.get() == mode {
                                                    "btn btn-primary btn-sm"
                                                } else {
                                                    "btn btn-ghost btn-sm"
                                                }
                                            }
                                            on:click=move |_| state.mode.set(mode)
                                        >
                                            {mode.label()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || state.submitting.get()>
                            {move || if state.submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save Settings".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

mod form_state;

use crate::components::icons::{AlertCircle, Plus};
use form_state::DeviceFormState;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::{DeviceDraft, DeviceType};

/// 提交失败时表单内显示的文本
const ADD_FAILED: &str = "Failed to add device. Please try again.";

/// 新增回调：返回的 future 结束前提交按钮保持禁用
pub type AddDevice = Callback<DeviceDraft, LocalBoxFuture<'static, Result<(), String>>>;

#[component]
pub fn AddDeviceModal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    on_add: AddDevice,
) -> impl IntoView {
    let state = DeviceFormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let open = open.get();
        if let Some(dialog) = dialog_ref.get() {
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });

    let close = move || {
        state.reset();
        on_close.run(());
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if state.submitting.get_untracked() {
            return;
        }
        state.error.set(None);

        // 校验失败不发请求
        let draft = match state.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                state.error.set(Some(e.to_string()));
                return;
            }
        };

        state.submitting.set(true);
        let pending = on_add.run(draft);
        spawn_local(async move {
            let result = pending.await;
            // 成功与失败都释放提交状态
            state.submitting.set(false);
            match result {
                Ok(()) => state.reset(),
                // 保留用户输入
                Err(message) => {
                    log::debug!("add device failed: {}", message);
                    state.error.set(Some(ADD_FAILED.to_string()));
                }
            }
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| close()>
            <div class="modal-box">
                <div class="flex items-center gap-3 mb-4">
                    <div class="p-2 rounded-xl bg-primary/10 text-primary">
                        <Plus attr:class="h-6 w-6" />
                    </div>
                    <h3 class="font-bold text-lg">"Add New Device"</h3>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <Show when=move || state.error.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <AlertCircle attr:class="h-5 w-5" />
                            <span>{move || state.error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="device_name" class="label">
                            <span class="label-text">"Device Name"</span>
                        </label>
                        <input
                            id="device_name"
                            type="text"
                            placeholder="e.g., Living Room Light"
                            class="input input-bordered w-full"
                            on:input=move |ev| state.name.set(event_target_value(&ev))
                            prop:value=move || state.name.get()
                        />
                    </div>

                    <div class="form-control">
                        <label for="device_room" class="label">
                            <span class="label-text">"Room"</span>
                        </label>
                        <input
                            id="device_room"
                            type="text"
                            placeholder="e.g., Living Room"
                            class="input input-bordered w-full"
                            on:input=move |ev| state.room.set(event_target_value(&ev))
                            prop:value=move || state.room.get()
                        />
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Device Type"</span>
                        </label>
                        <div class="grid grid-cols-3 gap-2">
                            {DeviceType::SELECTABLE
                                .into_iter()
                                .map(|kind| {
                                    let label = kind.label().to_string();
                                    let selected = kind.clone();
                                    let is_selected = move || state.kind.with(|k| *k == selected);
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if is_selected() {
                                                    "btn btn-primary btn-sm"
                                                } else {
                                                    "btn btn-ghost btn-sm"
                                                }
                                            }
                                            on:click=move |_| state.kind.set(kind.clone())
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || state.submitting.get()>
                            {move || if state.submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Adding..." }.into_any()
                            } else {
                                "Add Device".into_any()
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

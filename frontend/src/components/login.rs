use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::icons::{AlertCircle, Eye, EyeOff, HomeIcon, Lock, Mail};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::auth::{LoginForm, login_error_message};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 被守卫拦下时给出提示
    let redirected = router.redirected_from();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        // 校验失败不发请求
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.login(&form).await {
                Ok(credential) => {
                    login(&auth, credential, form.email.clone());
                    router.navigate_to_route(AppRoute::auth_success_redirect(), true);
                }
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_msg.set(Some(login_error_message(&e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <HomeIcon attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">
                            "Sign in to access your smart home dashboard"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || redirected.with(Option::is_some) && error_msg.with(Option::is_none)>
                            <div role="alert" class="alert alert-info text-sm py-2">
                                <span>"Please log in to continue"</span>
                            </div>
                        </Show>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Mail attr:class="h-5 w-5 opacity-60" />
                                <input
                                    id="email"
                                    type="email"
                                    class="grow"
                                    placeholder="you@example.com"
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                />
                            </label>
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Lock attr:class="h-5 w-5 opacity-60" />
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    class="grow"
                                    placeholder="Enter your password"
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                />
                                <button
                                    type="button"
                                    class="opacity-60 hover:opacity-100"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-5 w-5" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-5 w-5" /> }.into_any()
                                    }}
                                </button>
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm opacity-70 mt-4">
                            "Don't have an account? "
                            <Link to="/register" class="link link-primary font-medium">"Create one"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

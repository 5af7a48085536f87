use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::icons::{AlertCircle, Eye, EyeOff, Lock, Mail, UserIcon};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use smarthome_shared::auth::{RegisterForm, Registration, register_error_message};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let password_type = move || if show_password.get() { "text" } else { "password" };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            match api.register(&form).await {
                Ok(Registration::SignedIn { credential }) => {
                    login(&auth, credential, form.email.clone());
                    router.navigate_to_route(AppRoute::auth_success_redirect(), true);
                }
                Ok(Registration::LoginRequired) => {
                    router.navigate_to_route(AppRoute::Login, true);
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    set_error_msg.set(Some(register_error_message(&e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                    <p class="text-base-content/70">"Sign up to start managing your smart home"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <AlertCircle attr:class="h-5 w-5" />
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <UserIcon attr:class="h-5 w-5 opacity-60" />
                                <input
                                    id="name"
                                    type="text"
                                    class="grow"
                                    placeholder="John Doe"
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                    prop:value=name
                                />
                            </label>
                        </div>
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
                                    type=password_type
                                    class="grow"
                                    placeholder="At least 6 characters"
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
                        <div class="form-control">
                            <label class="label" for="confirm_password">
                                <span class="label-text">"Confirm Password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <Lock attr:class="h-5 w-5 opacity-60" />
                                <input
                                    id="confirm_password"
                                    type=password_type
                                    class="grow"
                                    placeholder="Confirm your password"
                                    disabled=move || is_submitting.get()
                                    on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                                    prop:value=confirm_password
                                />
                            </label>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm opacity-70 mt-4">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary font-medium">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

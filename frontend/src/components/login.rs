use crate::auth::{login, use_auth};
use crate::components::alert::Alert;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use moviewatch::{ApiError, AppRoute};

fn login_error(e: &ApiError) -> String {
    match e {
        ApiError::Application(message) => message.clone(),
        ApiError::Network(_) => "Unable to reach the server".to_string(),
        _ => "Invalid credentials".to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(&auth, email.get_untracked(), password.get_untracked()).await {
                Ok(()) => router.go(AppRoute::auth_success_redirect()),
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_msg.set(Some(login_error(&e)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card shrink-0 w-full max-w-md shadow-2xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Login"</h2>
                <Alert message=error_msg />

                <div class="form-control">
                    <label class="label" for="email">
                        <span class="label-text">"Email Address"</span>
                    </label>
                    <input
                        id="email"
                        type="email"
                        autocomplete="email-new"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="password">
                        <span class="label-text">"Password"</span>
                    </label>
                    <input
                        id="password"
                        type="password"
                        autocomplete="password-new"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                        } else {
                            "Login".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}

use leptos::prelude::*;

/// 页面内提示条；`message` 为 `None` 时不渲染
#[component]
pub fn Alert(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(default = "alert-error")] kind: &'static str,
) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class=format!("alert {} text-sm py-2 mb-4", kind)>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

//! 表单字段组件
//!
//! 无状态：值与错误标记由调用方以信号传入，变更通过回调交回。

use leptos::prelude::*;

fn error_class(show: bool) -> &'static str {
    if show { "label-text-alt text-error" } else { "hidden" }
}

#[component]
pub fn Input(
    title: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] has_error: Signal<bool>,
    error_msg: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control mb-3">
            <label class="label" for=name>
                <span class="label-text">{title}</span>
            </label>
            <input
                id=name
                name=name
                type=input_type
                class="input input-bordered"
                prop:value=value
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            <label class="label">
                <span class=move || error_class(has_error.get())>{error_msg}</span>
            </label>
        </div>
    }
}

#[component]
pub fn TextArea(
    title: &'static str,
    name: &'static str,
    #[prop(default = 3)] rows: u32,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] has_error: Signal<bool>,
    error_msg: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control mb-3">
            <label class="label" for=name>
                <span class="label-text">{title}</span>
            </label>
            <textarea
                id=name
                name=name
                rows=rows
                class="textarea textarea-bordered"
                prop:value=value
                on:input=move |ev| on_change.run(event_target_value(&ev))
            ></textarea>
            <label class="label">
                <span class=move || error_class(has_error.get())>{error_msg}</span>
            </label>
        </div>
    }
}

/// 下拉框；`options` 为 `(值, 显示文本)`
#[component]
pub fn Select(
    title: &'static str,
    name: &'static str,
    options: Vec<(&'static str, &'static str)>,
    #[prop(default = "Choose...")] placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] has_error: Signal<bool>,
    error_msg: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control mb-3">
            <label class="label" for=name>
                <span class="label-text">{title}</span>
            </label>
            <select
                id=name
                name=name
                class="select select-bordered"
                prop:value=value
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">{placeholder}</option>
                {options
                    .into_iter()
                    .map(|(id, label)| {
                        view! {
                            <option value=id selected=move || value.with(|v| v == id)>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <label class="label">
                <span class=move || error_class(has_error.get())>{error_msg}</span>
            </label>
        </div>
    }
}

#[component]
pub fn CheckBox(
    title: String,
    id: String,
    value: String,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label cursor-pointer justify-start gap-3" for=id.clone()>
                <input
                    id=id
                    name="genre"
                    type="checkbox"
                    class="checkbox checkbox-primary"
                    value=value
                    prop:checked=checked
                    on:change=move |ev| on_change.run(event_target_checked(&ev))
                />
                <span class="label-text">{title}</span>
            </label>
        </div>
    }
}

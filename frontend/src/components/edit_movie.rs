//! 新增 / 编辑电影页
//!
//! 表单状态与校验在核心库的 `MovieForm` 中，本组件只负责渲染、
//! 对话框与导航。

use crate::auth::use_auth;
use crate::components::alert::Alert;
use crate::components::form::{CheckBox, Input, Select, TextArea};
use crate::web::router::use_router;
use crate::web::use_page_scope;
use leptos::html;
use leptos::prelude::*;
use moviewatch::{ApiError, AppRoute, EditorLoad, Field, MovieEditor, MovieForm, SubmitOutcome, Validation};
use moviewatch_shared::{MovieId, MpaaRating, NEW_MOVIE_ID};

fn open_dialog(dialog: NodeRef<html::Dialog>) {
    if let Some(el) = dialog.get_untracked() {
        if let Err(e) = el.show_modal() {
            log::warn!("failed to open dialog: {:?}", e);
        }
    }
}

fn close_dialog(dialog: NodeRef<html::Dialog>) {
    if let Some(el) = dialog.get_untracked() {
        el.close();
    }
}

#[component]
pub fn EditMoviePage(id: MovieId) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_page_scope();

    let form = RwSignal::new(MovieForm::default());
    let errors = RwSignal::new(Validation::default());
    let (alert, set_alert) = signal(Option::<String>::None);
    let genre_dialog = NodeRef::<html::Dialog>::new();
    let delete_dialog = NodeRef::<html::Dialog>::new();

    let to_login = move || router.go(AppRoute::auth_failure_redirect());
    let to_catalogue = move || router.go(AppRoute::ManageCatalogue);

    let report = move |e: ApiError| {
        if e.is_unauthorized() {
            to_login();
        } else {
            set_alert.set(Some(e.to_string()));
        }
    };

    // ----- 加载 -----
    if let Some(api) = auth.api() {
        let token = auth.token();
        scope.spawn(async move {
            match MovieEditor::new(&api, &token).load(id).await {
                Ok(EditorLoad::Ready(loaded)) => form.set(loaded),
                Ok(EditorLoad::RedirectToLogin) => to_login(),
                Err(e) => {
                    log::error!("failed to load movie {}: {}", id, e);
                    report(e);
                }
            }
        });
    }

    // ----- 提交 -----
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(api) = auth.api() else {
            return;
        };
        let token = auth.token();
        let current = form.get_untracked();
        scope.spawn(async move {
            match MovieEditor::new(&api, &token).submit(&current).await {
                SubmitOutcome::Invalid(report) => {
                    if report.needs_genre_prompt() {
                        open_dialog(genre_dialog);
                    }
                    errors.set(report);
                }
                SubmitOutcome::Saved(message) => {
                    log::info!("movie saved: {}", message);
                    to_catalogue();
                }
                SubmitOutcome::Failed(e) => {
                    errors.set(Validation::default());
                    report(e);
                }
            }
        });
    };

    // ----- 删除 -----
    let on_confirm_delete = move |_| {
        close_dialog(delete_dialog);
        let Some(api) = auth.api() else {
            return;
        };
        let token = auth.token();
        scope.spawn(async move {
            match MovieEditor::new(&api, &token).delete(id).await {
                Ok(_) => to_catalogue(),
                Err(e) => report(e),
            }
        });
    };

    let value = move |field: Field| Signal::derive(move || form.with(|f| f.value(field).to_string()));
    let has_error = move |field: Field| Signal::derive(move || errors.with(|e| e.has(field)));
    let setter = move |field: Field| Callback::new(move |v: String| form.update(|f| f.set(field, v)));

    let ratings: Vec<(&'static str, &'static str)> =
        MpaaRating::ALL.iter().map(|r| (r.as_str(), r.as_str())).collect();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Add/Edit Movie"</h2>
                <div class="divider my-0"></div>
                <Alert message=alert />

                <form on:submit=on_submit>
                    <input type="hidden" name="id" prop:value=move || form.with(|f| f.id.to_string()) />

                    <Input
                        title="Title"
                        name="title"
                        value=value(Field::Title)
                        on_change=setter(Field::Title)
                        has_error=has_error(Field::Title)
                        error_msg=Field::Title.error_message()
                    />
                    <Input
                        title="Release Date"
                        name="release_date"
                        input_type="date"
                        value=value(Field::ReleaseDate)
                        on_change=setter(Field::ReleaseDate)
                        has_error=has_error(Field::ReleaseDate)
                        error_msg=Field::ReleaseDate.error_message()
                    />
                    <Input
                        title="Runtime"
                        name="runtime"
                        value=value(Field::Runtime)
                        on_change=setter(Field::Runtime)
                        has_error=has_error(Field::Runtime)
                        error_msg=Field::Runtime.error_message()
                    />
                    <Select
                        title="MPAA Rating"
                        name="mpaa_rating"
                        options=ratings
                        value=value(Field::MpaaRating)
                        on_change=setter(Field::MpaaRating)
                        has_error=has_error(Field::MpaaRating)
                        error_msg=Field::MpaaRating.error_message()
                    />
                    <TextArea
                        title="Description"
                        name="description"
                        value=value(Field::Description)
                        on_change=setter(Field::Description)
                        has_error=has_error(Field::Description)
                        error_msg=Field::Description.error_message()
                    />

                    <div class="divider"></div>
                    <h3 class="text-lg font-semibold mb-2">"Genres"</h3>
                    <For each=move || form.with(|f| f.genres.clone()) key=|g| g.id let:genre>
                        {
                            let genre_id = genre.id;
                            view! {
                                <CheckBox
                                    title=genre.genre.clone()
                                    id=format!("genre-{}", genre_id)
                                    value=genre_id.to_string()
                                    checked=Signal::derive(move || form.with(|f| f.is_checked(genre_id)))
                                    on_change=move |checked: bool| {
                                        form.update(|f| f.toggle_genre(genre_id, checked))
                                    }
                                />
                            }
                        }
                    </For>
                    <Show when=move || has_error(Field::Genres).get()>
                        <p class="text-error text-sm mt-2">{Field::Genres.error_message()}</p>
                    </Show>

                    <div class="divider"></div>
                    <div class="flex gap-2">
                        <button class="btn btn-primary" type="submit">"Save"</button>
                        <Show when=move || id != NEW_MOVIE_ID>
                            <button
                                class="btn btn-error"
                                type="button"
                                on:click=move |_| open_dialog(delete_dialog)
                            >
                                "Delete Movie"
                            </button>
                        </Show>
                    </div>
                </form>
            </div>
        </div>

        <dialog node_ref=genre_dialog class="modal">
            <div class="modal-box">
                <h3 class="font-bold text-lg text-error">"Error!"</h3>
                <p class="py-4">{Field::Genres.error_message()}</p>
                <div class="modal-action">
                    <form method="dialog">
                        <button class="btn">"OK"</button>
                    </form>
                </div>
            </div>
        </dialog>

        <dialog node_ref=delete_dialog class="modal">
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Delete movie?"</h3>
                <p class="py-4">"You cannot undo this action!"</p>
                <div class="modal-action">
                    <form method="dialog">
                        <button class="btn">"Cancel"</button>
                    </form>
                    <button class="btn btn-error" on:click=on_confirm_delete>"Delete"</button>
                </div>
            </div>
        </dialog>
    }
}

use crate::auth::use_auth;
use crate::web::use_page_scope;
use leptos::prelude::*;
use moviewatch_shared::Genre;

#[component]
pub fn GenresPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_page_scope();
    let (genres, set_genres) = signal(Vec::<Genre>::new());

    if let Some(api) = auth.api() {
        scope.spawn(async move {
            match api.genres().await {
                Ok(list) => set_genres.set(list),
                Err(e) => log::error!("failed to load genres: {}", e),
            }
        });
    }

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Genres"</h2>
                <ul class="list-disc list-inside">
                    <For each=move || genres.get() key=|g| g.id let:genre>
                        <li>{genre.genre}</li>
                    </For>
                </ul>
            </div>
        </div>
    }
}

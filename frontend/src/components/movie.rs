use crate::auth::use_auth;
use crate::web::use_page_scope;
use leptos::prelude::*;
use moviewatch_shared::{Movie, MovieId};

#[component]
pub fn MoviePage(id: MovieId) -> impl IntoView {
    let auth = use_auth();
    let scope = use_page_scope();
    let (movie, set_movie) = signal(Option::<Movie>::None);

    if let Some(api) = auth.api() {
        scope.spawn(async move {
            match api.movie(id).await {
                Ok(m) => set_movie.set(Some(m)),
                Err(e) => log::error!("failed to load movie {}: {}", id, e),
            }
        });
    }

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                {move || {
                    movie
                        .get()
                        .map(|m| {
                            view! {
                                <h2 class="card-title text-2xl">"Movie: " {m.title.clone()}</h2>
                                <p class="text-base-content/70">
                                    <small>
                                        <em>
                                            {m.release_date.to_display()} ", "
                                            {m.runtime} " minutes, Rated "
                                            {m.mpaa_rating.clone()}
                                        </em>
                                    </small>
                                </p>
                                <div class="flex gap-2 flex-wrap">
                                    {m
                                        .genres
                                        .iter()
                                        .map(|g| {
                                            view! {
                                                <span class="badge badge-secondary">
                                                    {g.genre.clone()}
                                                </span>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                                <div class="divider"></div>
                                <p>{m.description.clone()}</p>
                            }
                        })
                }}
            </div>
        </div>
    }
}

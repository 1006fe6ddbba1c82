use crate::auth::use_auth;
use crate::web::router::Link;
use crate::web::use_page_scope;
use leptos::prelude::*;
use moviewatch::AppRoute;
use moviewatch_shared::Movie;

/// 电影表格；`link` 决定标题链接到详情页还是编辑页
#[component]
pub fn MovieTable(
    #[prop(into)] movies: Signal<Vec<Movie>>,
    link: fn(&Movie) -> AppRoute,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Movie"</th>
                        <th>"Release Date"</th>
                        <th>"Rating"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || movies.get() key=|m| m.id let:movie>
                        <tr>
                            <td>
                                <Link to=link(&movie) class="link link-primary">
                                    {movie.title.clone()}
                                </Link>
                            </td>
                            <td>{movie.release_date.to_display()}</td>
                            <td>{movie.mpaa_rating.clone()}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn MoviesPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_page_scope();
    let (movies, set_movies) = signal(Vec::<Movie>::new());

    if let Some(api) = auth.api() {
        scope.spawn(async move {
            match api.movies().await {
                Ok(list) => set_movies.set(list),
                Err(e) => log::error!("failed to load movies: {}", e),
            }
        });
    }

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Movies"</h2>
                <MovieTable movies=movies link=|m| AppRoute::Movie(m.id) />
            </div>
        </div>
    }
}

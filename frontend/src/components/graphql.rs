use crate::auth::use_auth;
use crate::web::router::Link;
use crate::web::{PageScope, use_page_scope};
use leptos::prelude::*;
use moviewatch::AppRoute;
use moviewatch_shared::protocol::GraphQlRequest;
use moviewatch_shared::{MovieSummary, ReleaseDate};

fn display_date(raw: &Option<String>) -> String {
    match raw {
        Some(raw) => ReleaseDate::parse(raw).map_or_else(|| raw.clone(), |d| d.to_display()),
        None => String::new(),
    }
}

#[component]
pub fn GraphQlPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_page_scope();
    let (term, set_term) = signal(String::new());
    let (movies, set_movies) = signal(Vec::<MovieSummary>::new());
    // 只应用最近一次查询的结果
    let latest = StoredValue::new(0u64);

    let run = move |scope: PageScope, request: GraphQlRequest| {
        let Some(api) = auth.api() else {
            return;
        };
        latest.update_value(|n| *n += 1);
        let seq = latest.get_value();
        scope.spawn(async move {
            match api.graphql_movies(&request).await {
                Ok(list) if latest.get_value() == seq => set_movies.set(list),
                Ok(_) => log::debug!("dropping stale graphql result"),
                Err(e) => log::error!("graphql query failed: {}", e),
            }
        });
    };

    run(scope, GraphQlRequest::list());

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        let request = GraphQlRequest::for_term(&value);
        set_term.set(value);
        run(scope, request);
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"GraphQL"</h2>
                <div class="form-control mb-4">
                    <label class="label" for="search">
                        <span class="label-text">"Search"</span>
                    </label>
                    <input
                        id="search"
                        type="search"
                        class="input input-bordered"
                        prop:value=term
                        on:input=on_input
                    />
                </div>
                <Show
                    when=move || movies.with(|m| !m.is_empty())
                    fallback=|| view! { <p class="text-base-content/50">"No movies (yet)!"</p> }
                >
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
                                        <Link to=AppRoute::Movie(movie.id) class="link link-primary">
                                            {movie.title.clone()}
                                        </Link>
                                    </td>
                                    <td>{display_date(&movie.release_date)}</td>
                                    <td>{movie.mpaa_rating.clone().unwrap_or_default()}</td>
                                </tr>
                            </For>
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}

use crate::auth::use_auth;
use crate::components::movies::MovieTable;
use crate::web::router::use_router;
use crate::web::use_page_scope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use moviewatch::AppRoute;
use moviewatch_shared::Movie;

#[component]
pub fn ManageCataloguePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_page_scope();
    let (movies, set_movies) = signal(Vec::<Movie>::new());

    let token = auth.token();
    if token.is_empty() {
        // 渲染结束后再跳转
        spawn_local(async move { router.go(AppRoute::auth_failure_redirect()) });
    } else if let Some(api) = auth.api() {
        scope.spawn(async move {
            match api.admin_movies(&token).await {
                Ok(list) => set_movies.set(list),
                Err(e) if e.is_unauthorized() => router.go(AppRoute::auth_failure_redirect()),
                Err(e) => log::error!("failed to load catalogue: {}", e),
            }
        });
    }

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Manage Catalogue"</h2>
                <MovieTable movies=movies link=|m| AppRoute::EditMovie(m.id) />
            </div>
        </div>
    }
}

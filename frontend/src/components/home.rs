use crate::auth::use_auth;
use crate::web::router::Link;
use crate::web::use_page_scope;
use leptos::prelude::*;
use moviewatch::AppRoute;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_page_scope();
    let (count, set_count) = signal(Option::<usize>::None);

    if let Some(api) = auth.api() {
        scope.spawn(async move {
            match api.movies().await {
                Ok(movies) => set_count.set(Some(movies.len())),
                Err(e) => log::error!("failed to load catalogue size: {}", e),
            }
        });
    }

    view! {
        <div class="hero bg-base-100 rounded-box shadow-xl py-12">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h2 class="text-4xl font-bold">"Find a movie to watch tonight!"</h2>
                    <p class="py-6 text-base-content/70">
                        {move || match count.get() {
                            Some(n) => format!("{} movies in the catalogue.", n),
                            None => String::new(),
                        }}
                    </p>
                    <Link to=AppRoute::Movies class="btn btn-primary">"Browse movies"</Link>
                </div>
            </div>
        </div>
    }
}

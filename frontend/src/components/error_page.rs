use leptos::prelude::*;

#[component]
pub fn ErrorPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"Oops!"</h1>
                <p class="text-xl mt-4">"Sorry, an unexpected error has occurred."</p>
                <p class="mt-2 text-base-content/70"><em>"Not Found"</em></p>
            </div>
        </div>
    }
}

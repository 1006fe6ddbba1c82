//! MovieWatch 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `moviewatch::route`: 路由定义（领域模型，位于核心库）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod alert;
    pub mod edit_movie;
    pub mod error_page;
    pub mod form;
    pub mod genres;
    pub mod graphql;
    pub mod home;
    pub mod login;
    pub mod manage_catalogue;
    pub mod movie;
    pub mod movies;
}

use crate::auth::{AuthContext, init_auth, logout, use_auth};
use crate::components::edit_movie::EditMoviePage;
use crate::components::error_page::ErrorPage;
use crate::components::genres::GenresPage;
use crate::components::graphql::GraphQlPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::manage_catalogue::ManageCataloguePage;
use crate::components::movie::MoviePage;
use crate::components::movies::MoviesPage;

use leptos::prelude::*;
use leptos::task::spawn_local;
use moviewatch::{AppRoute, ClientConfig};
use moviewatch::config::{KEY_API_BASE_URL, KEY_REFRESH_INTERVAL_SECS};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;
    mod task;
    mod timer;

    pub use http::FetchClient;
    pub use storage::BrowserStorage;
    pub use task::{PageScope, use_page_scope};
    pub use timer::Interval;
}

use web::BrowserStorage;
use web::router::{Link, Router, RouterOutlet, use_router};

/// 读取运行时配置
///
/// 优先使用 LocalStorage 中的 `moviewatch.<KEY>`，其次是构建时的环境变量。
fn load_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        BrowserStorage::config(key).or_else(|| {
            let built_in = match key {
                KEY_API_BASE_URL => option_env!("MOVIEWATCH_API_BASE_URL"),
                KEY_REFRESH_INTERVAL_SECS => option_env!("MOVIEWATCH_REFRESH_INTERVAL_SECS"),
                _ => None,
            };
            built_in.map(str::to_string)
        })
    })
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Movies => view! { <MoviesPage /> }.into_any(),
        AppRoute::Movie(id) => view! { <MoviePage id=id /> }.into_any(),
        AppRoute::Genres => view! { <GenresPage /> }.into_any(),
        AppRoute::EditMovie(id) => view! { <EditMoviePage id=id /> }.into_any(),
        AppRoute::ManageCatalogue => view! { <ManageCataloguePage /> }.into_any(),
        AppRoute::GraphQl => view! { <GraphQlPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => view! { <ErrorPage /> }.into_any(),
    }
}

/// 顶栏：标题与登录 / 注销按钮
#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();

    let on_logout = move |_| {
        spawn_local(async move {
            logout(&auth).await;
            router.go(AppRoute::Login);
        });
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl mb-4">
            <div class="flex-1">
                <h1 class="text-3xl font-bold">"Go Watch a Movie!"</h1>
            </div>
            <div class="flex-none">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to=AppRoute::Login class="badge badge-success p-3">"Login"</Link>
                    }
                >
                    <button class="badge badge-error p-3" on:click=on_logout>"Logout"</button>
                </Show>
            </div>
        </div>
    }
}

/// 侧边导航：管理条目只在登录后显示
#[component]
fn Nav() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <ul class="menu bg-base-100 rounded-box shadow w-56">
            {move || {
                let current = router.current_route().get();
                AppRoute::nav_items(is_authenticated.get())
                    .into_iter()
                    .map(|item| {
                        let class = if item == current { "active" } else { "" };
                        view! {
                            <li>
                                <Link to=item class=class>{item.label()}</Link>
                            </li>
                        }
                    })
                    .collect_view()
            }}
        </ul>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取配置并创建认证上下文
    let config = load_config();
    log::info!("using API at {:?}", config.api_base_url);
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 尝试静默恢复会话
    init_auth(&auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-7xl mx-auto">
                    <Header />
                    <div class="flex flex-col md:flex-row gap-6">
                        <Nav />
                        <main class="flex-1">
                            <RouterOutlet matcher=route_matcher />
                        </main>
                    </div>
                </div>
            </div>
        </Router>
    }
}

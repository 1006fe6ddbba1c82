//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use moviewatch::AppRoute;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 状态；`push` 为 false 时替换当前记录（用于重定向）
fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[Router] failed to update history for {}: {:?}", path, e);
    }
}

/// 守卫：返回实际应当进入的路由
fn guard(target: AppRoute, is_auth: bool) -> AppRoute {
    if target.requires_auth() && !is_auth {
        log::info!("[Router] {} requires login, redirecting", target);
        AppRoute::auth_failure_redirect()
    } else if target.should_redirect_when_authenticated() && is_auth {
        log::info!("[Router] already logged in, redirecting");
        AppRoute::auth_success_redirect()
    } else {
        target
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = guard(
            AppRoute::from_path(&current_path()),
            is_authenticated.get_untracked(),
        );
        write_history(&initial.to_path(), false);
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn go(&self, target: AppRoute) {
        let route = guard(target, self.is_authenticated.get_untracked());
        write_history(&route.to_path(), true);
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let route = guard(target, is_authenticated.get_untracked());
            if route != target {
                write_history(&route.to_path(), false);
            }
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            {
                log::error!("[Router] failed to listen for popstate: {:?}", e);
            }
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向
    ///
    /// 登出后离开受保护页面；会话在挂载后才恢复时，把停在登录页的用户送回首页。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            let redirect = if !is_auth && route.requires_auth() {
                Some(AppRoute::auth_failure_redirect())
            } else if is_auth && route.should_redirect_when_authenticated() {
                Some(AppRoute::auth_success_redirect())
            } else {
                None
            };

            if let Some(redirect) = redirect {
                log::info!("[Router] auth state changed, redirecting to {}", redirect);
                write_history(&redirect.to_path(), true);
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击，经由路由服务导航
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.go(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

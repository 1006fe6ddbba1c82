//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! token 只保存在内存信号里，刷新令牌由后端通过 HttpOnly Cookie 管理；
//! 定时静默刷新由核心库的 `SessionController` 负责。

use crate::web::{FetchClient, Interval};
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use moviewatch::{ApiError, ApiResult, CatalogueApi, ClientConfig, Scheduler, SessionController, SessionStore};
use std::time::Duration;

pub type AppApi = CatalogueApi<FetchClient>;
pub type AppSession = SessionController<WebScheduler, FetchClient, SignalSession>;

// =========================================================
// 浏览器适配
// =========================================================

/// 基于信号的会话存储，token 变化会驱动导航栏与路由守卫
#[derive(Clone, Copy)]
pub struct SignalSession(RwSignal<String>);

impl SessionStore for SignalSession {
    fn token(&self) -> String {
        self.0.get_untracked()
    }

    fn set_token(&self, token: String) {
        self.0.set(token);
    }

    fn clear(&self) {
        self.0.set(String::new());
    }
}

/// `setInterval` + `spawn_local` 调度器
#[derive(Clone, Copy, Default)]
pub struct WebScheduler;

impl Scheduler for WebScheduler {
    type Interval = Interval;

    fn interval(&self, period: Duration, tick: Box<dyn Fn()>) -> Option<Interval> {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, tick)
            .inspect_err(|e| log::error!("failed to start refresh timer: {:?}", e))
            .ok()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        spawn_local(task);
    }
}

// =========================================================
// 认证上下文
// =========================================================

/// 认证上下文
///
/// 通过 Context 在组件间共享；本身是 `Copy` 的句柄。
#[derive(Clone, Copy)]
pub struct AuthContext {
    token: RwSignal<String>,
    session: StoredValue<AppSession, LocalStorage>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        let token = RwSignal::new(String::new());
        let api = CatalogueApi::new(config.api_base_url.clone(), FetchClient);
        let controller = SessionController::new(
            api,
            SignalSession(token),
            WebScheduler,
            config.refresh_interval,
        );
        Self {
            token,
            session: StoredValue::new_local(controller),
        }
    }

    /// 当前 token（非响应式读取）
    pub fn token(&self) -> String {
        self.token.get_untracked()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let token = self.token;
        Signal::derive(move || token.with(|t| !t.is_empty()))
    }

    pub fn session(&self) -> Option<AppSession> {
        self.session.try_get_value()
    }

    /// 页面发请求用的客户端
    pub fn api(&self) -> Option<AppApi> {
        self.session.try_with_value(|s| s.api().clone())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 应用挂载时恢复会话
///
/// 没有 token 时静默刷新一次，成功后启动定时刷新。
pub fn init_auth(ctx: &AuthContext) {
    let Some(session) = ctx.session() else {
        return;
    };
    spawn_local(async move {
        if session.restore().await {
            log::info!("session restored");
        }
    });
}

/// 登录并启动定时刷新
pub async fn login(ctx: &AuthContext, email: String, password: String) -> ApiResult<()> {
    match ctx.session() {
        Some(session) => session.login(&email, &password).await,
        None => Err(ApiError::Unauthenticated),
    }
}

/// 注销：无论后端结果如何都清除本地会话
///
/// 导航将由路由服务的认证状态监听自动处理。
pub async fn logout(ctx: &AuthContext) {
    if let Some(session) = ctx.session() {
        session.logout().await;
        log::info!("logged out");
    }
}

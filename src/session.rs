//! 会话模块
//!
//! 管理内存中的 access token 及其周期性静默刷新：
//! - `SessionStore`: 令牌的读 / 写 / 清除契约，由宿主（前端信号或内存）实现
//! - `Scheduler`: 定时器与任务派发的抽象，句柄被 drop 即取消
//! - `SessionController`: 刷新定时器的生命周期对象，保证任意时刻最多一个定时器

use crate::api::CatalogueApi;
use crate::error::ApiResult;
use crate::request::HttpClient;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

#[cfg(test)]
mod tests;

// =========================================================
// 会话存储 (Session Store)
// =========================================================

/// 会话上下文：空字符串即未登录
pub trait SessionStore {
    fn token(&self) -> String;
    fn set_token(&self, token: String);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        !self.token().is_empty()
    }
}

/// 纯内存实现，供非浏览器宿主与测试使用
#[derive(Clone, Default, Debug)]
pub struct MemorySession(Rc<RefCell<String>>);

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> String {
        self.0.borrow().clone()
    }

    fn set_token(&self, token: String) {
        *self.0.borrow_mut() = token;
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// =========================================================
// 调度抽象 (Scheduler)
// =========================================================

/// 周期定时器与本地任务派发
pub trait Scheduler {
    /// 定时器句柄，drop 时必须取消定时器
    type Interval;

    /// 定时器无法创建时返回 `None`
    fn interval(&self, period: Duration, tick: Box<dyn Fn()>) -> Option<Self::Interval>;

    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

// =========================================================
// 会话控制器 (Session Controller)
// =========================================================

struct Inner<S: Scheduler, C, T> {
    api: CatalogueApi<C>,
    session: T,
    scheduler: S,
    period: Duration,
    ticker: RefCell<Option<S::Interval>>,
    /// 每次清除会话时递增，用于丢弃清除前发出的刷新结果
    epoch: Cell<u64>,
}

/// 刷新定时器的生命周期对象
///
/// 克隆开销很小（共享同一内部状态）。
pub struct SessionController<S: Scheduler, C, T> {
    inner: Rc<Inner<S, C, T>>,
}

impl<S: Scheduler, C, T> Clone for SessionController<S, C, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, C, T> SessionController<S, C, T>
where
    S: Scheduler + 'static,
    C: HttpClient + 'static,
    T: SessionStore + 'static,
{
    pub fn new(api: CatalogueApi<C>, session: T, scheduler: S, period: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                session,
                scheduler,
                period,
                ticker: RefCell::new(None),
                epoch: Cell::new(0),
            }),
        }
    }

    pub fn api(&self) -> &CatalogueApi<C> {
        &self.inner.api
    }

    pub fn session(&self) -> &T {
        &self.inner.session
    }

    pub fn token(&self) -> String {
        self.inner.session.token()
    }

    pub fn is_armed(&self) -> bool {
        self.inner.ticker.borrow().is_some()
    }

    /// 应用挂载时调用：没有 token 则尝试静默刷新，成功后启动定时刷新
    ///
    /// 返回调用结束时是否处于登录状态。
    pub async fn restore(&self) -> bool {
        if self.inner.session.is_authenticated() {
            return true;
        }

        match self.refresh().await {
            Ok(true) => {
                self.arm();
                true
            }
            Ok(false) => false,
            Err(e) => {
                log::info!("user is not logged in: {}", e);
                false
            }
        }
    }

    /// 执行一次静默刷新
    ///
    /// 成功时替换 token 并返回 `Ok(true)`；若请求期间会话已被清除则丢弃结果返回 `Ok(false)`。
    /// 失败时保留原 token。
    pub async fn refresh(&self) -> ApiResult<bool> {
        let epoch = self.inner.epoch.get();
        let pair = self.inner.api.refresh().await?;

        if self.inner.epoch.get() != epoch {
            log::debug!("session was cleared while refreshing, discarding token");
            return Ok(false);
        }

        self.inner.session.set_token(pair.access_token);
        Ok(true)
    }

    /// 使用邮箱和密码登录，成功后保存 token 并启动定时刷新
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let pair = self.inner.api.authenticate(email, password).await?;
        self.start(pair.access_token);
        Ok(())
    }

    /// 保存新 token 并启动定时刷新
    pub fn start(&self, token: String) {
        self.inner.session.set_token(token);
        self.arm();
    }

    /// 注销：通知后端后无条件清除本地会话
    ///
    /// 后端失败只记录日志，客户端一律视为已注销。
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.logout().await {
            log::warn!("error logging out: {}", e);
        }
        self.end();
    }

    /// 清除 token 并停止定时刷新
    pub fn end(&self) {
        self.inner.epoch.set(self.inner.epoch.get().wrapping_add(1));
        self.inner.session.clear();
        self.disarm();
    }

    /// 启动定时刷新；已启动时先取消旧的定时器
    pub fn arm(&self) {
        self.disarm();

        let weak: Weak<Inner<S, C, T>> = Rc::downgrade(&self.inner);
        let tick = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                SessionController { inner }.tick();
            }
        });

        let interval = self.inner.scheduler.interval(self.inner.period, tick);
        if interval.is_some() {
            log::debug!("session refresh armed every {:?}", self.inner.period);
        } else {
            log::warn!("session refresh timer unavailable, token will not be renewed");
        }
        *self.inner.ticker.borrow_mut() = interval;
    }

    /// 停止定时刷新（幂等）
    pub fn disarm(&self) {
        let previous = self.inner.ticker.borrow_mut().take();
        if previous.is_some() {
            log::debug!("session refresh disarmed");
        }
    }

    fn tick(&self) {
        let this = self.clone();
        self.inner.scheduler.spawn(Box::pin(async move {
            match this.refresh().await {
                Ok(true) => log::debug!("session token refreshed"),
                Ok(false) => {}
                Err(e) => log::warn!("silent refresh failed, keeping current token: {}", e),
            }
        }));
    }
}

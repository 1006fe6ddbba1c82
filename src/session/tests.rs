use super::*;
use crate::request::HttpMethod;
use crate::request::mock::{MockHttpClient, Reply};
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

// =========================================================
// Fake Scheduler
// =========================================================

struct Slot {
    period: Duration,
    tick: Rc<dyn Fn()>,
    live: Rc<Cell<bool>>,
}

/// 手动驱动的定时器：`fire` 触发所有仍存活的定时器各一次
#[derive(Clone)]
struct FakeScheduler {
    spawner: LocalSpawner,
    slots: Rc<RefCell<Vec<Slot>>>,
    /// 为 true 时模拟定时器创建失败
    broken: Rc<Cell<bool>>,
}

struct FakeInterval {
    live: Rc<Cell<bool>>,
}

impl Drop for FakeInterval {
    fn drop(&mut self) {
        self.live.set(false);
    }
}

impl FakeScheduler {
    fn live_count(&self) -> usize {
        self.slots.borrow().iter().filter(|s| s.live.get()).count()
    }

    fn live_periods(&self) -> Vec<Duration> {
        self.slots
            .borrow()
            .iter()
            .filter(|s| s.live.get())
            .map(|s| s.period)
            .collect()
    }

    fn fire(&self) {
        let ticks: Vec<Rc<dyn Fn()>> = self
            .slots
            .borrow()
            .iter()
            .filter(|s| s.live.get())
            .map(|s| Rc::clone(&s.tick))
            .collect();
        for tick in ticks {
            tick();
        }
    }
}

impl Scheduler for FakeScheduler {
    type Interval = FakeInterval;

    fn interval(&self, period: Duration, tick: Box<dyn Fn()>) -> Option<FakeInterval> {
        if self.broken.get() {
            return None;
        }
        let live = Rc::new(Cell::new(true));
        self.slots.borrow_mut().push(Slot {
            period,
            tick: Rc::from(tick),
            live: Rc::clone(&live),
        });
        Some(FakeInterval { live })
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).unwrap();
    }
}

// =========================================================
// Test Context
// =========================================================

const PERIOD: Duration = Duration::from_secs(600);

type TestController = SessionController<FakeScheduler, Rc<MockHttpClient>, MemorySession>;

struct TestContext {
    pool: LocalPool,
    scheduler: FakeScheduler,
    http: Rc<MockHttpClient>,
    session: MemorySession,
    controller: TestController,
}

impl TestContext {
    fn new() -> Self {
        let pool = LocalPool::new();
        let scheduler = FakeScheduler {
            spawner: pool.spawner(),
            slots: Rc::new(RefCell::new(Vec::new())),
            broken: Rc::new(Cell::new(false)),
        };
        let http = MockHttpClient::new();
        let session = MemorySession::new();
        let controller = SessionController::new(
            CatalogueApi::new("", Rc::clone(&http)),
            session.clone(),
            scheduler.clone(),
            PERIOD,
        );
        Self {
            pool,
            scheduler,
            http,
            session,
            controller,
        }
    }

    fn refresh_returns(&self, token: &str) {
        self.http.reply(
            HttpMethod::Get,
            "/refresh",
            200,
            &format!(r#"{{"access_token":"{}"}}"#, token),
        );
    }

    fn refresh_calls(&self) -> usize {
        self.http.count(HttpMethod::Get, "/refresh")
    }
}

// =========================================================
// Restore on mount
// =========================================================

#[test]
fn restore_stores_token_and_arms_timer() {
    let mut ctx = TestContext::new();
    ctx.refresh_returns("fresh-token");

    let restored = ctx.pool.run_until(ctx.controller.restore());

    assert!(restored);
    assert_eq!(ctx.session.token(), "fresh-token");
    assert!(ctx.controller.is_armed());
    assert_eq!(ctx.scheduler.live_periods(), vec![PERIOD]);
}

#[test]
fn restore_failure_leaves_session_logged_out_and_unarmed() {
    let mut ctx = TestContext::new();
    ctx.http.reply(
        HttpMethod::Get,
        "/refresh",
        401,
        r#"{"error":true,"message":"unauthorized"}"#,
    );

    let restored = ctx.pool.run_until(ctx.controller.restore());

    assert!(!restored);
    assert_eq!(ctx.session.token(), "");
    assert!(!ctx.controller.is_armed());
    assert_eq!(ctx.scheduler.live_count(), 0);
}

#[test]
fn restore_with_existing_token_does_not_call_backend() {
    let mut ctx = TestContext::new();
    ctx.session.set_token("held".into());

    assert!(ctx.pool.run_until(ctx.controller.restore()));
    assert_eq!(ctx.refresh_calls(), 0);
}

// =========================================================
// Recurring refresh
// =========================================================

#[test]
fn tick_replaces_token_on_success() {
    let mut ctx = TestContext::new();
    ctx.controller.start("first".into());
    ctx.refresh_returns("second");

    ctx.scheduler.fire();
    ctx.pool.run_until_stalled();

    assert_eq!(ctx.session.token(), "second");
    assert_eq!(ctx.refresh_calls(), 1);
}

#[test]
fn tick_failure_keeps_previous_token() {
    let mut ctx = TestContext::new();
    ctx.controller.start("still-valid".into());
    ctx.http.fail(HttpMethod::Get, "/refresh", "offline");

    ctx.scheduler.fire();
    ctx.pool.run_until_stalled();

    assert_eq!(ctx.session.token(), "still-valid");
    assert!(ctx.controller.is_armed());
}

#[test]
fn rearming_keeps_a_single_timer() {
    let mut ctx = TestContext::new();
    ctx.refresh_returns("t");

    ctx.controller.arm();
    ctx.controller.arm();
    ctx.controller.start("t0".into());

    assert_eq!(ctx.scheduler.live_count(), 1);

    ctx.scheduler.fire();
    ctx.pool.run_until_stalled();

    assert_eq!(ctx.refresh_calls(), 1);
}

#[test]
fn unavailable_timer_is_not_reported_as_armed() {
    let mut ctx = TestContext::new();
    ctx.scheduler.broken.set(true);
    ctx.refresh_returns("fresh-token");

    let restored = ctx.pool.run_until(ctx.controller.restore());

    assert!(restored);
    assert_eq!(ctx.session.token(), "fresh-token");
    assert!(!ctx.controller.is_armed());
    assert_eq!(ctx.scheduler.live_count(), 0);
}

#[test]
fn disarm_is_idempotent() {
    let ctx = TestContext::new();
    ctx.controller.arm();

    ctx.controller.disarm();
    ctx.controller.disarm();

    assert!(!ctx.controller.is_armed());
    assert_eq!(ctx.scheduler.live_count(), 0);
}

#[test]
fn dropping_the_controller_cancels_the_timer() {
    let ctx = TestContext::new();
    ctx.controller.arm();
    let scheduler = ctx.scheduler.clone();

    drop(ctx);

    assert_eq!(scheduler.live_count(), 0);
}

// =========================================================
// Login / Logout
// =========================================================

#[test]
fn login_stores_token_and_arms_timer() {
    let mut ctx = TestContext::new();
    ctx.http.reply(
        HttpMethod::Post,
        "/authenticate",
        202,
        r#"{"access_token":"jwt","refresh_token":"r"}"#,
    );

    ctx.pool
        .run_until(ctx.controller.login("admin@example.com", "secret"))
        .unwrap();

    assert_eq!(ctx.session.token(), "jwt");
    assert!(ctx.controller.is_armed());
    let sent = &ctx.http.requests()[0];
    assert!(sent.with_credentials);
    assert_eq!(
        sent.body.as_deref(),
        Some(r#"{"email":"admin@example.com","password":"secret"}"#)
    );
}

#[test]
fn failed_login_keeps_session_empty() {
    let mut ctx = TestContext::new();
    ctx.http.reply(
        HttpMethod::Post,
        "/authenticate",
        400,
        r#"{"error":true,"message":"invalid credentials"}"#,
    );

    let result = ctx.pool.run_until(ctx.controller.login("a@b.c", "nope"));

    assert!(result.is_err());
    assert_eq!(ctx.session.token(), "");
    assert!(!ctx.controller.is_armed());
}

#[test]
fn logout_clears_token_and_disarms() {
    let mut ctx = TestContext::new();
    ctx.controller.start("jwt".into());
    ctx.http.reply(HttpMethod::Get, "/logout", 202, "");

    ctx.pool.run_until(ctx.controller.logout());

    assert_eq!(ctx.session.token(), "");
    assert!(!ctx.controller.is_armed());
    assert_eq!(ctx.scheduler.live_count(), 0);
    assert_eq!(ctx.http.count(HttpMethod::Get, "/logout"), 1);
}

#[test]
fn logout_clears_even_when_backend_fails() {
    let mut ctx = TestContext::new();
    ctx.controller.start("jwt".into());
    ctx.http.fail(HttpMethod::Get, "/logout", "connection reset");

    ctx.pool.run_until(ctx.controller.logout());

    assert_eq!(ctx.session.token(), "");
    assert!(!ctx.controller.is_armed());
}

#[test]
fn refresh_in_flight_during_logout_is_discarded() {
    let mut ctx = TestContext::new();
    ctx.controller.start("jwt".into());
    ctx.http.reply(HttpMethod::Get, "/logout", 202, "");
    let gate = ctx.http.gate(HttpMethod::Get, "/refresh");

    ctx.scheduler.fire();
    ctx.pool.run_until_stalled();
    ctx.pool.run_until(ctx.controller.logout());

    gate.send(Reply::Respond(200, r#"{"access_token":"late"}"#.into()))
        .unwrap();
    ctx.pool.run_until_stalled();

    assert_eq!(ctx.session.token(), "");
    assert!(!ctx.controller.is_armed());
}

//! MovieWatch 客户端核心
//!
//! 与运行平台无关的部分，前端与原生测试共用：
//! - `request`: HTTP 抽象层，浏览器用 fetch 实现，原生用 reqwest 实现
//! - `api`: 目录后端的类型化客户端
//! - `session`: access token 与定时静默刷新
//! - `form` / `editor`: 电影表单模型与编辑流程
//! - `route`: 路由表与守卫规则
//! - `task`: 页面级任务作用域

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod request;
pub mod route;
pub mod session;
pub mod task;

pub use api::CatalogueApi;
pub use config::ClientConfig;
pub use editor::{EditorLoad, MovieEditor, SubmitOutcome};
pub use error::{ApiError, ApiResult};
pub use form::{Field, GenreCheck, MovieForm, Validation};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use route::AppRoute;
pub use session::{MemorySession, Scheduler, SessionController, SessionStore};
pub use task::TaskScope;

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

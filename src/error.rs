use thiserror::Error;

/// 调用后端 API 时可能出现的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求未能到达后端（断网、CORS、连接被拒绝等）
    #[error("network error: {0}")]
    Network(String),
    /// 非 2xx 且响应体不是后端的错误信封
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// 响应体无法解析
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// 后端通过 `{"error": true, "message": ...}` 报告的业务错误
    #[error("{0}")]
    Application(String),
    /// 需要 Bearer Token 的请求在未登录时发起
    #[error("not logged in")]
    Unauthenticated,
}

impl ApiError {
    /// 后端是否拒绝了当前凭据
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthenticated | ApiError::Status { status: 401 | 403, .. }
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

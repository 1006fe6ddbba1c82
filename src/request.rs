use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use std::rc::Rc;

pub use moviewatch_shared::protocol::HttpMethod;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// 是否携带 Cookie 等环境凭据 (`credentials: include`)
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
            with_credentials: false,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }

    /// 按名称查找请求头（大小写不敏感）
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 空响应体按 JSON `null` 解析，使 `()` 和 `Option<T>` 能直接接收
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(ApiError::from)
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器里 fetch 相关的类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for Rc<C> {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        (**self).send(req).await
    }
}

// =========================================================
// 实现层: reqwest 客户端 (原生平台)
// =========================================================

/// 非浏览器环境下的客户端，自带 Cookie 容器以支持刷新令牌
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Network(format!("Reqwest Build Error: {}", e)))?;
        Ok(Self { client })
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        // Cookie 容器对所有请求生效，with_credentials 在此无需区分
        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Reqwest Error: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Reqwest Body Error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试替身 (Mock)
// =========================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    #[derive(Debug, Clone)]
    pub enum Reply {
        Respond(u16, String),
        Fail(String),
    }

    type Route = (HttpMethod, String);

    /// 记录所有请求并按 (方法, 路径) 返回预设响应
    ///
    /// 测试中 API 的 base_url 为空，因此 url 即路径。
    #[derive(Default)]
    pub struct MockHttpClient {
        log: RefCell<Vec<HttpRequest>>,
        replies: RefCell<HashMap<Route, Reply>>,
        gates: RefCell<HashMap<Route, VecDeque<oneshot::Receiver<Reply>>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn reply(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
            self.replies.borrow_mut().insert(
                (method, path.to_string()),
                Reply::Respond(status, body.to_string()),
            );
        }

        pub fn fail(&self, method: HttpMethod, path: &str, message: &str) {
            self.replies
                .borrow_mut()
                .insert((method, path.to_string()), Reply::Fail(message.to_string()));
        }

        /// 下一次匹配的请求会挂起，直到测试通过返回的 Sender 给出响应
        pub fn gate(&self, method: HttpMethod, path: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates
                .borrow_mut()
                .entry((method, path.to_string()))
                .or_default()
                .push_back(rx);
            tx
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.log.borrow().clone()
        }

        pub fn count(&self, method: HttpMethod, path: &str) -> usize {
            self.log
                .borrow()
                .iter()
                .filter(|r| r.method == method && r.url == path)
                .count()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            let route = (req.method, req.url.clone());
            self.log.borrow_mut().push(req);

            let gate = self
                .gates
                .borrow_mut()
                .get_mut(&route)
                .and_then(|queue| queue.pop_front());

            let reply = match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Reply::Fail("gate dropped".to_string())),
                None => self.replies.borrow().get(&route).cloned().unwrap_or_else(|| {
                    Reply::Respond(404, r#"{"error":true,"message":"not found"}"#.to_string())
                }),
            };

            match reply {
                Reply::Respond(status, body) => Ok(HttpResponse { status, body }),
                Reply::Fail(message) => Err(ApiError::Network(message)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bodies_decode_as_null() {
        let resp = HttpResponse::new(202, "");
        assert_eq!(resp.json::<()>(), Ok(()));
        assert_eq!(resp.json::<Option<Vec<i32>>>(), Ok(None));
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::new("/movies", HttpMethod::Get).with_header("Authorization", "Bearer t");
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("Content-Type"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn reqwest_client_reports_refused_connections_as_network_errors() {
        // 绑定后立即释放，得到一个大概率无人监听的端口
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .map(|a| a.port())
            .unwrap();
        let client = ReqwestHttpClient::new().unwrap();
        let req = HttpRequest::new(&format!("http://127.0.0.1:{port}/refresh"), HttpMethod::Get);

        let err = client.send(req).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}

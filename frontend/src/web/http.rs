//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`，替代 `gloo-net`。

use moviewatch::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

fn js_error(context: &str, e: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", context, e))
}

/// 轻量级 fetch 客户端
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FetchClient;

impl FetchClient {
    fn build(req: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        // 刷新令牌放在 HttpOnly Cookie 里，需要跨域携带
        if req.with_credentials {
            opts.set_credentials(RequestCredentials::Include);
        }

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
    }

    async fn text(response: &Response) -> ApiResult<String> {
        let promise = response
            .text()
            .map_err(|e| js_error("failed to read body", e))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| js_error("failed to read body", e))?;

        text.as_string()
            .ok_or_else(|| ApiError::Decode("response body is not text".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = Self::build(&req).map_err(|e| js_error("failed to build request", e))?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no window object".to_string()))?;

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch failed", e))?;

        let response: Response = value
            .dyn_into()
            .map_err(|e| js_error("unexpected fetch result", e))?;

        let body = Self::text(&response).await?;
        Ok(HttpResponse::new(response.status(), body))
    }
}

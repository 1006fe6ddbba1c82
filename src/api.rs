use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use moviewatch_shared::protocol::{
    AdminMoviesRequest, ApiRequest, AuthMode, DeleteMovieRequest, GetMovieRequest, GraphQlRequest,
    ListGenresRequest, ListMoviesRequest, LogoutRequest, MovieForEditRequest, RefreshRequest,
    SaveMovieRequest,
};
use moviewatch_shared::{
    Credentials, Genre, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, JsonResponse, Movie,
    MovieForEdit, MovieId, MovieSummary, TokenPairs,
};

/// 电影目录后端的类型化客户端
///
/// 只负责把 `ApiRequest` 变成 HTTP 请求并解析响应，不持有会话状态；
/// Bearer Token 由调用方逐次传入。
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogueApi<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> CatalogueApi<C> {
    /// `base_url` 为空表示与页面同源，直接使用相对路径
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送任意请求
    ///
    /// `AuthMode::Bearer` 的请求在 token 为空时直接返回 `Unauthenticated`，不发出请求。
    pub async fn call<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> ApiResult<R::Response> {
        let mut http = HttpRequest::new(&self.url(&req.path()), req.method());

        match R::AUTH {
            AuthMode::Public => {}
            AuthMode::Cookie => http = http.with_credentials(),
            AuthMode::Bearer => {
                let token = token
                    .filter(|t| !t.is_empty())
                    .ok_or(ApiError::Unauthenticated)?;
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if let Some(body) = req.body()? {
            http = http
                .with_header(HEADER_CONTENT_TYPE, body.content_type)
                .with_body(body.text);
        }

        let resp = self.client.send(http).await?;
        decode(resp)
    }

    // ----- 会话 -----

    /// 用环境凭据（Cookie）静默换取新的 access token
    pub async fn refresh(&self) -> ApiResult<TokenPairs> {
        let pair = self.call(&RefreshRequest, None).await?;
        ensure_token(pair)
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.call(&LogoutRequest, None).await
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<TokenPairs> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let pair = self.call(&credentials, None).await?;
        ensure_token(pair)
    }

    // ----- 公开目录 -----

    pub async fn genres(&self) -> ApiResult<Vec<Genre>> {
        Ok(self.call(&ListGenresRequest, None).await?.unwrap_or_default())
    }

    pub async fn movies(&self) -> ApiResult<Vec<Movie>> {
        Ok(self.call(&ListMoviesRequest, None).await?.unwrap_or_default())
    }

    pub async fn movie(&self, id: MovieId) -> ApiResult<Movie> {
        self.call(&GetMovieRequest { id }, None).await
    }

    // ----- 管理（需要 Bearer Token） -----

    pub async fn admin_movies(&self, token: &str) -> ApiResult<Vec<Movie>> {
        Ok(self
            .call(&AdminMoviesRequest, Some(token))
            .await?
            .unwrap_or_default())
    }

    pub async fn movie_for_edit(&self, token: &str, id: MovieId) -> ApiResult<MovieForEdit> {
        self.call(&MovieForEditRequest { id }, Some(token)).await
    }

    /// 新增 (id 为 0) 或更新电影，返回后端的提示信息
    pub async fn save_movie(&self, token: &str, movie: &Movie) -> ApiResult<String> {
        let req = SaveMovieRequest {
            movie: movie.clone(),
        };
        let resp = self.call(&req, Some(token)).await?;
        acknowledge(resp)
    }

    pub async fn delete_movie(&self, token: &str, id: MovieId) -> ApiResult<String> {
        let resp = self.call(&DeleteMovieRequest { id }, Some(token)).await?;
        acknowledge(resp)
    }

    // ----- GraphQL -----

    pub async fn graphql_movies(&self, req: &GraphQlRequest) -> ApiResult<Vec<MovieSummary>> {
        let resp = self.call(req, None).await?;
        if let Some(first) = resp.errors.first() {
            return Err(ApiError::Application(first.message.clone()));
        }
        Ok(resp
            .data
            .and_then(|data| data.into_values().next())
            .flatten()
            .unwrap_or_default())
    }
}

// =========================================================
// 响应处理
// =========================================================

fn decode<T: serde::de::DeserializeOwned>(resp: HttpResponse) -> ApiResult<T> {
    if !resp.ok() {
        let envelope = resp.json::<JsonResponse>().ok().filter(|e| e.error);
        return Err(match envelope {
            // 401 / 403 保留状态码，调用方据此跳转登录页
            Some(envelope) if !matches!(resp.status, 401 | 403) => {
                ApiError::Application(envelope.message)
            }
            Some(envelope) => ApiError::Status {
                status: resp.status,
                message: envelope.message,
            },
            None => ApiError::Status {
                status: resp.status,
                message: resp.body.chars().take(200).collect(),
            },
        });
    }
    resp.json()
}

fn acknowledge(resp: JsonResponse) -> ApiResult<String> {
    if resp.error {
        Err(ApiError::Application(resp.message))
    } else {
        Ok(resp.message)
    }
}

fn ensure_token(pair: TokenPairs) -> ApiResult<TokenPairs> {
    if pair.access_token.is_empty() {
        return Err(ApiError::Application("no access token in response".to_string()));
    }
    Ok(pair)
}

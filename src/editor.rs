//! 电影编辑流程
//!
//! 把编辑页的三个动作（加载、提交、删除）收拢在一起，
//! 页面组件只负责渲染与导航。

use crate::api::CatalogueApi;
use crate::error::{ApiError, ApiResult};
use crate::form::{MovieForm, Validation};
use crate::request::HttpClient;
use moviewatch_shared::{MovieId, NEW_MOVIE_ID};


/// 编辑页挂载时的加载结果
#[derive(Debug, Clone, PartialEq)]
pub enum EditorLoad {
    /// 没有会话 token，应立即跳转登录页
    RedirectToLogin,
    Ready(MovieForm),
}

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 校验失败，未发出任何请求
    Invalid(Validation),
    /// 保存成功，附带后端提示
    Saved(String),
    /// 请求失败或后端报告了错误，应留在表单页
    Failed(ApiError),
}

pub struct MovieEditor<'a, C> {
    api: &'a CatalogueApi<C>,
    token: &'a str,
}

impl<'a, C: HttpClient> MovieEditor<'a, C> {
    pub fn new(api: &'a CatalogueApi<C>, token: &'a str) -> Self {
        Self { api, token }
    }

    /// ID 为 0 只加载类型列表；否则一次性加载记录与类型列表
    pub async fn load(&self, id: MovieId) -> ApiResult<EditorLoad> {
        if self.token.is_empty() {
            return Ok(EditorLoad::RedirectToLogin);
        }

        let form = if id == NEW_MOVIE_ID {
            let genres = self.api.genres().await?;
            MovieForm::new(&genres)
        } else {
            let loaded = self.api.movie_for_edit(self.token, id).await?;
            MovieForm::from_movie(&loaded.movie, &loaded.genres)
        };

        Ok(EditorLoad::Ready(form))
    }

    pub async fn submit(&self, form: &MovieForm) -> SubmitOutcome {
        let movie = match form.validate() {
            Ok(movie) => movie,
            Err(report) => return SubmitOutcome::Invalid(report),
        };

        match self.api.save_movie(self.token, &movie).await {
            Ok(message) => SubmitOutcome::Saved(message),
            Err(e) => {
                log::error!("failed to save movie {}: {}", movie.id, e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// 删除当前记录；确认对话框由调用方负责
    pub async fn delete(&self, id: MovieId) -> ApiResult<String> {
        self.api.delete_movie(self.token, id).await.inspect_err(|e| {
            log::error!("failed to delete movie {}: {}", id, e);
        })
    }
}

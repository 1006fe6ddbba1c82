//! 路由定义模块 - 领域模型
//!
//! 纯粹的路由表，不依赖于 DOM 或 web_sys，
//! 浏览器侧的 History 操作由前端的路由服务负责。

use moviewatch_shared::{MovieId, NEW_MOVIE_ID};
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    Movies,
    Movie(MovieId),
    Genres,
    /// 新增 (ID 为 0) 或编辑电影，需要认证
    EditMovie(MovieId),
    /// 管理目录，需要认证
    ManageCatalogue,
    GraphQl,
    Login,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段与末尾的 `/`；ID 段必须是非负整数。
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["movies"] => Self::Movies,
            ["movies", id] => parse_id(id).map_or(Self::NotFound, Self::Movie),
            ["genres"] => Self::Genres,
            ["admin", "movies", id] => parse_id(id).map_or(Self::NotFound, Self::EditMovie),
            ["manage-catalogue"] => Self::ManageCatalogue,
            ["graphql"] => Self::GraphQl,
            ["login"] => Self::Login,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Movies => "/movies".to_string(),
            Self::Movie(id) => format!("/movies/{}", id),
            Self::Genres => "/genres".to_string(),
            Self::EditMovie(id) => format!("/admin/movies/{}", id),
            Self::ManageCatalogue => "/manage-catalogue".to_string(),
            Self::GraphQl => "/graphql".to_string(),
            Self::Login => "/login".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// GraphQL 页只在导航里按登录状态显示，本身不做守卫。
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::EditMovie(_) | Self::ManageCatalogue)
    }

    /// 已认证用户访问登录页时应离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// 导航栏标题
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Movies => "Movies",
            Self::Movie(_) => "Movie",
            Self::Genres => "Genres",
            Self::EditMovie(NEW_MOVIE_ID) => "Add Movie",
            Self::EditMovie(_) => "Edit Movie",
            Self::ManageCatalogue => "Manage Catalogue",
            Self::GraphQl => "GraphQL",
            Self::Login => "Login",
            Self::NotFound => "Not Found",
        }
    }

    /// 导航栏条目：公开条目总是显示，管理条目只在持有 token 时显示
    pub fn nav_items(authenticated: bool) -> Vec<AppRoute> {
        let mut items = vec![Self::Home, Self::Movies, Self::Genres];
        if authenticated {
            items.extend([
                Self::EditMovie(NEW_MOVIE_ID),
                Self::ManageCatalogue,
                Self::GraphQl,
            ]);
        }
        items
    }
}

fn parse_id(segment: &str) -> Option<MovieId> {
    segment.parse::<MovieId>().ok().filter(|id| *id >= 0)
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        let cases = [
            ("/", AppRoute::Home),
            ("", AppRoute::Home),
            ("/movies", AppRoute::Movies),
            ("/movies/", AppRoute::Movies),
            ("/movies/12", AppRoute::Movie(12)),
            ("/genres", AppRoute::Genres),
            ("/admin/movies/0", AppRoute::EditMovie(0)),
            ("/admin/movies/7?tab=x", AppRoute::EditMovie(7)),
            ("/manage-catalogue", AppRoute::ManageCatalogue),
            ("/graphql", AppRoute::GraphQl),
            ("/login", AppRoute::Login),
        ];
        for (path, expected) in cases {
            assert_eq!(AppRoute::from_path(path), expected, "path {path:?}");
        }
    }

    #[test]
    fn unknown_or_malformed_paths_are_not_found() {
        for path in ["/nope", "/movies/abc", "/movies/-1", "/admin/movies", "/movies/1/2"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::NotFound, "path {path:?}");
        }
    }

    #[test]
    fn paths_parse_back_to_the_same_route() {
        for route in [
            AppRoute::Home,
            AppRoute::Movie(3),
            AppRoute::EditMovie(0),
            AppRoute::ManageCatalogue,
            AppRoute::GraphQl,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn admin_pages_require_a_token() {
        assert!(AppRoute::EditMovie(0).requires_auth());
        assert!(AppRoute::ManageCatalogue.requires_auth());
        assert!(!AppRoute::GraphQl.requires_auth());
        assert!(!AppRoute::Movies.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
    }

    #[test]
    fn admin_nav_items_follow_login_state() {
        let public = AppRoute::nav_items(false);
        assert_eq!(public, vec![AppRoute::Home, AppRoute::Movies, AppRoute::Genres]);

        let admin: Vec<&str> = AppRoute::nav_items(true).iter().map(AppRoute::label).collect();
        assert_eq!(
            admin,
            vec!["Home", "Movies", "Genres", "Add Movie", "Manage Catalogue", "GraphQL"]
        );
    }
}

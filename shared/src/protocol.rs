use crate::{
    CONTENT_TYPE_GRAPHQL, CONTENT_TYPE_JSON, Credentials, Genre, JsonResponse, Movie, MovieForEdit,
    MovieId, MovieSummary, NEW_MOVIE_ID, TokenPairs,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// How a request proves who is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No credentials at all.
    Public,
    /// Ambient credentials only (the refresh cookie), i.e. `credentials: include`.
    Cookie,
    /// `Authorization: Bearer <token>`.
    Bearer,
}

/// A request body together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub content_type: &'static str,
    pub text: String,
}

impl Body {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content_type: CONTENT_TYPE_JSON,
            text: serde_json::to_string(value)?,
        })
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// How the request is authenticated.
    const AUTH: AuthMode;

    /// The HTTP method. Most endpoints have a fixed one, saving a movie does not.
    fn method(&self) -> HttpMethod;

    /// The URL path, with any identifiers filled in.
    fn path(&self) -> String;

    fn body(&self) -> Result<Option<Body>, serde_json::Error> {
        Ok(None)
    }
}

// =========================================================
// Session
// =========================================================

/// Exchange the refresh cookie for a new access token.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshRequest;

impl ApiRequest for RefreshRequest {
    type Response = TokenPairs;
    const AUTH: AuthMode = AuthMode::Cookie;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/refresh".into()
    }
}

/// Invalidate the refresh cookie. The backend answers with an empty body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = ();
    const AUTH: AuthMode = AuthMode::Cookie;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/logout".into()
    }
}

impl ApiRequest for Credentials {
    type Response = TokenPairs;
    const AUTH: AuthMode = AuthMode::Cookie;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "/authenticate".into()
    }

    fn body(&self) -> Result<Option<Body>, serde_json::Error> {
        Body::json(self).map(Some)
    }
}

// =========================================================
// Public catalogue
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListGenresRequest;

impl ApiRequest for ListGenresRequest {
    type Response = Option<Vec<Genre>>;
    const AUTH: AuthMode = AuthMode::Public;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/genres".into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListMoviesRequest;

impl ApiRequest for ListMoviesRequest {
    type Response = Option<Vec<Movie>>;
    const AUTH: AuthMode = AuthMode::Public;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/movies".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetMovieRequest {
    pub id: MovieId,
}

impl ApiRequest for GetMovieRequest {
    type Response = Movie;
    const AUTH: AuthMode = AuthMode::Public;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/movies/{}", self.id)
    }
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct AdminMoviesRequest;

impl ApiRequest for AdminMoviesRequest {
    type Response = Option<Vec<Movie>>;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "/admin/movies".into()
    }
}

/// Load one movie together with every genre, for the edit form.
#[derive(Debug, Clone, Copy)]
pub struct MovieForEditRequest {
    pub id: MovieId,
}

impl ApiRequest for MovieForEditRequest {
    type Response = MovieForEdit;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("/admin/movies/{}", self.id)
    }
}

/// Create (id 0, PUT) or update (PATCH) a movie. The body is the full record.
#[derive(Debug, Clone)]
pub struct SaveMovieRequest {
    pub movie: Movie,
}

impl ApiRequest for SaveMovieRequest {
    type Response = JsonResponse;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn method(&self) -> HttpMethod {
        if self.movie.id == NEW_MOVIE_ID {
            HttpMethod::Put
        } else {
            HttpMethod::Patch
        }
    }

    fn path(&self) -> String {
        format!("/admin/movies/{}", self.movie.id)
    }

    fn body(&self) -> Result<Option<Body>, serde_json::Error> {
        Body::json(&self.movie).map(Some)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeleteMovieRequest {
    pub id: MovieId,
}

impl ApiRequest for DeleteMovieRequest {
    type Response = JsonResponse;
    const AUTH: AuthMode = AuthMode::Bearer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("/admin/movies/{}", self.id)
    }
}

// =========================================================
// GraphQL
// =========================================================

const GRAPHQL_FIELDS: &str = "id title runtime release_date mpaa_rating";

/// Search terms shorter than this list the whole catalogue instead.
pub const GRAPHQL_MIN_SEARCH_LEN: usize = 3;

/// A raw GraphQL query posted as `application/graphql`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlRequest {
    pub query: String,
}

impl GraphQlRequest {
    pub fn list() -> Self {
        Self {
            query: format!("{{ list {{ {GRAPHQL_FIELDS} }} }}"),
        }
    }

    pub fn search(term: &str) -> Self {
        let escaped = term.replace('\\', "\\\\").replace('"', "\\\"");
        Self {
            query: format!("{{ search(titleContains: \"{escaped}\") {{ {GRAPHQL_FIELDS} }} }}"),
        }
    }

    /// Search when the term is long enough, otherwise list everything.
    pub fn for_term(term: &str) -> Self {
        let term = term.trim();
        if term.chars().count() >= GRAPHQL_MIN_SEARCH_LEN {
            Self::search(term)
        } else {
            Self::list()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` maps the query's root field (`list` or `search`) to its movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<BTreeMap<String, Option<Vec<MovieSummary>>>>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl ApiRequest for GraphQlRequest {
    type Response = GraphQlResponse;
    const AUTH: AuthMode = AuthMode::Public;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "/graphql".into()
    }

    fn body(&self) -> Result<Option<Body>, serde_json::Error> {
        Ok(Some(Body {
            content_type: CONTENT_TYPE_GRAPHQL,
            text: self.query.clone(),
        }))
    }
}

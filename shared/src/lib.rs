use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;

pub use date::ReleaseDate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_GRAPHQL: &str = "application/graphql";

/// 新建电影时使用的 ID，后端据此区分新增与更新
pub const NEW_MOVIE_ID: MovieId = 0;

pub type MovieId = i32;
pub type GenreId = i32;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 分级 (MPAA rating)，即编辑表单下拉框的全部选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MpaaRating {
    #[serde(rename = "G")]
    G,
    #[serde(rename = "PG")]
    Pg,
    #[serde(rename = "PG13")]
    Pg13,
    #[serde(rename = "R")]
    R,
    #[serde(rename = "NC17")]
    Nc17,
    #[serde(rename = "18A")]
    Adult18,
}

impl MpaaRating {
    pub const ALL: [MpaaRating; 6] = [
        MpaaRating::G,
        MpaaRating::Pg,
        MpaaRating::Pg13,
        MpaaRating::R,
        MpaaRating::Nc17,
        MpaaRating::Adult18,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MpaaRating::G => "G",
            MpaaRating::Pg => "PG",
            MpaaRating::Pg13 => "PG13",
            MpaaRating::R => "R",
            MpaaRating::Nc17 => "NC17",
            MpaaRating::Adult18 => "18A",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub genre: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: MovieId,
    pub title: String,
    pub release_date: ReleaseDate,
    pub runtime: i32,
    pub mpaa_rating: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    // 后端对空切片输出 null
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(
        rename = "genres_array",
        default,
        deserialize_with = "null_as_default"
    )]
    pub genre_ids: Vec<GenreId>,
}

impl Movie {
    /// 电影关联的类型 ID
    ///
    /// 优先使用 `genres_array`，后端未填充时退回到内嵌的 `genres` 对象列表。
    pub fn selected_genre_ids(&self) -> Vec<GenreId> {
        if !self.genre_ids.is_empty() {
            return self.genre_ids.clone();
        }
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_MOVIE_ID
    }
}

/// 编辑页加载结果：电影记录与全部类型一起返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieForEdit {
    pub movie: Movie,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

/// GraphQL 查询返回的电影摘要（字段由查询决定，均可缺省）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub mpaa_rating: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// =========================================================
// 认证与通用响应 (Auth & Envelope)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPairs {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// 后端统一的 JSON 信封，`error == true` 表示业务错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JsonResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_tolerates_null_lists_from_backend() {
        let json = r#"{
            "id": 3,
            "title": "Highlander",
            "release_date": "1986-03-07T00:00:00Z",
            "runtime": 116,
            "mpaa_rating": "R",
            "description": "He fought his first battle on the Scottish Highlands in 1536.",
            "image": null,
            "genres": null,
            "genres_array": null
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 3);
        assert!(movie.image.is_empty());
        assert!(movie.genres.is_empty());
        assert!(movie.selected_genre_ids().is_empty());
        assert_eq!(movie.release_date.to_string(), "1986-03-07");
    }

    #[test]
    fn non_ascii_release_date_is_a_decode_error() {
        let json = r#"{
            "id": 4,
            "title": "Amélie",
            "release_date": "1981-06-1éT00",
            "runtime": 122,
            "mpaa_rating": "R",
            "description": ""
        }"#;

        let err = serde_json::from_str::<Movie>(json).unwrap_err();
        assert!(err.to_string().contains("invalid release date"));
    }

    #[test]
    fn selected_genres_fall_back_to_embedded_objects() {
        let json = r#"{
            "id": 1,
            "title": "Raiders of the Lost Ark",
            "release_date": "1981-06-12T00:00:00Z",
            "runtime": 115,
            "mpaa_rating": "PG-13",
            "description": "Archaeology professor Indiana Jones ventures to seize a biblical artefact.",
            "genres": [{"id": 2, "genre": "Adventure"}, {"id": 5, "genre": "Action"}]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.selected_genre_ids(), vec![2, 5]);
    }

    #[test]
    fn movie_serializes_backend_field_names() {
        let movie = Movie {
            id: 0,
            title: "Heat".into(),
            release_date: ReleaseDate::parse("1995-12-15").unwrap(),
            runtime: 170,
            mpaa_rating: MpaaRating::R.as_str().into(),
            description: "A group of high-end professional thieves.".into(),
            image: String::new(),
            genres: Vec::new(),
            genre_ids: vec![5, 7],
        };

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["release_date"], "1995-12-15T00:00:00Z");
        assert_eq!(value["runtime"], 170);
        assert_eq!(value["genres_array"], serde_json::json!([5, 7]));
        assert!(value.get("genre_ids").is_none());
    }

    #[test]
    fn rating_options_round_trip_through_their_labels() {
        for rating in MpaaRating::ALL {
            assert_eq!(MpaaRating::parse(rating.as_str()), Some(rating));
        }
        assert_eq!(MpaaRating::parse("X"), None);
    }
}

//! 电影表单模型
//!
//! 新增与编辑共用同一份表单状态。所有输入保持为字符串，
//! 只在提交时整体校验并转换为后端的 `Movie` 记录。

use moviewatch_shared::{Genre, GenreId, Movie, MovieId, NEW_MOVIE_ID, ReleaseDate};

/// 表单字段；`as_str` 即错误列表里的字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    ReleaseDate,
    Runtime,
    Description,
    MpaaRating,
    Genres,
}

impl Field {
    /// 必填的文本字段，按校验顺序排列
    pub const REQUIRED: [Field; 5] = [
        Field::Title,
        Field::ReleaseDate,
        Field::Runtime,
        Field::Description,
        Field::MpaaRating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::ReleaseDate => "release_date",
            Field::Runtime => "runtime",
            Field::Description => "description",
            Field::MpaaRating => "mpaa_rating",
            Field::Genres => "genres",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Field::Title => "Please enter a title",
            Field::ReleaseDate => "Please enter a release date",
            Field::Runtime => "Please enter a runtime",
            Field::Description => "Please enter a description",
            Field::MpaaRating => "Please choose",
            Field::Genres => "You must choose at least one genre",
        }
    }
}

/// 类型勾选列表的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCheck {
    pub id: GenreId,
    pub genre: String,
    pub checked: bool,
}

/// 由全部类型与已选 ID 推导勾选列表
pub fn genre_checklist(genres: &[Genre], selected: &[GenreId]) -> Vec<GenreCheck> {
    genres
        .iter()
        .map(|g| GenreCheck {
            id: g.id,
            genre: g.genre.clone(),
            checked: selected.contains(&g.id),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(MovieId),
}

/// 一次提交的校验结果，失败字段按固定顺序排列
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub errors: Vec<Field>,
}

impl Validation {
    pub fn has(&self, field: Field) -> bool {
        self.errors.contains(&field)
    }

    /// 是否需要弹出"至少选择一个类型"的对话框
    pub fn needs_genre_prompt(&self) -> bool {
        self.has(Field::Genres)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.errors.iter().map(Field::as_str).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieForm {
    pub id: MovieId,
    pub title: String,
    pub release_date: String,
    pub runtime: String,
    pub mpaa_rating: String,
    pub description: String,
    pub genres: Vec<GenreCheck>,
}

impl MovieForm {
    /// 空白的新增表单
    pub fn new(genres: &[Genre]) -> Self {
        Self {
            id: NEW_MOVIE_ID,
            genres: genre_checklist(genres, &[]),
            ..Self::default()
        }
    }

    /// 用已有记录回填表单
    pub fn from_movie(movie: &Movie, genres: &[Genre]) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date.to_input_value(),
            runtime: movie.runtime.to_string(),
            mpaa_rating: movie.mpaa_rating.clone(),
            description: movie.description.clone(),
            genres: genre_checklist(genres, &movie.selected_genre_ids()),
        }
    }

    pub fn mode(&self) -> SubmitMode {
        if self.id == NEW_MOVIE_ID {
            SubmitMode::Create
        } else {
            SubmitMode::Update(self.id)
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::ReleaseDate => &self.release_date,
            Field::Runtime => &self.runtime,
            Field::Description => &self.description,
            Field::MpaaRating => &self.mpaa_rating,
            Field::Genres => "",
        }
    }

    /// 更新文本字段；类型通过 `toggle_genre` 修改
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::ReleaseDate => self.release_date = value,
            Field::Runtime => self.runtime = value,
            Field::Description => self.description = value,
            Field::MpaaRating => self.mpaa_rating = value,
            Field::Genres => {}
        }
    }

    pub fn toggle_genre(&mut self, id: GenreId, checked: bool) {
        if let Some(entry) = self.genres.iter_mut().find(|g| g.id == id) {
            entry.checked = checked;
        }
    }

    pub fn is_checked(&self, id: GenreId) -> bool {
        self.genres.iter().any(|g| g.id == id && g.checked)
    }

    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres
            .iter()
            .filter(|g| g.checked)
            .map(|g| g.id)
            .collect()
    }

    /// 整体校验并转换为后端记录
    ///
    /// 空字段只报告为缺失；非空但无法解析的日期或时长同样记在对应字段下。
    pub fn validate(&self) -> Result<Movie, Validation> {
        let mut errors: Vec<Field> = Field::REQUIRED
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect();

        let release_date = ReleaseDate::parse_input(&self.release_date);
        if release_date.is_none() && !errors.contains(&Field::ReleaseDate) {
            errors.push(Field::ReleaseDate);
        }

        let runtime = self.runtime.trim().parse::<i32>().ok().filter(|r| *r >= 0);
        if runtime.is_none() && !errors.contains(&Field::Runtime) {
            errors.push(Field::Runtime);
        }

        let genre_ids = self.genre_ids();
        if genre_ids.is_empty() {
            errors.push(Field::Genres);
        }

        match (release_date, runtime) {
            (Some(release_date), Some(runtime)) if errors.is_empty() => Ok(Movie {
                id: self.id,
                title: self.title.trim().to_string(),
                release_date,
                runtime,
                mpaa_rating: self.mpaa_rating.clone(),
                description: self.description.trim().to_string(),
                image: String::new(),
                genres: Vec::new(),
                genre_ids,
            }),
            _ => {
                errors.sort_by_key(order);
                Err(Validation { errors })
            }
        }
    }
}

fn order(field: &Field) -> usize {
    match field {
        Field::Title => 0,
        Field::ReleaseDate => 1,
        Field::Runtime => 2,
        Field::Description => 3,
        Field::MpaaRating => 4,
        Field::Genres => 5,
    }
}

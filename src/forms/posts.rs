use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::post::{NewPost, Post};
use crate::domain::types::{CategoryId, PostContent, PostId, PostTitle};
use crate::forms::{
    CATEGORY_ID, CATEGORY_REQUIRED, CONTENT, CONTENT_REQUIRED, FieldErrors, PUBLICATION_DATE,
    PUBLICATION_DATE_INVALID, PUBLICATION_DATE_REQUIRED, TITLE, TITLE_REQUIRED,
};

/// Format used to render dates into `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields a post create or update carries, whatever surface it came from.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct PostInput {
    /// Zero for creates.
    pub id: i32,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(required(message = "Category is required"))]
    pub category_id: Option<i32>,
    #[validate(required(message = "Publication date is required"))]
    pub publication_date: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Validated post fields, ready to be staged.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPayload {
    pub title: PostTitle,
    pub category_id: CategoryId,
    pub publication_date: NaiveDate,
    pub content: PostContent,
}

impl PostPayload {
    pub fn into_new_post(self) -> NewPost {
        NewPost {
            title: self.title,
            category_id: self.category_id,
            publication_date: self.publication_date,
            content: self.content,
        }
    }

    pub fn into_post(self, id: PostId) -> Post {
        self.into_new_post().into_post(id)
    }
}

/// Accepts `YYYY-MM-DD`, a local timestamp `YYYY-MM-DDTHH:MM:SS[.fff]`
/// or an RFC 3339 timestamp. Only the date part is kept.
pub fn parse_publication_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
}

impl TryFrom<PostInput> for PostPayload {
    type Error = FieldErrors;

    fn try_from(value: PostInput) -> Result<Self, Self::Error> {
        let mut errors = value
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();

        let title = errors.check(TITLE, TITLE_REQUIRED, PostTitle::new(value.title));
        let category_id = match value.category_id {
            Some(id) => errors.check(CATEGORY_ID, CATEGORY_REQUIRED, CategoryId::new(id)),
            None => None,
        };
        let publication_date = match value.publication_date.as_deref().map(str::trim) {
            Some("") => {
                errors.add(PUBLICATION_DATE, PUBLICATION_DATE_REQUIRED);
                None
            }
            Some(raw) => errors.check(
                PUBLICATION_DATE,
                PUBLICATION_DATE_INVALID,
                parse_publication_date(raw),
            ),
            None => None,
        };
        let content = errors.check(CONTENT, CONTENT_REQUIRED, PostContent::new(value.content));

        match (title, category_id, publication_date, content) {
            (Some(title), Some(category_id), Some(publication_date), Some(content))
                if errors.is_empty() =>
            {
                Ok(Self {
                    title,
                    category_id,
                    publication_date,
                    content,
                })
            }
            _ => Err(errors),
        }
    }
}

fn blank_to_none(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `POST /Post/Create`. Select and date inputs arrive as raw strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddPostForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub content: String,
}

impl From<AddPostForm> for PostInput {
    fn from(value: AddPostForm) -> Self {
        Self {
            id: 0,
            title: value.title,
            category_id: value.category_id.trim().parse().ok(),
            publication_date: blank_to_none(value.publication_date),
            content: value.content,
        }
    }
}

/// `POST /Post/Edit/{id}`. The hidden `id` must match the route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EditPostForm {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub content: String,
}

impl EditPostForm {
    pub fn selected_category(&self) -> Option<i32> {
        self.category_id.trim().parse().ok()
    }
}

impl AddPostForm {
    pub fn selected_category(&self) -> Option<i32> {
        self.category_id.trim().parse().ok()
    }
}

impl From<EditPostForm> for PostInput {
    fn from(value: EditPostForm) -> Self {
        Self {
            id: value.id,
            title: value.title,
            category_id: value.category_id.trim().parse().ok(),
            publication_date: blank_to_none(value.publication_date),
            content: value.content,
        }
    }
}

impl From<&Post> for EditPostForm {
    fn from(value: &Post) -> Self {
        Self {
            csrf_token: String::new(),
            id: value.id.get(),
            title: value.title.as_str().to_string(),
            category_id: value.category_id.to_string(),
            publication_date: value.publication_date.format(DATE_FORMAT).to_string(),
            content: value.content.as_str().to_string(),
        }
    }
}

/// `POST /Post/DeleteConfirmed/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeletePostForm {
    #[serde(default)]
    pub csrf_token: String,
}

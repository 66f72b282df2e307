use postboard_types::{
    guard::check_post_content,
    post::{Category, CreatePostRequest, Post},
    validation::{Field, ValidationError},
};

/// Editable post fields as typed by the user. Tags are one comma-separated string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
    pub category: Category,
    pub tags: String,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            category: post.category,
            tags: post.tags.join(", "),
        }
    }

    pub fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Required fields first, then the forbidden-word scan (title before body).
    pub fn validate(&self) -> Result<CreatePostRequest, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::Title));
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::Body));
        }
        check_post_content(&self.title, &self.body)?;
        Ok(CreatePostRequest {
            title: self.title.clone(),
            body: self.body.clone(),
            category: self.category,
            tags: self.parsed_tags(),
        })
    }
}

use std::fmt::{Display, Formatter};

/// A form field that can fail local validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Title,
    Body,
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::Title => "title",
            Field::Body => "body",
        })
    }
}

/// Errors detected before any request is sent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("{field} contains the forbidden word \"{word}\"")]
    ForbiddenWord { field: Field, word: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::ForbiddenWord { field, .. } => *field,
        }
    }
}

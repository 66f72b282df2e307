use postboard_types::validation::ValidationError;

use super::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to load posts: {0}")]
    ListLoad(#[source] postboard_api::Error),

    #[error("Action failed: {0}")]
    Action(#[source] postboard_api::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Message shown when a list fetch fails with `err`.
pub fn list_load_message(err: &postboard_api::Error) -> String {
    match err {
        postboard_api::Error::Unauthorized => SESSION_EXPIRED.to_string(),
        _ => "Failed to load posts.".to_string(),
    }
}

/// Message shown when a create, update or delete fails with `err`.
pub fn action_message(err: &postboard_api::Error) -> String {
    match err {
        postboard_api::Error::Unauthorized => SESSION_EXPIRED.to_string(),
        _ => "The request failed. Please try again.".to_string(),
    }
}

impl Error {
    /// Message for the presentation layer. Remote details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Error::ListLoad(e) => list_load_message(e),
            Error::Action(e) => action_message(e),
            Error::Validation(e) => e.to_string(),
            Error::Store(_) => "Could not save preferences.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_api::Error as ApiError;

    fn server_error() -> ApiError {
        ApiError::Status {
            code: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_user_messages_hide_remote_details() {
        let list = Error::ListLoad(server_error());
        assert_eq!(list.user_message(), "Failed to load posts.");
        let action = Error::Action(server_error());
        assert_eq!(action.user_message(), "The request failed. Please try again.");
        assert!(!action.user_message().contains("boom"));
    }

    #[test]
    fn test_unauthorized_asks_for_login() {
        assert_eq!(Error::ListLoad(ApiError::Unauthorized).user_message(), SESSION_EXPIRED);
        assert_eq!(Error::Action(ApiError::Unauthorized).user_message(), SESSION_EXPIRED);
    }
}

use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body: `name` is the error family, `message` a code-style string
/// such as `product.not_found`.
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// One violated field constraint, serialized inside a `detail` list.
/// `url` is only present on `string_too_short` items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: String,
    pub ctx: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

const STRING_TOO_SHORT_URL: &str = "https://errors.pydantic.dev/2.5/v/string_too_short";

impl FieldViolation {
    /// Violation for an empty field value (minimum length is 1).
    pub fn string_too_short(field: &str, input: &str) -> Self {
        Self {
            kind: "string_too_short".to_string(),
            loc: vec!["body".to_string(), field.to_string()],
            msg: "String should have at least 1 character".to_string(),
            input: input.to_string(),
            ctx: json!({ "min_length": 1 }),
            url: Some(STRING_TOO_SHORT_URL.to_string()),
        }
    }

    /// Violation for a value that fails the email-address grammar.
    pub fn invalid_email(input: &str, reason: &str) -> Self {
        Self {
            kind: "value_error".to_string(),
            loc: vec!["body".to_string(), "email".to_string()],
            msg: format!("value is not a valid email address: {}", reason),
            input: input.to_string(),
            ctx: json!({ "reason": reason }),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Engine-level rule violated; serialized as a plain `detail` message.
    Validation(String),
    /// Field-grammar violation(s); serialized as a `detail` list.
    Invalid(Vec<FieldViolation>),
    NotFound(String),
    Database(String),
}

impl AppError {
    /// Payload placed under the `detail` key - one serialization rule per variant.
    pub fn detail(&self) -> Value {
        match self {
            AppError::Validation(msg) => json!(msg),
            AppError::Invalid(violations) => json!(violations),
            AppError::NotFound(msg) => json!(msg),
            AppError::Database(msg) => json!(format!("Database error: {}", msg)),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Invalid(violations) => {
                let fields: Vec<&str> = violations
                    .iter()
                    .filter_map(|v| v.loc.last().map(String::as_str))
                    .collect();
                write!(f, "Validation error: invalid value for {}", fields.join(", "))
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.detail() }))
    }
}

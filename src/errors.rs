use std::fmt;

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found (the API answered 404).
    NotFound(String),
    /// The API rejected the request (400 or 422).
    BadRequest(String),
    /// Any other non-2xx answer from the API.
    ApiStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },
    /// Transport failure or an undecodable response.
    ExternalApiError(String),
    /// Client-side validation failure (form or upload input).
    Validation(String),
    /// Local file I/O failure.
    Io(std::io::Error),
    /// Internal error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ApiStatus { status, body } => {
                if body.is_empty() {
                    write!(f, "API returned {}", status)
                } else {
                    write!(f, "API returned {}: {}", status, body)
                }
            }
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::WithContext { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl AppError {
    /// Maps a non-success status and its body onto the matching variant.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            404 => AppError::NotFound(body),
            400 | 422 => AppError::BadRequest(body),
            code => AppError::ApiStatus { status: code, body },
        }
    }

    /// HTTP status of the failed call, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::NotFound(_) => Some(404),
            AppError::ApiStatus { status, .. } => Some(*status),
            AppError::WithContext { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Human-readable message the server sent back, if any.
    ///
    /// JSON bodies are searched for a `message`, then a `title` (ASP.NET
    /// problem details), then an `error` string. A plain-text body is
    /// returned as-is.
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            AppError::NotFound(body) | AppError::BadRequest(body) => body,
            AppError::ApiStatus { body, .. } => body,
            AppError::WithContext { source, .. } => return source.server_message(),
            _ => return None,
        };

        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }

        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::String(s)) => Some(s),
            Ok(value) => ["message", "title", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
                .map(str::to_string),
            Err(_) => Some(trimmed.to_string()),
        }
    }

    /// Message the server sent in a JSON `message` field, and nothing else.
    pub fn message_field(&self) -> Option<String> {
        let body = match self {
            AppError::NotFound(body) | AppError::BadRequest(body) => body,
            AppError::ApiStatus { body, .. } => body,
            AppError::WithContext { source, .. } => return source.message_field(),
            _ => return None,
        };

        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

/// Extension for `std::io::Error` to add context
impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Io(e)),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::Io(e)),
            context: f(),
        })
    }
}

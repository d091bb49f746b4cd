use std::fmt;

/// Enum representing the different types of errors the dashboard can produce.
///
/// ### Error Codes:
/// - **100–199**: Access token errors (`map::token`, provider token checks).
/// - **200–299**: Map widget initialization errors (`map::loader`, `map::panel`).
/// - **300–399**: Marker placement errors (`map::markers`, surfaces).
/// - **400–499**: Configuration errors (`config`).
/// - **600–699**: Errors in the `ui` module and application startup.
///
/// Each error carries:
/// - `code` (`i32`): The unique error code.
/// - `message` (`String`): A detailed error message.
#[derive(Clone, PartialEq)]
pub enum ErrorTypes {
    /// The token is empty or was rejected by the provider. The user can fix it.
    InvalidToken { code: i32, message: String },
    /// The map widget could not be created or did not finish loading.
    WidgetInitFailure { code: i32, message: String },
    /// A single marker could not be placed on the map.
    MarkerSyncFailure { code: i32, message: String },
    /// Any other error, identified by its code.
    Error { code: i32, message: String },
}

impl ErrorTypes {
    /// Creates a new `ErrorTypes::Error` instance.
    ///
    /// # Arguments:
    /// - `code`: The error code associated with this error.
    /// - `message`: A descriptive message explaining the error.
    pub fn new(code: i32, message: String) -> Self {
        ErrorTypes::Error { code, message }
    }

    pub fn invalid_token(code: i32, message: String) -> Self {
        ErrorTypes::InvalidToken { code, message }
    }

    pub fn widget_init(code: i32, message: String) -> Self {
        ErrorTypes::WidgetInitFailure { code, message }
    }

    pub fn marker_sync(code: i32, message: String) -> Self {
        ErrorTypes::MarkerSyncFailure { code, message }
    }

    /// Retrieves the code and message of the error.
    ///
    /// # Returns:
    /// A tuple containing the error code (`i32`) and the error message (`String`).
    pub fn get(&self) -> (i32, String) {
        match self {
            ErrorTypes::InvalidToken { code, message }
            | ErrorTypes::WidgetInitFailure { code, message }
            | ErrorTypes::MarkerSyncFailure { code, message }
            | ErrorTypes::Error { code, message } => (*code, message.clone()),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ErrorTypes::InvalidToken { code, .. }
            | ErrorTypes::WidgetInitFailure { code, .. }
            | ErrorTypes::MarkerSyncFailure { code, .. }
            | ErrorTypes::Error { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ErrorTypes::InvalidToken { message, .. }
            | ErrorTypes::WidgetInitFailure { message, .. }
            | ErrorTypes::MarkerSyncFailure { message, .. }
            | ErrorTypes::Error { message, .. } => message,
        }
    }

    /// Whether the token form should be offered again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorTypes::InvalidToken { .. } | ErrorTypes::WidgetInitFailure { .. }
        )
    }
}

impl fmt::Debug for ErrorTypes {
    /// Formats the error information for debugging purposes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ErrorTypes::InvalidToken { .. } => "InvalidToken",
            ErrorTypes::WidgetInitFailure { .. } => "WidgetInitFailure",
            ErrorTypes::MarkerSyncFailure { .. } => "MarkerSyncFailure",
            ErrorTypes::Error { .. } => "Error",
        };
        write!(
            f,
            "An error has occured ({}): {:?}, code: [{:?}]",
            kind,
            self.message(),
            self.code()
        )
    }
}

impl fmt::Display for ErrorTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for ErrorTypes {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_returns_code_and_message() {
        let error = ErrorTypes::marker_sync(301, "Bad latitude".to_string());
        assert_eq!(error.get(), (301, "Bad latitude".to_string()));
    }

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorTypes::invalid_token(100, String::new()).is_retryable());
        assert!(ErrorTypes::widget_init(200, String::new()).is_retryable());
        assert!(!ErrorTypes::marker_sync(300, String::new()).is_retryable());
        assert!(!ErrorTypes::new(400, String::new()).is_retryable());
    }

    #[test]
    fn test_display_includes_code() {
        let error = ErrorTypes::widget_init(204, "Map load timed out".to_string());
        assert_eq!(error.to_string(), "Map load timed out (code 204)");
    }
}

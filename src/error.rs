use crate::models::EntityType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to fetch data from API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request not found (404): {url}")]
    NotFound { url: String },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API returned malformed JSON: {message} (URL: {url})")]
    MalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    UnexpectedStructure { message: String, url: String },

    #[error("No {} matched the name {name:?}", .entity.as_str())]
    NoMatch { entity: EntityType, name: String },

    #[error("Matched {} record for {name:?} has no {field} field", .entity.as_str())]
    MissingIdentifier {
        entity: EntityType,
        name: String,
        field: &'static str,
    },

    #[error("Unknown league: {value:?}")]
    UnknownLeague { value: String },

    #[error("Unknown entity type: {value:?}")]
    UnknownEntityType { value: String },

    #[error("League list must not be empty")]
    EmptyLeagues,
}

impl ApiError {
    /// Create a 404 error
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Create a client error (4xx status codes except 404)
    pub fn client_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a server error (5xx status codes)
    pub fn server_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a failed-resolution error for a name that cleared no candidate
    pub fn no_match(entity: EntityType, name: impl Into<String>) -> Self {
        Self::NoMatch {
            entity,
            name: name.into(),
        }
    }

    /// The HTTP status code behind a transport failure, if there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::ClientError { status, .. } | ApiError::ServerError { status, .. } => {
                Some(*status)
            }
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this is a fuzzy-resolution failure rather than a transport one
    pub fn is_no_match(&self) -> bool {
        matches!(self, ApiError::NoMatch { .. })
    }

    /// Whether this failure was caused by an argument outside the recognized
    /// enumerations, as opposed to anything the API did
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ApiError::UnknownLeague { .. }
                | ApiError::UnknownEntityType { .. }
                | ApiError::EmptyLeagues
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let error = ApiError::not_found("https://api.example.com/v1/mls/players");
        assert!(matches!(error, ApiError::NotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/v1/mls/players"
        );
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_client_error_helper() {
        let error = ApiError::client_error(400, "Bad Request", "https://api.example.com");
        assert!(matches!(error, ApiError::ClientError { .. }));
        assert_eq!(
            error.to_string(),
            "API client error (400): Bad Request (URL: https://api.example.com)"
        );
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn test_server_error_helper() {
        let error = ApiError::server_error(500, "Internal Server Error", "https://api.example.com");
        assert!(matches!(error, ApiError::ServerError { .. }));
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_no_match_display_names_the_query() {
        let error = ApiError::no_match(EntityType::Player, "Zlatan");
        assert_eq!(error.to_string(), "No player matched the name \"Zlatan\"");
        assert!(error.is_no_match());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_invalid_argument_classification() {
        assert!(
            ApiError::UnknownLeague {
                value: "epl".to_string()
            }
            .is_invalid_argument()
        );
        assert!(
            ApiError::UnknownEntityType {
                value: "coach".to_string()
            }
            .is_invalid_argument()
        );
        assert!(ApiError::EmptyLeagues.is_invalid_argument());
        assert!(!ApiError::not_found("url").is_invalid_argument());
        assert!(!ApiError::no_match(EntityType::Team, "x").is_invalid_argument());
    }

    #[test]
    fn test_error_display_formats() {
        let errors = vec![
            ApiError::not_found("https://example.com"),
            ApiError::client_error(429, "Too Many Requests", "https://example.com"),
            ApiError::server_error(503, "Service Unavailable", "https://example.com"),
            ApiError::malformed_json("not json", "https://example.com"),
            ApiError::unexpected_structure("missing field", "https://example.com"),
            ApiError::no_match(EntityType::Stadium, "Somewhere"),
            ApiError::EmptyLeagues,
        ];

        for error in errors {
            let display = error.to_string();
            assert!(
                display.len() > 5,
                "Error display should be descriptive: {error:?}"
            );
        }
    }
}

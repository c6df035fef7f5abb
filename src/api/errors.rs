use std::fmt;

/// Everything that can go wrong between the dashboard and the backend
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, connection dropped mid-body
    Network(String),
    /// The backend answered with a non-2xx status
    Status { code: u16, body: String },
    /// The body was not the JSON we asked for
    Decode(String),
    /// The request could not be built (bad base URL, unserializable payload)
    Request(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status { code, body } if body.trim().is_empty() => {
                write!(f, "Request failed with status code {}", code)
            }
            ApiError::Status { code, body } => {
                write!(f, "Request failed with status code {}: {}", code, body.trim())
            }
            ApiError::Decode(msg) => write!(f, "Invalid API response: {}", msg),
            ApiError::Request(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                code: status.as_u16(),
                body: String::new(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_body_when_present() {
        let bare = ApiError::Status {
            code: 502,
            body: "  ".into(),
        };
        assert_eq!(bare.to_string(), "Request failed with status code 502");

        let detailed = ApiError::Status {
            code: 422,
            body: "{\"detail\":\"bad token\"}\n".into(),
        };
        assert_eq!(
            detailed.to_string(),
            "Request failed with status code 422: {\"detail\":\"bad token\"}"
        );
    }

    #[test]
    fn serde_errors_are_decode_errors() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().starts_with("Invalid API response"));
    }
}

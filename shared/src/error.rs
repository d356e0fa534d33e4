use serde::Deserialize;
use serde_json::Value;

/// Failure of a call to the prediction/auth API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
    #[error("Server error: {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Value,
}

/// Pulls the human readable `detail` out of an error body. Validation
/// failures arrive as a list of `{msg, ...}` objects; the first message wins.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = match parsed.detail {
        Value::String(s) => s,
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)?
            .to_string(),
        _ => return None,
    };
    (!detail.trim().is_empty()).then_some(detail)
}

impl ApiError {
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }

    /// Message shown in the inline alert: the server's detail verbatim when
    /// present, the workflow's fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Input problems that block a submission before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select an image first")]
    NoImageSelected,
    #[error("Only image files can be analyzed ({0})")]
    NotAnImage(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    #[error("{0} has an unknown value")]
    InvalidChoice(&'static str),
    #[error("A request is already in progress")]
    RequestInFlight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_used_verbatim() {
        let err = ApiError::from_response(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert!(err.is_unauthorized());

        let err = ApiError::from_response(400, r#"{"detail":"  Username already registered\n"}"#);
        assert_eq!(err.user_message("Signup failed"), "  Username already registered\n");
    }

    #[test]
    fn test_fallback_when_detail_missing() {
        let err = ApiError::from_response(500, "<html>Internal Server Error</html>");
        assert_eq!(err.user_message("Prediction failed"), "Prediction failed");

        let err = ApiError::from_response(500, r#"{"error":"boom"}"#);
        assert_eq!(err.user_message("Prediction failed"), "Prediction failed");

        let err = ApiError::from_response(400, r#"{"detail":"   "}"#);
        assert_eq!(err.user_message("Signup failed"), "Signup failed");
    }

    #[test]
    fn test_validation_list_detail_takes_first_message() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_transport_errors_use_fallback() {
        assert_eq!(
            ApiError::Network("offline".into()).user_message("Login failed"),
            "Login failed"
        );
        assert_eq!(ApiError::Timeout(30_000).user_message("Prediction failed"), "Prediction failed");
        assert!(!ApiError::Timeout(30_000).is_unauthorized());
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NoImageSelected.to_string(),
            "Please select an image first"
        );
        assert_eq!(
            ValidationError::MissingField("Username").to_string(),
            "Username is required"
        );
    }
}

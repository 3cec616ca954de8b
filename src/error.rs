use thiserror::Error;

/// Message shown to end users for every generation failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "일정 생성 중 오류가 발생했습니다. 다시 시도해 주세요.";

/// Errors produced while building, sending, or interpreting an itinerary request
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend returned no response text")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContractError>;

impl ContractError {
    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ContractError::InvalidInput(_) => "INVALID_INPUT",
            ContractError::EmptyResponse => "EMPTY_RESPONSE",
            ContractError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ContractError::BackendUnavailable(_) => "BACKEND_UNAVAILABLE",
            ContractError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// The one localized message a presentation layer displays. Error kinds
    /// are deliberately not distinguished for end users.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        ContractError::MalformedResponse(err.to_string())
    }
}

impl From<reqwest::Error> for ContractError {
    fn from(err: reqwest::Error) -> Self {
        ContractError::BackendUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_code_and_message() {
        let error = ContractError::MalformedResponse("missing field `theme`".to_string());
        let payload = error.to_error_payload();
        assert_eq!(payload["error"]["code"], "MALFORMED_RESPONSE");
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("missing field `theme`"));
    }

    #[test]
    fn every_kind_shares_the_user_message() {
        let errors = [
            ContractError::InvalidInput("days".into()),
            ContractError::EmptyResponse,
            ContractError::MalformedResponse("x".into()),
            ContractError::BackendUnavailable("401".into()),
            ContractError::Config("bad path".into()),
        ];
        for error in errors {
            assert_eq!(error.user_message(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn serde_errors_become_malformed_responses() {
        let err = serde_json::from_str::<serde_json::Value>("{not valid json").unwrap_err();
        assert!(matches!(
            ContractError::from(err),
            ContractError::MalformedResponse(_)
        ));
    }
}

use thiserror::Error;

/// Every failure the gateway can produce, each with a fixed HTTP status.
/// Nothing else is allowed to escape to the caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid category {given:?}; expected one of: {valid}", valid = crate::category::Category::VALID_SET)]
    InvalidParameter { given: String },

    #[error("POLYGON_API_KEY is not set")]
    ConfigurationError,

    #[error("{message}")]
    UpstreamError { status: u16, message: String },

    #[error("failed to fetch upstream data: {0}")]
    FetchFailed(String),
}

impl GatewayError {
    /// HTTP status returned to the caller. `UpstreamError` mirrors whatever
    /// the provider answered.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter { .. } => 400,
            Self::ConfigurationError | Self::FetchFailed(_) => 500,
            Self::UpstreamError { status, .. } => *status,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::FetchFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_errors_are_bad_requests() {
        assert_eq!(GatewayError::MissingParameter("ticker").status(), 400);
        assert_eq!(
            GatewayError::InvalidParameter {
                given: "dividends".to_string()
            }
            .status(),
            400
        );
    }

    #[test]
    fn configuration_and_fetch_failures_are_internal() {
        assert_eq!(GatewayError::ConfigurationError.status(), 500);
        assert_eq!(
            GatewayError::FetchFailed("connection reset".to_string()).status(),
            500
        );
    }

    #[test]
    fn upstream_errors_mirror_the_upstream_status() {
        let e = GatewayError::UpstreamError {
            status: 503,
            message: "upstream responded with status 503".to_string(),
        };
        assert_eq!(e.status(), 503);
    }

    #[test]
    fn messages_name_the_offending_parameter() {
        let e = GatewayError::MissingParameter("ticker");
        assert!(e.to_string().contains("ticker"));

        let e = GatewayError::MissingParameter("category");
        assert!(e.to_string().contains("category"));
    }

    #[test]
    fn invalid_category_message_names_the_valid_set() {
        let msg = GatewayError::InvalidParameter {
            given: "dividends".to_string(),
        }
        .to_string();
        assert!(msg.contains("dividends"));
        assert!(msg.contains("financials"));
        assert!(msg.contains("news"));
        assert!(msg.contains("overview"));
        assert!(msg.contains("price"));
    }
}

/// Error types for the AGH core library
use thiserror::Error;

/// Main error type for loading and describing community series
#[derive(Error, Debug)]
pub enum AghError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Remote storage answered with a non-success status
    #[error("Bad response status {status} for {location}")]
    BadStatus { location: String, status: u16 },

    /// Remote storage answered with an empty body
    #[error("Empty response for {0}")]
    EmptyResponse(String),

    /// Failed to read a local series file
    #[error("Failed to read series: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required CSV column is missing
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// Numeric value parsing failed
    #[error("Failed to parse value: {0}")]
    ValueParse(String),

    /// Day-of-year key is not a real calendar day
    #[error("Invalid month-day key: {0}")]
    InvalidMonthDay(String),

    /// Scenario tag not recognized
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Community not in the community list
    #[error("Community not found: {0}")]
    CommunityNotFound(String),
}

impl AghError {
    /// True for failures that mean the requested series could not be
    /// fetched or parsed. These are fatal to a chart request.
    pub fn is_data_unavailable(&self) -> bool {
        !matches!(
            self,
            AghError::InvalidMonthDay(_)
                | AghError::UnknownScenario(_)
                | AghError::CommunityNotFound(_)
        )
    }
}

/// Type alias for Results using AghError
pub type Result<T> = std::result::Result<T, AghError>;

#[cfg(test)]
mod tests {
    use super::AghError;

    #[test]
    fn test_data_unavailable_classification() {
        assert!(AghError::EmptyResponse("x".into()).is_data_unavailable());
        assert!(AghError::BadStatus {
            location: "x".into(),
            status: 404
        }
        .is_data_unavailable());
        assert!(AghError::DateParse("x".into()).is_data_unavailable());
        assert!(!AghError::UnknownScenario("CCSM".into()).is_data_unavailable());
        assert!(!AghError::CommunityNotFound("Atlantis".into()).is_data_unavailable());
    }

    #[test]
    fn test_error_messages() {
        let err = AghError::BadStatus {
            location: "https://example.com/min/Nome_ERA_min.csv".into(),
            status: 403,
        };
        assert_eq!(
            err.to_string(),
            "Bad response status 403 for https://example.com/min/Nome_ERA_min.csv"
        );
    }
}

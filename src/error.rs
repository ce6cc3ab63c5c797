use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid trip request: {0}")]
    InvalidRequest(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Itinerary source failed: {0}")]
    Source(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    /// Short, stable name used as a metric attribute
    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::InvalidRequest(_) => "InvalidRequest",
            PlannerError::Config(_) => "Config",
            PlannerError::Source(_) => "Source",
            PlannerError::Io(_) => "Io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlannerError::InvalidRequest("destination must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid trip request: destination must not be empty"
        );
        assert_eq!(err.kind(), "InvalidRequest");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
        assert_eq!(err.kind(), "Io");
    }
}

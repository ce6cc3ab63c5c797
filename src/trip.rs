use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// Trip parameters supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TripRequest {
    pub destination: String,
    pub num_days: u32,
    pub budget: u64,
    pub currency: String,
    pub num_travelers: u32,
    #[serde(default)]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub group_type: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl TripRequest {
    /// Preferences text, empty when none were given
    pub fn preferences_text(&self) -> &str {
        self.preferences.as_deref().unwrap_or("")
    }

    /// Checks the request shape before it reaches the generator, which
    /// itself accepts anything.
    pub fn validate(&self, max_days: u32) -> Result<(), PlannerError> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "destination must not be empty".to_string(),
            ));
        }
        if self.num_days == 0 {
            return Err(PlannerError::InvalidRequest(
                "num_days must be at least 1".to_string(),
            ));
        }
        if self.num_days > max_days {
            return Err(PlannerError::InvalidRequest(format!(
                "num_days must not exceed {}, got {}",
                max_days, self.num_days
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(PlannerError::InvalidRequest(
                "currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

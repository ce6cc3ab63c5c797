use crate::error::PlannerError;
use crate::itinerary::{Category, Day, Itinerary};
use crate::trip::TripRequest;
use async_trait::async_trait;

/// Itinerary produced by a source.
///
/// Sources that know their structure (the template generator) fill in
/// `category` and `days`; sources that only have free text leave them empty
/// and callers fall back to segmenting `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedItinerary {
    pub text: String,
    pub category: Option<Category>,
    pub days: Option<Vec<Day>>,
}

impl SourcedItinerary {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            days: None,
        }
    }
}

impl From<Itinerary> for SourcedItinerary {
    fn from(itinerary: Itinerary) -> Self {
        Self {
            text: itinerary.to_string(),
            category: Some(itinerary.category),
            days: Some(itinerary.days),
        }
    }
}

/// Produces an itinerary for a validated trip request.
///
/// Implementations that wrap an expensive client (e.g. a hosted model agent)
/// are built once and handed to [`crate::planner::Planner::new`].
#[async_trait]
pub trait ItinerarySource: Send + Sync {
    async fn itinerary(&self, request: &TripRequest) -> Result<SourcedItinerary, PlannerError>;
}

/// Deterministic source backed by the keyword template generator
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateSource;

#[async_trait]
impl ItinerarySource for TemplateSource {
    async fn itinerary(&self, request: &TripRequest) -> Result<SourcedItinerary, PlannerError> {
        Ok(Itinerary::generate(
            &request.destination,
            request.num_days,
            request.preferences_text(),
            request.budget,
            &request.currency,
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_source_uses_request_fields() {
        let request = TripRequest {
            destination: "Rishikesh".to_string(),
            num_days: 2,
            budget: 12000,
            currency: "INR".to_string(),
            preferences: Some("Adventure and yoga".to_string()),
            ..Default::default()
        };
        let itinerary = TemplateSource.itinerary(&request).await.unwrap();
        assert!(itinerary.text.starts_with("Trip to Rishikesh"));
        assert!(itinerary.text.contains("Budget: 12000 INR"));
        assert!(itinerary.text.contains("Morning trek or hiking trail"));
        assert!(itinerary.text.contains("Day 2:"));
    }

    #[tokio::test]
    async fn test_template_source_reports_structure() {
        let request = TripRequest {
            destination: "Oslo".to_string(),
            num_days: 3,
            budget: 500,
            currency: "NOK".to_string(),
            ..Default::default()
        };
        let itinerary = TemplateSource.itinerary(&request).await.unwrap();
        assert_eq!(itinerary.category, Some(Category::General));
        let numbers: Vec<u32> = itinerary
            .days
            .unwrap()
            .iter()
            .map(|d| d.day_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_text_only_itinerary_has_no_category() {
        let itinerary = SourcedItinerary::from_text("Day 1: somewhere");
        assert_eq!(itinerary.category, None);
        assert_eq!(itinerary.days, None);
    }

    #[test]
    fn test_source_is_usable_as_trait_object() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ItinerarySource>();
    }
}

//! Request handling around the itinerary core: validation, source dispatch,
//! response envelopes and calendar export.

use crate::calendar::IcsCalendar;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::metrics::{
    category_label, inc_itinerary_generated, inc_itinerary_rejected, inc_segmentation_fallback,
};
use crate::segment::{segment_into_days, segments_from_days};
use crate::source::{ItinerarySource, SourcedItinerary};
use crate::trip::TripRequest;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

const STATUS_SUCCESS: &str = "success";
const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub status: String,
    pub itinerary: String,
}

impl PlanResponse {
    pub fn success(itinerary: String) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            itinerary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: STATUS_OK.to_string(),
    }
}

/// Response envelope together with its calendar rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripExport {
    pub response: PlanResponse,
    pub calendar: String,
}

/// Serves trip requests from one long-lived itinerary source.
pub struct Planner<S> {
    source: S,
    config: PlannerConfig,
}

impl<S: ItinerarySource> Planner<S> {
    pub fn new(source: S, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub async fn plan(&self, request: &TripRequest) -> Result<PlanResponse, PlannerError> {
        let itinerary = self.produce(request).await?;
        Ok(PlanResponse::success(itinerary.text))
    }

    /// Plans the trip and renders it as an iCalendar document as well.
    ///
    /// Day records reported by the source are used as-is; free text is
    /// segmented at its day markers.
    pub async fn export(
        &self,
        request: &TripRequest,
        start_date: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Result<TripExport, PlannerError> {
        let itinerary = self.produce(request).await?;
        let calendar = match &itinerary.days {
            Some(days) => {
                let segments = segments_from_days(days, start_date);
                debug!("Exporting {} structured calendar events", segments.len());
                IcsCalendar::from_segments(&request.destination, &segments).to_ics(generated_at)
            }
            None => export_calendar(
                &request.destination,
                &itinerary.text,
                start_date,
                generated_at,
            ),
        };
        Ok(TripExport {
            response: PlanResponse::success(itinerary.text),
            calendar,
        })
    }

    pub async fn calendar(
        &self,
        request: &TripRequest,
        start_date: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Result<String, PlannerError> {
        Ok(self.export(request, start_date, generated_at).await?.calendar)
    }

    #[instrument(
        skip(self, request),
        fields(destination = %request.destination, num_days = request.num_days)
    )]
    async fn produce(&self, request: &TripRequest) -> Result<SourcedItinerary, PlannerError> {
        if let Err(error) = request.validate(self.config.max_days) {
            warn!("Rejected trip request: {}", error);
            inc_itinerary_rejected(&error);
            return Err(error);
        }

        let itinerary = match self.source.itinerary(request).await {
            Ok(itinerary) => itinerary,
            Err(error) => {
                warn!("Itinerary source failed: {}", error);
                inc_itinerary_rejected(&error);
                return Err(error);
            }
        };

        inc_itinerary_generated(itinerary.category);
        info!(
            category = category_label(itinerary.category),
            "Generated itinerary ({} bytes)",
            itinerary.text.len()
        );
        Ok(itinerary)
    }
}

/// Segments itinerary text from any source into one all-day event per day.
#[instrument(skip(itinerary))]
pub fn export_calendar(
    destination: &str,
    itinerary: &str,
    start_date: NaiveDate,
    generated_at: DateTime<Utc>,
) -> String {
    let segments = segment_into_days(itinerary, start_date);
    if segments.iter().all(|s| s.day_number.is_none()) {
        warn!("No day markers found, exporting itinerary as a single event");
        inc_segmentation_fallback();
    }
    debug!("Exporting {} calendar events", segments.len());
    IcsCalendar::from_segments(destination, &segments).to_ics(generated_at)
}

//! Trip itinerary generation, day segmentation and calendar export.

pub mod calendar;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod metrics;
pub mod otel;
pub mod planner;
pub mod segment;
pub mod source;
pub mod trip;

pub use calendar::{CalendarEvent, IcsCalendar};
pub use config::{PlannerConfig, TelemetryConfig};
pub use error::PlannerError;
pub use itinerary::{Category, Day, Itinerary, generate_itinerary_text};
pub use planner::{HealthStatus, PlanResponse, Planner, TripExport, export_calendar, health};
pub use segment::{DaySegment, segment_into_days, segments_from_days};
pub use source::{ItinerarySource, SourcedItinerary, TemplateSource};
pub use trip::TripRequest;

use crate::error::PlannerError;
use crate::itinerary::Category;
use crate::otel;
use opentelemetry::KeyValue;
use opentelemetry::metrics::Counter;
use std::sync::OnceLock;

pub fn inc_itinerary_generated(category: Option<Category>) {
    itinerary_generated().add(1, &[KeyValue::new("category", category_label(category))])
}

/// Category attribute value; sources that pick no template report `unspecified`
pub fn category_label(category: Option<Category>) -> &'static str {
    category.map_or("unspecified", Category::as_str)
}

pub fn inc_itinerary_rejected(error: &PlannerError) {
    itinerary_rejected().add(1, &[KeyValue::new("kind", error.kind())])
}

pub fn inc_segmentation_fallback() {
    segmentation_fallback().add(1, &[])
}

fn itinerary_generated() -> &'static Counter<u64> {
    static COUNTER: OnceLock<Counter<u64>> = OnceLock::new();
    COUNTER.get_or_init(|| {
        otel::get_meter()
            .u64_counter("itinerary_generated")
            .with_description("Number of itineraries returned to callers")
            .build()
    })
}

fn itinerary_rejected() -> &'static Counter<u64> {
    static COUNTER: OnceLock<Counter<u64>> = OnceLock::new();
    COUNTER.get_or_init(|| {
        otel::get_meter()
            .u64_counter("itinerary_rejected")
            .with_description("Number of trip requests that failed validation or generation")
            .build()
    })
}

fn segmentation_fallback() -> &'static Counter<u64> {
    static COUNTER: OnceLock<Counter<u64>> = OnceLock::new();
    COUNTER.get_or_init(|| {
        otel::get_meter()
            .u64_counter("segmentation_fallback")
            .with_description("Itinerary texts without day markers exported as a single event")
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label() {
        assert_eq!(category_label(Some(Category::Temple)), "temple");
        assert_eq!(category_label(None), "unspecified");
    }

    #[test]
    fn test_counters_do_not_panic_without_provider() {
        inc_itinerary_generated(None);
        inc_itinerary_generated(Some(Category::Food));
        inc_segmentation_fallback();
    }
}

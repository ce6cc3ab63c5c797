use crate::config::TelemetryConfig;
use anyhow::anyhow;
use opentelemetry::global;
use opentelemetry::metrics::Meter;
use opentelemetry::propagation::TextMapCompositePropagator;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::{BatchLogProcessor, SdkLoggerProvider};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use opentelemetry_sdk::trace::{BatchSpanProcessor, SdkTracerProvider};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;

const DEFAULT_SERVICE: &str = "trip-planner";

static SERVICE: OnceLock<String> = OnceLock::new();

/// Initialize OpenTelemetry and return a guard that ensures proper cleanup
pub fn init_otel(config: &TelemetryConfig) -> Result<OtelGuard, anyhow::Error> {
    // First initialization wins.
    let _ = SERVICE.set(config.service_name.clone());
    let providers = OtelProviders::init(config)?;
    Ok(OtelGuard { providers })
}

/// Creates or returns the meter for this service
pub fn get_meter() -> &'static Meter {
    static METER: OnceLock<Meter> = OnceLock::new();
    METER.get_or_init(|| global::meter(get_service()))
}

/// Guard that ensures OpenTelemetry providers are properly shut down
pub struct OtelGuard {
    providers: OtelProviders,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(e) = self.providers.shutdown() {
            eprintln!("Error during OpenTelemetry shutdown: {}", e);
        }
    }
}

struct OtelProviders {
    log_provider: SdkLoggerProvider,
    trace_provider: SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl OtelProviders {
    fn init(config: &TelemetryConfig) -> Result<OtelProviders, anyhow::Error> {
        let endpoint = config.otlp_endpoint.as_deref();

        let log_provider = init_logs(endpoint)?;
        let log_layer = OpenTelemetryTracingBridge::new(&log_provider)
            .with_filter(quiet_filter(&config.log_level)?);

        // stdout carries the command's output, logs go to stderr
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_thread_names(true)
            .with_filter(EnvFilter::new(&config.log_level));

        let trace_provider = init_traces(endpoint)?;
        let tracing_layer = OpenTelemetryLayer::new(trace_provider.tracer(get_service()))
            .with_filter(EnvFilter::new(&config.log_level));

        let subscriber = tracing_subscriber::registry()
            .with(log_layer)
            .with(tracing_layer)
            .with(fmt_layer);
        subscriber::set_global_default(subscriber)?;

        let meter_provider = init_metrics(endpoint)?;

        Ok(OtelProviders {
            log_provider,
            trace_provider,
            meter_provider,
        })
    }

    fn shutdown(&self) -> Result<(), anyhow::Error> {
        let mut shutdown_errors = Vec::new();
        if let Err(e) = self.log_provider.shutdown() {
            shutdown_errors.push(format!("Shutdown log provider failed: {}", e));
        }
        if let Err(e) = self.trace_provider.shutdown() {
            shutdown_errors.push(format!("Shutdown trace provider failed: {}", e));
        }
        if let Err(e) = self.meter_provider.shutdown() {
            shutdown_errors.push(format!("Shutdown meter provider failed: {}", e));
        }
        if !shutdown_errors.is_empty() {
            return Err(anyhow!(
                "Failed to shutdown providers:\n{}",
                shutdown_errors.join("\n")
            ));
        }
        Ok(())
    }
}

/// Keeps exporter transport chatter out of the exported logs
fn quiet_filter(level: &str) -> Result<EnvFilter, anyhow::Error> {
    Ok(EnvFilter::new(level)
        .add_directive("hyper=off".parse()?)
        .add_directive("tonic=off".parse()?)
        .add_directive("h2=off".parse()?))
}

fn get_service() -> &'static str {
    SERVICE.get().map_or(DEFAULT_SERVICE, String::as_str)
}

fn get_resource() -> Resource {
    static RESOURCE: OnceLock<Resource> = OnceLock::new();
    RESOURCE
        .get_or_init(|| Resource::builder().with_service_name(get_service()).build())
        .clone()
}

fn init_traces(endpoint: Option<&str>) -> Result<SdkTracerProvider, anyhow::Error> {
    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(BaggagePropagator::new()),
        Box::new(TraceContextPropagator::new()),
    ]));

    let batch_config = opentelemetry_sdk::trace::BatchConfigBuilder::default()
        .with_max_queue_size(1000)
        .with_scheduled_delay(Duration::from_secs(1))
        .with_max_export_batch_size(100)
        .build();
    let mut builder = SdkTracerProvider::builder().with_resource(get_resource());
    // Without a collector spans only feed the fmt layer
    if let Some(endpoint) = endpoint {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;
        builder = builder.with_span_processor(BatchSpanProcessor::new(exporter, batch_config));
    }
    let provider = builder.build();

    global::set_tracer_provider(provider.clone());
    Ok(provider)
}

fn init_metrics(endpoint: Option<&str>) -> Result<SdkMeterProvider, anyhow::Error> {
    let mut builder = SdkMeterProvider::builder().with_resource(get_resource());
    if let Some(endpoint) = endpoint {
        let exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;
        builder = builder.with_reader(
            PeriodicReader::builder(exporter)
                .with_interval(Duration::from_secs(5))
                .build(),
        );
    }
    let provider = builder.build();
    global::set_meter_provider(provider.clone());
    Ok(provider)
}

fn init_logs(endpoint: Option<&str>) -> Result<SdkLoggerProvider, anyhow::Error> {
    let mut builder = SdkLoggerProvider::builder().with_resource(get_resource());
    if let Some(endpoint) = endpoint {
        let exporter = opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;
        builder = builder.with_log_processor(BatchLogProcessor::builder(exporter).build());
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_meter_once_lock() {
        let meter1 = get_meter();
        let meter2 = get_meter();
        assert!(std::ptr::eq(meter1, meter2));
    }

    #[test]
    fn test_service_name_defaults_before_init() {
        assert!(!get_service().is_empty());
    }

    #[test]
    fn test_quiet_filter_accepts_levels() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(quiet_filter(level).is_ok());
        }
    }
}

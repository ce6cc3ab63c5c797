use anyhow::Context;
use chrono::{Local, Utc};
use dotenv::dotenv;
use std::env;
use tokio::io::AsyncReadExt;
use tracing::{info, instrument};
use trip_planner::{Planner, PlannerConfig, TemplateSource, TripRequest, otel};

/// Reads the request JSON from the given path, or stdin when none is given.
#[instrument]
async fn read_request(path: Option<&str>) -> Result<TripRequest, anyhow::Error> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read trip request from {}", path))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read trip request from stdin")?;
            buf
        }
    };
    let request = serde_json::from_str(&raw).context("Trip request is not valid JSON")?;
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let config = PlannerConfig::from_env()?;

    // OTEL graceful shutdown on success or error exit
    let _otel_guard = otel::init_otel(&config.telemetry)?;

    info!("Starting trip planner");

    let request_path = env::args().nth(1);
    let request = read_request(request_path.as_deref()).await?;

    let planner = Planner::new(TemplateSource, config);
    let response = match &planner.config().calendar_path {
        Some(path) => {
            let start_date = planner
                .config()
                .start_date
                .unwrap_or_else(|| Local::now().date_naive());
            let export = planner.export(&request, start_date, Utc::now()).await?;
            tokio::fs::write(path, export.calendar)
                .await
                .with_context(|| format!("Failed to write calendar to {}", path.display()))?;
            info!("Calendar written to {}", path.display());
            export.response
        }
        None => planner.plan(&request).await?,
    };

    // The envelope is the only thing written to stdout
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

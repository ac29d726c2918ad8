//! Command-line interface for mouth-sense.
//!
//! This binary talks to the daemon over its HTTP API.

use std::env;

use anyhow::Result;

use mouth_sense::api_client;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: mouth-sense-cli <command>");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  classify [--refresh]  Classify the probe's current state");
        eprintln!("  session               Show the last decision and baseline");
        eprintln!("  health                Check that the daemon is up");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  MOUTH_SENSE_API_URL    API base URL (default: http://127.0.0.1:7786)");
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "classify" => {
            let refresh = args[2..].iter().any(|a| a == "--refresh");
            cmd_classify(refresh).await?
        }
        "session" => cmd_session().await?,
        "health" => cmd_health().await?,
        _ => {
            eprintln!("Unknown command: {}", command);
            eprintln!("Run without arguments to see usage.");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Build an API client, honoring MOUTH_SENSE_API_URL if set.
fn make_client() -> api_client::Client {
    match env::var("MOUTH_SENSE_API_URL") {
        Ok(url) => api_client::Client::with_base_url(url),
        Err(_) => api_client::Client::new(),
    }
}

/// Print one classification.
async fn cmd_classify(refresh: bool) -> Result<()> {
    let client = make_client();
    let c = client.classify(refresh).await?;

    println!("State:    {} ({})", c.state, c.reason);
    println!(
        "Probe:    {:.1} °C, {:.1} %RH",
        c.temperature, c.humidity
    );
    println!(
        "Ambient:  {:.1} °C, {:.1} %RH",
        c.environmental_temperature, c.environmental_humidity
    );
    println!(
        "Motion:   peak {:.3} g, still: {}",
        c.peak_acceleration, c.is_motion_still
    );
    println!(
        "Trends:   increasing: {}, decreasing: {} (temp +{}/-{}, humidity +{}/-{})",
        c.trends.increasing,
        c.trends.decreasing,
        c.trends.counts.temp_increasing,
        c.trends.counts.temp_decreasing,
        c.trends.counts.humidity_increasing,
        c.trends.counts.humidity_decreasing,
    );
    println!(
        "Thresholds: temperature: {}, humidity: {}",
        c.thresholds_met.temperature_met, c.thresholds_met.humidity_met
    );

    Ok(())
}

/// Print the session summary.
async fn cmd_session() -> Result<()> {
    let client = make_client();
    let session = client.session().await?;

    println!("Device:   {}", session.device_state);
    println!("Previous: {}", session.previous);
    println!("Classifications: {}", session.classifications);
    match (
        session.baseline.ambient_temperature,
        session.baseline.ambient_humidity,
    ) {
        (Some(t), Some(h)) => println!("Ambient:  {:.1} °C, {:.1} %RH", t, h),
        _ => println!("Ambient:  (not set)"),
    }

    Ok(())
}

async fn cmd_health() -> Result<()> {
    let client = make_client();
    println!("{}", client.health().await?);
    Ok(())
}

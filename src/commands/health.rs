// Health command: one anonymous GET against /api/health.

use crate::config::Settings;
use anyhow::{Context, Result};

pub fn run_health(settings: &Settings) -> Result<()> {
    let client = settings.client();
    println!("Performing a health check on HBD host: {}", client.base_url());

    let ready = client.check_health().context("Error checking health")?;
    println!("Service health status: {}", ready.status);
    Ok(())
}

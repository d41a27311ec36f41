//! Time-series loader for per-community daily temperature CSVs.
//!
//! Series live under `{data_url}/{variable}/{Community}_{SCENARIO}_{variable}.csv`,
//! e.g. `.../min/Fairbanks_ERA_min.csv`. The data location is passed in
//! through [`LoaderConfig`]; nothing here reads the process environment.

use crate::community::storage_name;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "api")]
use crate::{
    error::{AghError, Result},
    series::DailySeries,
    units::Measurement,
};
#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};

/// Public bucket holding the community series.
pub const DEFAULT_DATA_URL: &str = "https://s3-us-west-2.amazonaws.com/community-logs-data";

/// Which daily statistic a series file holds.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Daily minimum temperature
    Min,
    /// Daily mean temperature
    Mean,
}

impl Variable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::Min => "min",
            Variable::Mean => "mean",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the loader finds series files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// `http(s)://` prefix or a local directory with the same layout
    pub data_url: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            data_url: DEFAULT_DATA_URL.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new(data_url: impl Into<String>) -> Self {
        LoaderConfig {
            data_url: data_url.into(),
        }
    }

    /// True when `data_url` points at a web server rather than a directory.
    pub fn is_remote(&self) -> bool {
        self.data_url.starts_with("http://") || self.data_url.starts_with("https://")
    }

    /// Storage key for one community series.
    pub fn series_location(&self, community: &str, scenario: Scenario, variable: Variable) -> String {
        format!(
            "{}/{}/{}_{}_{}.csv",
            self.data_url.trim_end_matches('/'),
            variable,
            storage_name(community),
            scenario.tag(),
            variable
        )
    }
}

/// Fetches and parses community series. One fetch per call, no retries.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    client: Client,
}

#[cfg(feature = "api")]
impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Loader {
            config,
            client: Client::new(),
        }
    }

    /// Load the daily `variable` series for a community under a scenario,
    /// converted to Fahrenheit.
    pub async fn load(
        &self,
        community: &str,
        scenario: Scenario,
        variable: Variable,
    ) -> Result<DailySeries> {
        let location = self.config.series_location(community, scenario, variable);
        info!("Loading {} {} series from {}", scenario, variable, location);
        let body = self.fetch_body(&location).await?;
        let series = DailySeries::from_csv(&body, Measurement::Temperature).map_err(|e| {
            warn!("Failed to parse {}: {}", location, e);
            e
        })?;
        if series.is_empty() {
            warn!("No values in {}", location);
            return Err(AghError::EmptyResponse(location));
        }
        info!(
            "Loaded {} values ({:?}-{:?}) for {} {}",
            series.len(),
            series.first_year(),
            series.last_year(),
            community,
            scenario
        );
        Ok(series)
    }

    async fn fetch_body(&self, location: &str) -> Result<String> {
        if !self.config.is_remote() {
            let body = tokio::fs::read_to_string(location).await.map_err(|e| {
                warn!("Failed to read {}: {}", location, e);
                e
            })?;
            return Ok(body);
        }
        let response = self.client.get(location).send().await.map_err(|e| {
            warn!("Request failed for {}: {}", location, e);
            e
        })?;
        if response.status() != StatusCode::OK {
            warn!("Bad response status for {}: {}", location, response.status());
            return Err(AghError::BadStatus {
                location: location.to_string(),
                status: response.status().as_u16(),
            });
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(AghError::EmptyResponse(location.to_string()));
        }
        Ok(body)
    }
}

//! Non-chart commands: hardiness zones and the community list.

use crate::charts::load_pair;
use crate::{ensure_model, write_output, CLIMATE_WINDOW, ERA_PERIOD, MODEL_PERIOD};
use agh_core::community::Community;
use agh_core::loader::{LoaderConfig, Variable};
use agh_core::{DailySeries, Scenario};
use agh_data::hardiness::{hardiness_for_span, HardinessSummary};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardinessPeriod {
    pub scenario: Scenario,
    pub summary: HardinessSummary,
    /// `[low, high)` °F band of the zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_range_f: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardinessReport {
    pub community: String,
    pub periods: Vec<HardinessPeriod>,
}

/// Zone for the ERA period, then for each 30-year window of the model.
pub fn hardiness_report(
    community: &Community,
    model: Scenario,
    era: &DailySeries,
    projected: &DailySeries,
) -> HardinessReport {
    let era_periods = ERA_PERIOD
        .windows(CLIMATE_WINDOW)
        .into_iter()
        .map(|span| (Scenario::Era, hardiness_for_span(era, span)));
    let model_periods = MODEL_PERIOD
        .windows(CLIMATE_WINDOW)
        .into_iter()
        .map(|span| (model, hardiness_for_span(projected, span)));
    HardinessReport {
        community: community.name.clone(),
        periods: era_periods
            .chain(model_periods)
            .map(|(scenario, summary)| HardinessPeriod {
                scenario,
                zone_range_f: summary.zone.map(|zone| zone.range_f()),
                summary,
            })
            .collect(),
    }
}

pub async fn run_hardiness(
    config: &LoaderConfig,
    community: &str,
    model: Scenario,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    ensure_model(model)?;
    let community = Community::resolve(community)?;
    let (era, projected) = load_pair(config, &community, model, Variable::Min).await?;
    let report = hardiness_report(&community, model, &era, &projected);
    for period in &report.periods {
        match period.summary.zone {
            Some(zone) => info!(
                "{} {}: zone {} {:?}",
                period.scenario, period.summary.span, zone, period.zone_range_f
            ),
            None => info!("{} {}: no zone", period.scenario, period.summary.span),
        }
    }
    write_output(&report, output)
}

pub fn run_communities(output: Option<&Path>) -> anyhow::Result<()> {
    let communities = Community::get_community_vector()?;
    info!("{} communities", communities.len());
    write_output(&communities, output)
}

//! Chart commands: growing season, annual minimum and growing degree days.

use crate::{ensure_model, write_output, CLIMATE_WINDOW, ERA_PERIOD, MODEL_PERIOD};
use agh_core::community::Community;
use agh_core::loader::{Loader, LoaderConfig, Variable};
use agh_core::{DailySeries, Scenario};
use agh_data::bias::{bias, SAME_UNIT_FACTOR};
use agh_data::chart::{annual_minimum_trace, gdd_traces, growing_season_traces, ChartFigure};
use agh_data::degree_days::{decade_gdd, Correction};
use agh_data::{climatology, decade_bins, Aggregate, BIAS_BASELINE};
use log::{info, warn};
use std::path::Path;

/// Load the ERA and `model` series for a community concurrently.
pub(crate) async fn load_pair(
    config: &LoaderConfig,
    community: &Community,
    model: Scenario,
    variable: Variable,
) -> anyhow::Result<(DailySeries, DailySeries)> {
    let loader = Loader::new(config.clone());
    tokio::try_join!(
        loader.load(&community.name, Scenario::Era, variable),
        loader.load(&community.name, model, variable),
    )
    .map_err(|e| {
        let context = if e.is_data_unavailable() {
            format!(
                "No {} data available for {} ({} or {})",
                variable, community.name, Scenario::Era, model
            )
        } else {
            format!("Loading {} series for {}", variable, community.name)
        };
        anyhow::Error::new(e).context(context)
    })
}

pub fn growing_season_figure(
    community: &Community,
    threshold: i32,
    model: Scenario,
    era: &DailySeries,
    projected: &DailySeries,
) -> ChartFigure {
    let mut figure = ChartFigure::new(format!(
        "Growing Season (Start, Length, End), Number of Days > {} °F, {}, Alaska, Historical and Projected [{}] model",
        threshold, community.name, model
    ))
    .with_calendar_axis();
    let limit = f64::from(threshold);
    figure.extend(growing_season_traces(
        &decade_bins(era, Scenario::Era, limit, ERA_PERIOD),
        threshold,
    ));
    figure.extend(growing_season_traces(
        &decade_bins(projected, model, limit, MODEL_PERIOD),
        threshold,
    ));
    figure
}

pub fn annual_min_figure(
    community: &Community,
    model: Scenario,
    era: &DailySeries,
    projected: &DailySeries,
) -> ChartFigure {
    let mut figure = ChartFigure::new(format!(
        "Daily Minimum Temps (°F), {}, Alaska, Historical and Projected [{}] model",
        community.name, model
    ))
    .with_calendar_axis();
    for (series, period) in [(era, ERA_PERIOD), (projected, MODEL_PERIOD)] {
        for window in period.windows(CLIMATE_WINDOW) {
            let coldest = climatology(series, window, Aggregate::Min);
            if coldest.is_empty() {
                warn!("No minimum temperatures for {} in {}", community.name, window);
                continue;
            }
            figure.extend([annual_minimum_trace(window, &coldest)]);
        }
    }
    figure
}

pub fn gdd_figure(
    community: &Community,
    baseline: i32,
    model: Scenario,
    era: &DailySeries,
    projected: &DailySeries,
    bias_correct: bool,
) -> ChartFigure {
    let mut figure = ChartFigure::new(format!(
        "Cumulative Growing Degree Days > {} °F, {}, Alaska, Historical and Projected [{}] model",
        baseline, community.name, model
    ))
    .with_calendar_axis();
    let base = f64::from(baseline);
    figure.extend(gdd_traces(
        &decade_gdd(era, Scenario::Era, base, ERA_PERIOD, None),
        ERA_PERIOD,
    ));

    let correction = bias_correct.then(|| bias(projected, era, BIAS_BASELINE));
    if let Some(correction) = &correction {
        if correction.is_empty() {
            warn!(
                "{} and ERA share no days in {}; corrected traces will be empty",
                model, BIAS_BASELINE
            );
        }
    }
    let decades = decade_gdd(
        projected,
        model,
        base,
        MODEL_PERIOD,
        correction.as_ref().map(|bias| Correction {
            bias,
            unit_factor: SAME_UNIT_FACTOR,
        }),
    );
    figure.extend(gdd_traces(&decades, MODEL_PERIOD));
    figure
}

pub async fn run_growing_season(
    config: &LoaderConfig,
    community: &str,
    threshold: i32,
    model: Scenario,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    ensure_model(model)?;
    let community = Community::resolve(community)?;
    let (era, projected) = load_pair(config, &community, model, Variable::Min).await?;
    let figure = growing_season_figure(&community, threshold, model, &era, &projected);
    info!("{} growing season traces for {}", figure.data.len(), community.name);
    write_output(&figure, output)
}

pub async fn run_annual_min(
    config: &LoaderConfig,
    community: &str,
    model: Scenario,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    ensure_model(model)?;
    let community = Community::resolve(community)?;
    let (era, projected) = load_pair(config, &community, model, Variable::Min).await?;
    let figure = annual_min_figure(&community, model, &era, &projected);
    info!("{} annual minimum traces for {}", figure.data.len(), community.name);
    write_output(&figure, output)
}

pub async fn run_gdd(
    config: &LoaderConfig,
    community: &str,
    baseline: i32,
    model: Scenario,
    bias_correct: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    ensure_model(model)?;
    let community = Community::resolve(community)?;
    let (era, projected) = load_pair(config, &community, model, Variable::Mean).await?;
    let figure = gdd_figure(&community, baseline, model, &era, &projected, bias_correct);
    info!(
        "{} degree-day traces for {}{}",
        figure.data.len(),
        community.name,
        if bias_correct { " (bias corrected)" } else { "" }
    );
    write_output(&figure, output)
}

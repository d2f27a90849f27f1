//! Estimated-vs-actual material variance analytics over production runs.
//!
//! Provides the aggregate variance statistics, per-model variance and the
//! time series behind the production analytics charts. All functions are
//! pure and return zeroed/empty results for empty input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::production_run::{compute_variance, RunStatus};
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A model printed in a production run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunItemSummary {
    pub model_id: EntityId,
    pub model_name: String,
    pub quantity: u32,
    pub estimated_weight_grams: f64,
    #[serde(default)]
    pub actual_weight_grams: Option<f64>,
}

/// The slice of a production run the analytics read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRunSummary {
    pub id: EntityId,
    pub run_number: String,
    pub status: RunStatus,
    #[serde(default)]
    pub estimated_total_weight_grams: f64,
    #[serde(default)]
    pub actual_total_weight_grams: f64,
    #[serde(default)]
    pub variance_grams: Option<f64>,
    #[serde(default)]
    pub variance_percentage: Option<f64>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub items: Vec<RunItemSummary>,
}

impl ProductionRunSummary {
    /// Completed with both variance figures recorded.
    fn has_recorded_variance(&self) -> bool {
        self.status == RunStatus::Completed
            && self.variance_grams.is_some()
            && self.variance_percentage.is_some()
    }
}

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

/// Variance summary across completed runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VarianceStats {
    /// Number of runs that qualified for the statistics.
    pub run_count: usize,
    pub average_variance_grams: f64,
    pub average_variance_percentage: f64,
    pub max_variance_grams: f64,
    pub min_variance_grams: f64,
    pub total_estimated_grams: f64,
    pub total_actual_grams: f64,
    /// Runs that used more material than estimated.
    pub runs_over_estimate: usize,
    /// Runs that used less material than estimated.
    pub runs_under_estimate: usize,
}

/// Compute variance statistics over completed runs with recorded variance.
///
/// Runs with exactly zero variance count in neither bucket.
pub fn compute_variance_stats(runs: &[ProductionRunSummary]) -> VarianceStats {
    let qualifying: Vec<(&ProductionRunSummary, f64, f64)> = runs
        .iter()
        .filter(|r| r.has_recorded_variance())
        .filter_map(|r| Some((r, r.variance_grams?, r.variance_percentage?)))
        .collect();

    if qualifying.is_empty() {
        return VarianceStats::default();
    }

    let count = qualifying.len() as f64;
    let sum_grams: f64 = qualifying.iter().map(|(_, g, _)| g).sum();
    let sum_pct: f64 = qualifying.iter().map(|(_, _, p)| p).sum();
    let max_grams = qualifying
        .iter()
        .map(|(_, g, _)| *g)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_grams = qualifying
        .iter()
        .map(|(_, g, _)| *g)
        .fold(f64::INFINITY, f64::min);

    VarianceStats {
        run_count: qualifying.len(),
        average_variance_grams: sum_grams / count,
        average_variance_percentage: sum_pct / count,
        max_variance_grams: max_grams,
        min_variance_grams: min_grams,
        total_estimated_grams: qualifying
            .iter()
            .map(|(r, _, _)| r.estimated_total_weight_grams)
            .sum(),
        total_actual_grams: qualifying
            .iter()
            .map(|(r, _, _)| r.actual_total_weight_grams)
            .sum(),
        runs_over_estimate: qualifying.iter().filter(|(_, g, _)| *g > 0.0).count(),
        runs_under_estimate: qualifying.iter().filter(|(_, g, _)| *g < 0.0).count(),
    }
}

// ---------------------------------------------------------------------------
// Per-model variance
// ---------------------------------------------------------------------------

/// Variance of one model's items across completed runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelVariance {
    pub model_id: EntityId,
    pub model_name: String,
    pub item_count: usize,
    pub total_estimated_grams: f64,
    pub total_actual_grams: f64,
    pub variance_grams: f64,
    pub variance_percentage: f64,
}

/// Group item-level variance by model, largest relative variance first.
///
/// Only items of completed runs with a recorded actual weight count. Models
/// with equal absolute percentage keep first-encounter order.
pub fn variance_by_model(runs: &[ProductionRunSummary]) -> Vec<ModelVariance> {
    let mut groups: IndexMap<EntityId, ModelVariance> = IndexMap::new();

    let items = runs
        .iter()
        .filter(|r| r.status == RunStatus::Completed)
        .flat_map(|r| r.items.iter());

    for item in items {
        let Some(actual) = item.actual_weight_grams else {
            continue;
        };
        let group = groups.entry(item.model_id).or_insert_with(|| ModelVariance {
            model_id: item.model_id,
            model_name: item.model_name.clone(),
            item_count: 0,
            total_estimated_grams: 0.0,
            total_actual_grams: 0.0,
            variance_grams: 0.0,
            variance_percentage: 0.0,
        });
        group.item_count += 1;
        group.total_estimated_grams += item.estimated_weight_grams;
        group.total_actual_grams += actual;
    }

    let mut result: Vec<ModelVariance> = groups
        .into_values()
        .map(|mut g| {
            let v = compute_variance(g.total_estimated_grams, g.total_actual_grams);
            g.variance_grams = v.grams;
            g.variance_percentage = v.percentage;
            g
        })
        .collect();

    // Stable sort keeps first-encounter order for ties.
    result.sort_by(|a, b| {
        b.variance_percentage
            .abs()
            .total_cmp(&a.variance_percentage.abs())
    });
    result
}

// ---------------------------------------------------------------------------
// Estimated vs actual series
// ---------------------------------------------------------------------------

/// One point of the estimated-vs-actual chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub run_id: EntityId,
    pub run_number: String,
    pub completed_at: Timestamp,
    pub estimated_grams: f64,
    pub actual_grams: f64,
}

/// Completed runs with a completion time, oldest first.
pub fn estimated_vs_actual_series(runs: &[ProductionRunSummary]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = runs
        .iter()
        .filter(|r| r.status == RunStatus::Completed)
        .filter_map(|r| {
            r.completed_at.map(|completed_at| SeriesPoint {
                run_id: r.id,
                run_number: r.run_number.clone(),
                completed_at,
                estimated_grams: r.estimated_total_weight_grams,
                actual_grams: r.actual_total_weight_grams,
            })
        })
        .collect();
    points.sort_by_key(|p| p.completed_at);
    points
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

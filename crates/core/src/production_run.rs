//! Production run status lifecycle, editable fields, and weight arithmetic.
//!
//! A run is created `in_progress` and ends in exactly one terminal status.
//! While in progress every field may be edited; once terminal only the
//! notes remain editable.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::validate_non_negative;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    /// Wire/database string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Whether a run may move from `self` to `next`.
    pub fn can_transition_to(self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (
                Self::InProgress,
                Self::Completed | Self::Failed | Self::Cancelled
            )
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a status change, returning `CoreError::Conflict` when illegal.
pub fn validate_transition(from: RunStatus, to: RunStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot change production run status from '{from}' to '{to}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// Fields of a production run a client may submit in an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunField {
    Printer,
    StartedAt,
    EstimatedPrintTime,
    EstimatedModelWeight,
    EstimatedFlushedWeight,
    EstimatedTowerWeight,
    ActualModelWeight,
    ActualFlushedWeight,
    ActualTowerWeight,
    Items,
    Materials,
    Notes,
}

impl RunField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Printer => "printer",
            Self::StartedAt => "started_at",
            Self::EstimatedPrintTime => "estimated_print_time",
            Self::EstimatedModelWeight => "estimated_model_weight",
            Self::EstimatedFlushedWeight => "estimated_flushed_weight",
            Self::EstimatedTowerWeight => "estimated_tower_weight",
            Self::ActualModelWeight => "actual_model_weight",
            Self::ActualFlushedWeight => "actual_flushed_weight",
            Self::ActualTowerWeight => "actual_tower_weight",
            Self::Items => "items",
            Self::Materials => "materials",
            Self::Notes => "notes",
        }
    }
}

/// Every editable field.
pub const ALL_RUN_FIELDS: &[RunField] = &[
    RunField::Printer,
    RunField::StartedAt,
    RunField::EstimatedPrintTime,
    RunField::EstimatedModelWeight,
    RunField::EstimatedFlushedWeight,
    RunField::EstimatedTowerWeight,
    RunField::ActualModelWeight,
    RunField::ActualFlushedWeight,
    RunField::ActualTowerWeight,
    RunField::Items,
    RunField::Materials,
    RunField::Notes,
];

const TERMINAL_RUN_FIELDS: &[RunField] = &[RunField::Notes];

/// Fields a client may edit while the run is in `status`.
pub fn editable_fields(status: RunStatus) -> &'static [RunField] {
    if status.is_terminal() {
        TERMINAL_RUN_FIELDS
    } else {
        ALL_RUN_FIELDS
    }
}

/// Reject an update touching fields that are locked in `status`.
pub fn validate_update(status: RunStatus, fields: &[RunField]) -> Result<(), CoreError> {
    let allowed = editable_fields(status);
    let locked: Vec<&str> = fields
        .iter()
        .filter(|f| !allowed.contains(*f))
        .map(|f| f.as_str())
        .collect();

    if locked.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Production run is {status}; locked fields: {}",
            locked.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Weights & variance
// ---------------------------------------------------------------------------

/// Estimated and recorded material weights for a run, in grams.
///
/// The total is split into the printed model, purge/flush waste, and the
/// prime tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunWeights {
    pub estimated_model_grams: f64,
    #[serde(default)]
    pub estimated_flushed_grams: f64,
    #[serde(default)]
    pub estimated_tower_grams: f64,
    #[serde(default)]
    pub actual_model_grams: Option<f64>,
    #[serde(default)]
    pub actual_flushed_grams: Option<f64>,
    #[serde(default)]
    pub actual_tower_grams: Option<f64>,
}

impl RunWeights {
    pub fn estimated_total(&self) -> f64 {
        self.estimated_model_grams + self.estimated_flushed_grams + self.estimated_tower_grams
    }

    /// Sum of the recorded actuals, or `None` until all three are recorded.
    pub fn actual_total(&self) -> Option<f64> {
        Some(self.actual_model_grams? + self.actual_flushed_grams? + self.actual_tower_grams?)
    }

    /// Variance of the recorded actual total against the estimate.
    pub fn variance(&self) -> Option<RunVariance> {
        self.actual_total()
            .map(|actual| compute_variance(self.estimated_total(), actual))
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_non_negative(self.estimated_model_grams, "estimated_model_grams")?;
        validate_non_negative(self.estimated_flushed_grams, "estimated_flushed_grams")?;
        validate_non_negative(self.estimated_tower_grams, "estimated_tower_grams")?;
        let actuals = [
            (self.actual_model_grams, "actual_model_grams"),
            (self.actual_flushed_grams, "actual_flushed_grams"),
            (self.actual_tower_grams, "actual_tower_grams"),
        ];
        for (value, name) in actuals {
            if let Some(v) = value {
                validate_non_negative(v, name)?;
            }
        }
        Ok(())
    }
}

/// Difference between actual and estimated material use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunVariance {
    /// `actual - estimated`; positive means more material was used.
    pub grams: f64,
    /// `grams / estimated * 100`; `0.0` when the estimate is zero.
    pub percentage: f64,
}

pub fn compute_variance(estimated_grams: f64, actual_grams: f64) -> RunVariance {
    let grams = actual_grams - estimated_grams;
    let percentage = if estimated_grams > 0.0 {
        grams / estimated_grams * 100.0
    } else {
        0.0
    };
    RunVariance { grams, percentage }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

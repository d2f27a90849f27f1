//! Spool inventory snapshots and transaction arithmetic.
//!
//! A spool's remaining weight is owned by the backend and moved by inventory
//! transactions. This module provides the snapshot type the planners read,
//! the lookup trait they read it through, and the pure weight arithmetic for
//! applying a transaction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::validate_non_negative;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Spool snapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of a filament spool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoolSnapshot {
    pub id: EntityId,
    pub material_type: String,
    pub color: String,
    /// Remaining filament in grams.
    pub current_weight_grams: f64,
    /// Net filament weight when the spool was new. `None` if never recorded.
    #[serde(default)]
    pub initial_weight_grams: Option<f64>,
    pub is_active: bool,
}

impl SpoolSnapshot {
    /// Remaining filament as a percentage of the initial weight.
    ///
    /// Returns `0.0` when no positive initial weight is recorded.
    pub fn remaining_percentage(&self) -> f64 {
        match self.initial_weight_grams {
            Some(initial) if initial > 0.0 => self.current_weight_grams / initial * 100.0,
            _ => 0.0,
        }
    }

    /// Reject negative or non-finite stock weights.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_non_negative(self.current_weight_grams, "current_weight_grams")?;
        if let Some(initial) = self.initial_weight_grams {
            validate_non_negative(initial, "initial_weight_grams")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Read access to spool snapshots by id.
pub trait SpoolLookup {
    fn spool(&self, id: &EntityId) -> Option<&SpoolSnapshot>;
}

impl SpoolLookup for HashMap<EntityId, SpoolSnapshot> {
    fn spool(&self, id: &EntityId) -> Option<&SpoolSnapshot> {
        self.get(id)
    }
}

/// Linear scan; fine for the handful of spools a planning view carries.
impl SpoolLookup for [SpoolSnapshot] {
    fn spool(&self, id: &EntityId) -> Option<&SpoolSnapshot> {
        self.iter().find(|s| s.id == *id)
    }
}

impl SpoolLookup for Vec<SpoolSnapshot> {
    fn spool(&self, id: &EntityId) -> Option<&SpoolSnapshot> {
        self.as_slice().spool(id)
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Kind of inventory movement recorded against a spool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Filament added (new stock, refill).
    Purchase,
    /// Filament consumed by printing.
    Usage,
    /// Manual correction after weighing; signed delta.
    Adjustment,
}

impl TransactionType {
    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Usage => "Usage",
            Self::Adjustment => "Adjustment",
        }
    }
}

/// Compute a spool's remaining weight after a transaction.
///
/// `grams` is a magnitude for purchases and usages and a signed delta for
/// adjustments. The spool itself is not mutated; callers persist the result.
pub fn apply_transaction(
    spool: &SpoolSnapshot,
    kind: TransactionType,
    grams: f64,
) -> Result<f64, CoreError> {
    if !grams.is_finite() {
        return Err(CoreError::Validation(format!(
            "Transaction amount must be a finite number, got {grams}"
        )));
    }

    let new_weight = match kind {
        TransactionType::Purchase => {
            validate_non_negative(grams, "Purchase amount")?;
            spool.current_weight_grams + grams
        }
        TransactionType::Usage => {
            validate_non_negative(grams, "Usage amount")?;
            spool.current_weight_grams - grams
        }
        TransactionType::Adjustment => spool.current_weight_grams + grams,
    };

    if new_weight < 0.0 {
        return Err(CoreError::Validation(format!(
            "{} of {grams}g would leave spool {} at {new_weight}g",
            kind.label(),
            spool.id,
        )));
    }

    Ok(new_weight)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

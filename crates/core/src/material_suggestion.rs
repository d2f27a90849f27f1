//! Material suggestions for production run planning.
//!
//! Given the models selected into a run (with quantities) and each model's
//! bill of materials, computes how much filament every spool must supply,
//! which models the demand comes from, and whether the spool can cover it.
//!
//! Zero-gram usages (zero quantity or zero per-unit weight) are listed in a
//! spool's contributions but do not count toward its `model_count`.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::inventory::SpoolLookup;
use crate::threshold_validation::validate_non_negative;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One bill-of-materials line: a spool and the grams one unit consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub spool_id: EntityId,
    pub weight_grams_per_unit: f64,
}

/// A printable model together with its bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBom {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub bom: Vec<BomLine>,
}

/// A model chosen for a production run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub model_id: EntityId,
    pub quantity: u32,
}

/// Read access to model BOMs by id.
pub trait ModelLookup {
    fn model(&self, id: &EntityId) -> Option<&ModelBom>;
}

impl ModelLookup for HashMap<EntityId, ModelBom> {
    fn model(&self, id: &EntityId) -> Option<&ModelBom> {
        self.get(id)
    }
}

impl ModelLookup for [ModelBom] {
    fn model(&self, id: &EntityId) -> Option<&ModelBom> {
        self.iter().find(|m| m.id == *id)
    }
}

impl ModelLookup for Vec<ModelBom> {
    fn model(&self, id: &EntityId) -> Option<&ModelBom> {
        self.as_slice().model(id)
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Grams one selected model draws from a spool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialContribution {
    pub model_id: EntityId,
    pub model_name: String,
    pub grams: f64,
}

/// Aggregated demand on a single spool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSuggestion {
    pub spool_id: EntityId,
    /// `None` when the spool was not found in the lookup.
    pub material_type: Option<String>,
    pub color: Option<String>,
    pub total_grams: f64,
    pub contributions: Vec<MaterialContribution>,
    /// Distinct models drawing more than zero grams from this spool.
    pub model_count: usize,
    /// Remaining weight at snapshot time; `0.0` for unknown spools.
    pub current_weight_grams: f64,
    pub spool_found: bool,
    pub low_inventory: bool,
    pub inactive: bool,
}

impl MaterialSuggestion {
    /// Grams missing to cover the requirement (`0.0` when stock suffices).
    pub fn shortfall_grams(&self) -> f64 {
        (self.total_grams - self.current_weight_grams).max(0.0)
    }

    /// Whether the UI should surface a warning for this spool.
    pub fn needs_attention(&self) -> bool {
        self.low_inventory || self.inactive
    }
}

/// Result of [`aggregate_materials`]: spool suggestions in first-encounter
/// order plus any selected model ids the lookup could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaterialSuggestions {
    pub spools: IndexMap<EntityId, MaterialSuggestion>,
    pub unresolved_models: Vec<EntityId>,
}

impl MaterialSuggestions {
    pub fn get(&self, spool_id: &EntityId) -> Option<&MaterialSuggestion> {
        self.spools.get(spool_id)
    }

    pub fn len(&self) -> usize {
        self.spools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialSuggestion> {
        self.spools.values()
    }

    /// Suggestions flagged low-inventory or inactive, in suggestion order.
    pub fn warnings(&self) -> impl Iterator<Item = &MaterialSuggestion> {
        self.spools.values().filter(|s| s.needs_attention())
    }

    /// Total grams across every spool.
    pub fn total_grams(&self) -> f64 {
        self.spools.values().map(|s| s.total_grams).sum()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SpoolDemand {
    total_grams: f64,
    contributions: Vec<MaterialContribution>,
}

/// Aggregate spool demand across every selected model.
///
/// Each BOM line contributes `weight_grams_per_unit * quantity` to its
/// spool. Totals are plain `f64` sums; any rounding is left to display.
/// Unknown models contribute nothing and are listed once in
/// `unresolved_models`. Unknown spools are reported as inactive with zero
/// stock.
pub fn aggregate_materials<M, S>(
    selections: &[ModelSelection],
    models: &M,
    spools: &S,
) -> MaterialSuggestions
where
    M: ModelLookup + ?Sized,
    S: SpoolLookup + ?Sized,
{
    let mut demand: IndexMap<EntityId, SpoolDemand> = IndexMap::new();
    let mut unresolved_models: Vec<EntityId> = Vec::new();

    for selection in selections {
        let Some(model) = models.model(&selection.model_id) else {
            if !unresolved_models.contains(&selection.model_id) {
                unresolved_models.push(selection.model_id);
            }
            continue;
        };

        for line in &model.bom {
            let grams = line.weight_grams_per_unit * f64::from(selection.quantity);
            let entry = demand.entry(line.spool_id).or_default();
            entry.total_grams += grams;
            entry.contributions.push(MaterialContribution {
                model_id: model.id,
                model_name: model.name.clone(),
                grams,
            });
        }
    }

    let entries = demand
        .into_iter()
        .map(|(spool_id, d)| (spool_id, finalize(spool_id, d, spools)))
        .collect();

    MaterialSuggestions {
        spools: entries,
        unresolved_models,
    }
}

fn finalize<S>(spool_id: EntityId, demand: SpoolDemand, spools: &S) -> MaterialSuggestion
where
    S: SpoolLookup + ?Sized,
{
    let model_count = demand
        .contributions
        .iter()
        .filter(|c| c.grams > 0.0)
        .map(|c| c.model_id)
        .collect::<HashSet<_>>()
        .len();

    let snapshot = spools.spool(&spool_id);
    let current_weight_grams = snapshot.map_or(0.0, |s| s.current_weight_grams);
    let is_active = snapshot.is_some_and(|s| s.is_active);

    MaterialSuggestion {
        spool_id,
        material_type: snapshot.map(|s| s.material_type.clone()),
        color: snapshot.map(|s| s.color.clone()),
        total_grams: demand.total_grams,
        contributions: demand.contributions,
        model_count,
        current_weight_grams,
        spool_found: snapshot.is_some(),
        low_inventory: demand.total_grams > current_weight_grams,
        inactive: !is_active,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject BOM lines with negative or non-finite per-unit weights.
///
/// [`aggregate_materials`] itself never fails; callers accepting untrusted
/// BOMs validate them first.
pub fn validate_boms(models: &[ModelBom]) -> Result<(), CoreError> {
    for model in models {
        for line in &model.bom {
            validate_non_negative(
                line.weight_grams_per_unit,
                &format!("BOM weight for spool {} in model '{}'", line.spool_id, model.name),
            )?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Single-shot descriptor-to-estimate transformation.

use crate::descriptor::DisasterDescriptor;
use crate::features::PredictError;
use crate::model::PopulationModel;
use crate::resources::{resource_requirements, ResourceKind};

/// One prediction outcome: the affected-population estimate plus the four
/// derived resource quantities, in [`ResourceKind::ALL`] order. Recomputed
/// on every trigger action and discarded after display.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEstimate {
    pub population: u64,
    pub resources: [(ResourceKind, f64); 4],
}

/// Map one descriptor to one estimate against the loaded model.
///
/// The raw regressor output is truncated toward zero, then clamped at zero:
/// population counts cannot be negative, and the model does not guarantee
/// its output is. Pure function of (model, descriptor): invoking it twice
/// with the same inputs yields the same estimate.
pub fn estimate_impact(
    model: &PopulationModel,
    descriptor: &DisasterDescriptor,
) -> Result<ImpactEstimate, PredictError> {
    let raw = model.predict_population(descriptor)?;
    let population = raw.trunc().max(0.0) as u64;
    Ok(ImpactEstimate {
        population,
        resources: resource_requirements(population),
    })
}

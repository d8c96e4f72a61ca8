use crate::basic_types::ModelError;
use crate::engine::variables::BoolVar;
use crate::propagation::PropagatorId;
use crate::propagators::ClausePropagatorArgs;
use crate::Space;

/// Post the constraint that at least one of the literals is true.
pub fn clause(
    space: &mut Space,
    literals: impl Into<Box<[BoolVar]>>,
) -> Result<PropagatorId, ModelError> {
    space.post(ClausePropagatorArgs {
        literals: literals.into(),
    })
}

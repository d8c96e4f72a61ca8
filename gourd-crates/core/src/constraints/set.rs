use crate::basic_types::ModelError;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::SetVar;
use crate::propagation::PropagatorId;
use crate::propagators::SetCardinalityPropagatorArgs;
use crate::Space;

/// Post the constraint `|set| = cardinality`.
pub fn set_cardinality<Var: IntegerVariable>(
    space: &mut Space,
    set: SetVar,
    cardinality: Var,
) -> Result<PropagatorId, ModelError> {
    space.post(SetCardinalityPropagatorArgs { set, cardinality })
}

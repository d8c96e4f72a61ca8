use crate::basic_types::ModelError;
use crate::engine::variables::FloatVar;
use crate::propagation::PropagatorId;
use crate::propagators::FloatLessOrEqualPropagatorArgs;
use crate::Space;

/// Post the constraint `a <= b` over float variables.
pub fn float_less_or_equal(
    space: &mut Space,
    a: FloatVar,
    b: FloatVar,
) -> Result<PropagatorId, ModelError> {
    space.post(FloatLessOrEqualPropagatorArgs { a, b })
}

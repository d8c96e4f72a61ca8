use crate::basic_types::ModelError;
use crate::containers::HashSet;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::propagation::PropagatorId;
use crate::propagators::AllDifferentPropagatorArgs;
use crate::Space;

/// Post the constraint that all the given variables take pairwise distinct values.
///
/// The variables must be views over distinct integer variables, otherwise
/// [`ModelError::DuplicateVariable`] is returned.
pub fn all_different<Var: IntegerVariable>(
    space: &mut Space,
    variables: impl Into<Box<[Var]>>,
) -> Result<PropagatorId, ModelError> {
    let variables: Box<[Var]> = variables.into();

    let mut seen: HashSet<DomainId> = HashSet::default();
    if !variables
        .iter()
        .all(|variable| seen.insert(variable.domain_id()))
    {
        return Err(ModelError::DuplicateVariable);
    }

    space.post(AllDifferentPropagatorArgs { variables })
}

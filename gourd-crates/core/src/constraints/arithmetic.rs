use crate::basic_types::ModelError;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;
use crate::propagation::PropagatorId;
use crate::propagators::arithmetic::BinaryLessOrEqualPropagatorArgs;
use crate::propagators::arithmetic::BinaryNotEqualsPropagatorArgs;
use crate::propagators::arithmetic::LinearEqualPropagatorArgs;
use crate::propagators::arithmetic::LinearLessOrEqualPropagatorArgs;
use crate::Space;

/// Post the constraint `a != b`.
pub fn not_equals<AVar, BVar>(space: &mut Space, a: AVar, b: BVar) -> Result<PropagatorId, ModelError>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    not_equals_with_offset(space, a, b, 0)
}

/// Post the constraint `a != b + offset`.
pub fn not_equals_with_offset<AVar, BVar>(
    space: &mut Space,
    a: AVar,
    b: BVar,
    offset: i32,
) -> Result<PropagatorId, ModelError>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    space.post(BinaryNotEqualsPropagatorArgs { a, b, offset })
}

/// Post the constraint `a <= b`.
pub fn less_or_equal<AVar, BVar>(
    space: &mut Space,
    a: AVar,
    b: BVar,
) -> Result<PropagatorId, ModelError>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    less_or_equal_with_offset(space, a, b, 0)
}

/// Post the constraint `a < b`.
pub fn less_than<AVar, BVar>(space: &mut Space, a: AVar, b: BVar) -> Result<PropagatorId, ModelError>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    less_or_equal_with_offset(space, a, b, 1)
}

/// Post the constraint `a + offset <= b`.
pub fn less_or_equal_with_offset<AVar, BVar>(
    space: &mut Space,
    a: AVar,
    b: BVar,
    offset: i32,
) -> Result<PropagatorId, ModelError>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    space.post(BinaryLessOrEqualPropagatorArgs { a, b, offset })
}

/// Post the constraint `sum terms <= rhs`.
pub fn linear_less_or_equal<Var: IntegerVariable>(
    space: &mut Space,
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> Result<PropagatorId, ModelError> {
    space.post(LinearLessOrEqualPropagatorArgs {
        terms: terms.into(),
        rhs,
    })
}

/// Post the constraint `sum terms = rhs`.
pub fn linear_equal<Var: IntegerVariable>(
    space: &mut Space,
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> Result<PropagatorId, ModelError> {
    space.post(LinearEqualPropagatorArgs {
        terms: terms.into(),
        rhs,
    })
}

/// Post the constraint `sum weights[i] * variables[i] <= rhs`.
pub fn weighted_less_or_equal<Var: IntegerVariable>(
    space: &mut Space,
    weights: &[i32],
    variables: &[Var],
    rhs: i32,
) -> Result<PropagatorId, ModelError> {
    let terms = scale(weights, variables)?;
    linear_less_or_equal(space, terms, rhs)
}

/// Post the constraint `sum weights[i] * variables[i] = rhs`.
pub fn weighted_equal<Var: IntegerVariable>(
    space: &mut Space,
    weights: &[i32],
    variables: &[Var],
    rhs: i32,
) -> Result<PropagatorId, ModelError> {
    let terms = scale(weights, variables)?;
    linear_equal(space, terms, rhs)
}

fn scale<Var: IntegerVariable>(
    weights: &[i32],
    variables: &[Var],
) -> Result<Vec<Var::AffineView>, ModelError> {
    if weights.len() != variables.len() {
        return Err(ModelError::SizeMismatch {
            left: weights.len(),
            right: variables.len(),
        });
    }
    if weights.contains(&0) {
        return Err(ModelError::InvalidOption(
            "weights of a linear constraint must be non-zero".to_owned(),
        ));
    }

    Ok(weights
        .iter()
        .zip(variables)
        .map(|(&weight, variable)| variable.scaled(weight))
        .collect())
}

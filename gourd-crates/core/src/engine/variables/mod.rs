//! The handles through which models, propagators and branchers refer to variables.
//!
//! A handle is a plain index into the [`VariableStore`](crate::engine::VariableStore) of a
//! space, so the same handle denotes the corresponding variable in every clone of that space.
mod affine_view;
mod bool_var;
mod domain_id;
mod float_var;
mod integer_variable;
mod set_var;
mod transformable_variable;

pub use affine_view::AffineView;
pub use bool_var::BoolVar;
pub use domain_id::DomainId;
pub use float_var::FloatVar;
pub use integer_variable::IntegerVariable;
pub use set_var::SetVar;
pub use transformable_variable::TransformableVariable;

/// A reference to a variable of any kind, used to key subscriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum VariableRef {
    Integer(DomainId),
    Set(SetVar),
    Float(FloatVar),
}

impl From<DomainId> for VariableRef {
    fn from(domain: DomainId) -> Self {
        VariableRef::Integer(domain)
    }
}

impl From<SetVar> for VariableRef {
    fn from(set: SetVar) -> Self {
        VariableRef::Set(set)
    }
}

impl From<FloatVar> for VariableRef {
    fn from(float: FloatVar) -> Self {
        VariableRef::Float(float)
    }
}

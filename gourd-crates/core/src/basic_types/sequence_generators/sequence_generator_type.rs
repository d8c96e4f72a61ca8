use super::ConstantSequence;
use super::GeometricSequence;
use super::LubySequence;
use super::SequenceGenerator;

/// The kinds of cutoff sequences which can be used between restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SequenceGeneratorType {
    Constant,
    Geometric,
    #[default]
    Luby,
}

impl SequenceGeneratorType {
    /// Create the sequence; `multiplication_factor` is only used by the geometric sequence.
    pub fn create(self, base_value: i64, multiplication_factor: f64) -> Box<dyn SequenceGenerator> {
        match self {
            SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base_value)),
            SequenceGeneratorType::Geometric => {
                Box::new(GeometricSequence::new(base_value, multiplication_factor))
            }
            SequenceGeneratorType::Luby => Box::new(LubySequence::new(base_value)),
        }
    }
}

impl std::fmt::Display for SequenceGeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceGeneratorType::Constant => write!(f, "constant"),
            SequenceGeneratorType::Geometric => write!(f, "geometric"),
            SequenceGeneratorType::Luby => write!(f, "luby"),
        }
    }
}

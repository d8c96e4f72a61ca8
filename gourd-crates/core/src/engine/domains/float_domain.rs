use super::Narrowing;
use crate::engine::ModEvent;

/// A closed interval of reals `[lower_bound, upper_bound]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatDomain {
    lower_bound: f64,
    upper_bound: f64,
}

impl FloatDomain {
    pub fn new(lower_bound: f64, upper_bound: f64) -> Option<FloatDomain> {
        (lower_bound <= upper_bound).then_some(FloatDomain {
            lower_bound,
            upper_bound,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    pub fn median(&self) -> f64 {
        self.lower_bound + self.width() / 2.0
    }

    pub fn is_assigned(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    pub(crate) fn event_towards(&self, narrowed: &FloatDomain) -> ModEvent {
        if narrowed == self {
            ModEvent::None
        } else if narrowed.is_assigned() {
            ModEvent::Assigned
        } else {
            ModEvent::Bounds
        }
    }

    pub(crate) fn with_upper_bound(&self, value: f64) -> Narrowing<FloatDomain> {
        if value >= self.upper_bound {
            Narrowing::Unchanged
        } else if value < self.lower_bound {
            Narrowing::Empty
        } else {
            Narrowing::Changed(FloatDomain {
                upper_bound: value,
                ..*self
            })
        }
    }

    pub(crate) fn with_lower_bound(&self, value: f64) -> Narrowing<FloatDomain> {
        if value <= self.lower_bound {
            Narrowing::Unchanged
        } else if value > self.upper_bound {
            Narrowing::Empty
        } else {
            Narrowing::Changed(FloatDomain {
                lower_bound: value,
                ..*self
            })
        }
    }
}

impl std::fmt::Display for FloatDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower_bound, self.upper_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_narrow_the_interval() {
        let domain = FloatDomain::new(0.0, 1.0).unwrap();
        let Narrowing::Changed(narrowed) = domain.with_upper_bound(0.25) else {
            panic!("expected a change");
        };
        assert_eq!(narrowed.upper_bound(), 0.25);
        assert_eq!(domain.event_towards(&narrowed), ModEvent::Bounds);
        assert_eq!(narrowed.with_lower_bound(0.5), Narrowing::Empty);
    }
}

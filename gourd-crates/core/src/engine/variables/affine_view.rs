use std::cmp::Ordering;

use super::DomainId;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::ModEvent;
use crate::engine::VariableStore;
use crate::math::num_ext::NumExt;

/// Models `y = scale * x + offset` by expressing the domain of `y` as a transformation of the
/// domain of `x`.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "Multiplication by zero is not invertable");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    /// Go from a value in the domain of `self` to a value in the domain of `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i32 {
        let inverted_translation = value - self.offset;

        match rounding {
            Rounding::Up => <i32 as NumExt>::div_ceil(inverted_translation, self.scale),
            Rounding::Down => <i32 as NumExt>::div_floor(inverted_translation, self.scale),
        }
    }

    /// The exact preimage of `value`, if there is one.
    fn preimage(&self, value: i32) -> Option<i32> {
        ((value - self.offset) % self.scale == 0).then(|| (value - self.offset) / self.scale)
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn domain_id(&self) -> DomainId {
        self.inner.domain_id()
    }

    fn lower_bound(&self, store: &VariableStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(store))
        } else {
            self.map(self.inner.lower_bound(store))
        }
    }

    fn upper_bound(&self, store: &VariableStore) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(store))
        } else {
            self.map(self.inner.upper_bound(store))
        }
    }

    fn contains(&self, store: &VariableStore, value: i32) -> bool {
        self.preimage(value)
            .is_some_and(|inverted| self.inner.contains(store, inverted))
    }

    fn size(&self, store: &VariableStore) -> u64 {
        self.inner.size(store)
    }

    fn iterate_domain(&self, store: &VariableStore) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(store)
            .map(|value| self.map(value))
    }

    fn set_lower_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        if self.scale < 0 {
            self.inner
                .set_upper_bound(store, self.invert(value, Rounding::Down))
        } else {
            self.inner
                .set_lower_bound(store, self.invert(value, Rounding::Up))
        }
    }

    fn set_upper_bound(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        if self.scale < 0 {
            self.inner
                .set_lower_bound(store, self.invert(value, Rounding::Up))
        } else {
            self.inner
                .set_upper_bound(store, self.invert(value, Rounding::Down))
        }
    }

    fn assign(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        match self.preimage(value) {
            Some(inverted) => self.inner.assign(store, inverted),
            None => ModEvent::Failed,
        }
    }

    fn remove(&self, store: &mut VariableStore, value: i32) -> ModEvent {
        match self.preimage(value) {
            Some(inverted) => self.inner.remove(store, inverted),
            None => ModEvent::None,
        }
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.scale *= scale;
        result.offset *= scale;
        result
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        let mut result = self.clone();
        result.offset += offset;
        result
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset)?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

enum Rounding {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::IntDomain;

    fn store_with(lower_bound: i32, upper_bound: i32) -> (VariableStore, DomainId) {
        let mut store = VariableStore::default();
        let domain = store.new_integer(IntDomain::interval(lower_bound, upper_bound).unwrap());
        (store, domain)
    }

    #[test]
    fn negative_scale_swaps_the_bounds() {
        let (store, x) = store_with(1, 4);
        let view = x.scaled(-2).offset(3);

        assert_eq!(view.lower_bound(&store), -5);
        assert_eq!(view.upper_bound(&store), 1);
        assert!(view.contains(&store, -1));
        assert!(!view.contains(&store, 0));
    }

    #[test]
    fn bounds_are_rounded_towards_the_inner_domain() {
        let (mut store, x) = store_with(0, 10);
        let view = x.scaled(3);

        assert_eq!(view.set_upper_bound(&mut store, 10), ModEvent::Bounds);
        assert_eq!(x.upper_bound(&store), 3);

        assert_eq!(view.set_lower_bound(&mut store, 4), ModEvent::Bounds);
        assert_eq!(x.lower_bound(&store), 2);
    }

    #[test]
    fn values_outside_the_image_are_not_removable() {
        let (mut store, x) = store_with(0, 3);
        let view = x.scaled(2);

        assert_eq!(view.remove(&mut store, 3), ModEvent::None);
        assert_eq!(view.assign(&mut store, 3), ModEvent::Failed);
        assert_eq!(x.size(&store), 4);
    }

    #[test]
    fn domain_iteration_follows_the_mapping() {
        let (store, x) = store_with(1, 3);
        let values: Vec<i32> = x.offset(10).iterate_domain(&store).collect();

        assert_eq!(values, vec![11, 12, 13]);
    }
}

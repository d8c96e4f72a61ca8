use itertools::Itertools;

use super::Narrowing;
use crate::engine::ModEvent;

/// A finite set variable domain: the sets `s` with `glb ⊆ s ⊆ lub` and
/// `card_min <= |s| <= card_max`.
///
/// The domain is kept normalised: the cardinality bounds are tightened by the sizes of the
/// greatest lower bound and least upper bound, and when the cardinality forces it, the bounds are
/// collapsed into each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SetDomain {
    glb: Vec<i32>,
    lub: Vec<i32>,
    card_min: u32,
    card_max: u32,
}

impl SetDomain {
    pub fn new(
        glb: impl IntoIterator<Item = i32>,
        lub: impl IntoIterator<Item = i32>,
        card_min: u32,
        card_max: u32,
    ) -> Option<SetDomain> {
        let glb = glb.into_iter().sorted_unstable().dedup().collect_vec();
        let lub = lub.into_iter().sorted_unstable().dedup().collect_vec();
        if glb.iter().any(|value| lub.binary_search(value).is_err()) {
            return None;
        }
        SetDomain {
            glb,
            lub,
            card_min,
            card_max,
        }
        .normalised()
    }

    /// Elements which are known to be in the set.
    pub fn glb(&self) -> &[i32] {
        &self.glb
    }

    /// Elements which may be in the set.
    pub fn lub(&self) -> &[i32] {
        &self.lub
    }

    pub fn cardinality_min(&self) -> u32 {
        self.card_min
    }

    pub fn cardinality_max(&self) -> u32 {
        self.card_max
    }

    pub fn is_assigned(&self) -> bool {
        self.glb.len() == self.lub.len()
    }

    /// Elements of the least upper bound which are not yet decided.
    pub fn unknown(&self) -> impl Iterator<Item = i32> + '_ {
        self.lub
            .iter()
            .copied()
            .filter(|value| self.glb.binary_search(value).is_err())
    }

    pub fn is_included(&self, value: i32) -> bool {
        self.glb.binary_search(&value).is_ok()
    }

    pub fn may_contain(&self, value: i32) -> bool {
        self.lub.binary_search(&value).is_ok()
    }

    pub(crate) fn event_towards(&self, narrowed: &SetDomain) -> ModEvent {
        if narrowed == self {
            ModEvent::None
        } else if narrowed.is_assigned() {
            ModEvent::Assigned
        } else if narrowed.glb != self.glb || narrowed.lub != self.lub {
            ModEvent::Domain
        } else {
            ModEvent::Bounds
        }
    }

    pub(crate) fn including(&self, value: i32) -> Narrowing<SetDomain> {
        if self.is_included(value) {
            return Narrowing::Unchanged;
        }
        if !self.may_contain(value) {
            return Narrowing::Empty;
        }
        let mut narrowed = self.clone();
        let position = narrowed.glb.partition_point(|&element| element < value);
        narrowed.glb.insert(position, value);
        Self::changed(narrowed)
    }

    pub(crate) fn excluding(&self, value: i32) -> Narrowing<SetDomain> {
        if !self.may_contain(value) {
            return Narrowing::Unchanged;
        }
        if self.is_included(value) {
            return Narrowing::Empty;
        }
        let mut narrowed = self.clone();
        narrowed.lub.retain(|&element| element != value);
        Self::changed(narrowed)
    }

    pub(crate) fn with_cardinality(&self, min: u32, max: u32) -> Narrowing<SetDomain> {
        let mut narrowed = self.clone();
        narrowed.card_min = narrowed.card_min.max(min);
        narrowed.card_max = narrowed.card_max.min(max);
        if narrowed == *self {
            return Narrowing::Unchanged;
        }
        Self::changed(narrowed)
    }

    fn changed(narrowed: SetDomain) -> Narrowing<SetDomain> {
        match narrowed.normalised() {
            Some(domain) => Narrowing::Changed(domain),
            None => Narrowing::Empty,
        }
    }

    fn normalised(mut self) -> Option<SetDomain> {
        self.card_min = self.card_min.max(self.glb.len() as u32);
        self.card_max = self.card_max.min(self.lub.len() as u32);
        if self.card_min > self.card_max {
            return None;
        }
        if self.glb.len() as u32 == self.card_max {
            self.lub = self.glb.clone();
        } else if self.lub.len() as u32 == self.card_min {
            self.glb = self.lub.clone();
        }
        Some(self)
    }
}

impl std::fmt::Display for SetDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_assigned() {
            write!(f, "{{{}}}", self.glb.iter().join(", "))
        } else {
            write!(
                f,
                "{{{}}}..{{{}}}#[{}, {}]",
                self.glb.iter().join(", "),
                self.lub.iter().join(", "),
                self.card_min,
                self.card_max
            )
        }
    }
}

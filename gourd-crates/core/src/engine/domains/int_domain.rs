use std::cmp::Ordering;

use itertools::Itertools;

use super::Narrowing;
use crate::engine::ModEvent;
use crate::gourd_assert_moderate;

/// A finite set of integers, stored as a sorted list of disjoint and non-adjacent closed ranges.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntDomain {
    ranges: Vec<(i32, i32)>,
    size: u64,
}

impl IntDomain {
    /// Create the domain `[lower_bound, upper_bound]`; returns [`None`] if it would be empty.
    pub fn interval(lower_bound: i32, upper_bound: i32) -> Option<IntDomain> {
        (lower_bound <= upper_bound).then(|| IntDomain {
            ranges: vec![(lower_bound, upper_bound)],
            size: range_size(lower_bound, upper_bound),
        })
    }

    /// Create a domain containing exactly the given values; returns [`None`] if there are none.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<IntDomain> {
        let sorted = values.into_iter().sorted_unstable().dedup();
        Self::from_sorted_values(sorted)
    }

    fn from_sorted_values(values: impl Iterator<Item = i32>) -> Option<IntDomain> {
        let mut ranges: Vec<(i32, i32)> = Vec::new();
        for value in values {
            match ranges.last_mut() {
                Some((_, last)) if *last as i64 + 1 == value as i64 => *last = value,
                _ => ranges.push((value, value)),
            }
        }
        Self::from_ranges(ranges)
    }

    fn from_ranges(ranges: Vec<(i32, i32)>) -> Option<IntDomain> {
        if ranges.is_empty() {
            return None;
        }
        let size = ranges.iter().map(|&(lb, ub)| range_size(lb, ub)).sum();
        Some(IntDomain { ranges, size })
    }

    pub fn min(&self) -> i32 {
        self.ranges[0].0
    }

    pub fn max(&self) -> i32 {
        self.ranges[self.ranges.len() - 1].1
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_assigned(&self) -> bool {
        self.size == 1
    }

    /// The width of the domain, `max - min + 1`.
    pub fn width(&self) -> u64 {
        range_size(self.min(), self.max())
    }

    /// The number of maximal ranges in the domain.
    pub fn number_of_ranges(&self) -> usize {
        self.ranges.len()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.ranges
            .binary_search_by(|&(lb, ub)| {
                if ub < value {
                    Ordering::Less
                } else if lb > value {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The greatest value of the domain which is not greater than the median.
    pub fn median(&self) -> i32 {
        self.nth((self.size - 1) / 2)
    }

    /// The `index`-th smallest value of the domain.
    pub fn nth(&self, mut index: u64) -> i32 {
        gourd_assert_moderate!(index < self.size);
        for &(lb, ub) in &self.ranges {
            let size = range_size(lb, ub);
            if index < size {
                return (lb as i64 + index as i64) as i32;
            }
            index -= size;
        }
        self.max()
    }

    /// Iterate over the values in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.ranges.iter().flat_map(|&(lb, ub)| lb..=ub)
    }

    /// Iterate over the maximal ranges in increasing order.
    pub fn ranges(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.ranges.iter().copied()
    }

    /// Whether `self` is a subset of `other`.
    pub fn is_subset_of(&self, other: &IntDomain) -> bool {
        self.ranges.iter().all(|&(lb, ub)| {
            other
                .ranges
                .iter()
                .any(|&(other_lb, other_ub)| other_lb <= lb && ub <= other_ub)
        })
    }

    /// The event describing how `self` was narrowed into `narrowed`.
    pub(crate) fn event_towards(&self, narrowed: &IntDomain) -> ModEvent {
        gourd_assert_moderate!(narrowed.is_subset_of(self));
        if narrowed.size == self.size {
            ModEvent::None
        } else if narrowed.is_assigned() {
            ModEvent::Assigned
        } else if narrowed.min() != self.min() || narrowed.max() != self.max() {
            ModEvent::Bounds
        } else {
            ModEvent::Domain
        }
    }

    pub(crate) fn with_upper_bound(&self, value: i32) -> Narrowing<IntDomain> {
        if value >= self.max() {
            return Narrowing::Unchanged;
        }
        if value < self.min() {
            return Narrowing::Empty;
        }
        let ranges = self
            .ranges
            .iter()
            .take_while(|&&(lb, _)| lb <= value)
            .map(|&(lb, ub)| (lb, ub.min(value)))
            .collect();
        Self::changed(ranges)
    }

    pub(crate) fn with_lower_bound(&self, value: i32) -> Narrowing<IntDomain> {
        if value <= self.min() {
            return Narrowing::Unchanged;
        }
        if value > self.max() {
            return Narrowing::Empty;
        }
        let ranges = self
            .ranges
            .iter()
            .skip_while(|&&(_, ub)| ub < value)
            .map(|&(lb, ub)| (lb.max(value), ub))
            .collect();
        Self::changed(ranges)
    }

    pub(crate) fn with_value(&self, value: i32) -> Narrowing<IntDomain> {
        if !self.contains(value) {
            Narrowing::Empty
        } else if self.is_assigned() {
            Narrowing::Unchanged
        } else {
            Self::changed(vec![(value, value)])
        }
    }

    pub(crate) fn without_value(&self, value: i32) -> Narrowing<IntDomain> {
        if !self.contains(value) {
            return Narrowing::Unchanged;
        }
        if self.is_assigned() {
            return Narrowing::Empty;
        }
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        for &(lb, ub) in &self.ranges {
            if value < lb || value > ub {
                ranges.push((lb, ub));
                continue;
            }
            if lb < value {
                ranges.push((lb, value - 1));
            }
            if value < ub {
                ranges.push((value + 1, ub));
            }
        }
        Self::changed(ranges)
    }

    /// Intersect the domain with the given set of values.
    pub(crate) fn intersected_with(&self, values: &[i32]) -> Narrowing<IntDomain> {
        let retained = values
            .iter()
            .copied()
            .sorted_unstable()
            .dedup()
            .filter(|&value| self.contains(value))
            .collect_vec();
        if retained.is_empty() {
            return Narrowing::Empty;
        }
        if retained.len() as u64 == self.size {
            return Narrowing::Unchanged;
        }
        match Self::from_sorted_values(retained.into_iter()) {
            Some(domain) => Narrowing::Changed(domain),
            None => Narrowing::Empty,
        }
    }

    fn changed(ranges: Vec<(i32, i32)>) -> Narrowing<IntDomain> {
        match Self::from_ranges(ranges) {
            Some(domain) => Narrowing::Changed(domain),
            None => Narrowing::Empty,
        }
    }
}

fn range_size(lower_bound: i32, upper_bound: i32) -> u64 {
    (upper_bound as i64 - lower_bound as i64 + 1) as u64
}

impl std::fmt::Display for IntDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_assigned() {
            return write!(f, "{}", self.min());
        }
        let ranges = self.ranges.iter().format_with(", ", |&(lb, ub), f| {
            if lb == ub {
                f(&lb)
            } else {
                f(&format_args!("{lb}..{ub}"))
            }
        });
        write!(f, "{{{ranges}}}")
    }
}

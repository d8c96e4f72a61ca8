use std::collections::VecDeque;

use enum_map::EnumMap;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::Random;
use crate::containers::KeyedVec;
use crate::propagation::PropagationCost;
use crate::propagation::PropagatorId;

/// The order in which scheduled propagators are executed by the fixpoint loop.
///
/// Propagation is confluent, so every policy reaches the same fixpoint; the policies only differ
/// in how much work is needed to get there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchedulingPolicy {
    /// Cheapest cost class first, first-in first-out within a class.
    #[default]
    CostOrdered,
    /// First-in first-out, ignoring the cost of the propagators.
    Fifo,
    /// A uniformly random scheduled propagator, drawn from a generator with the given seed.
    Randomised { seed: u64 },
}

#[derive(Clone, Debug)]
enum Order {
    CostOrdered,
    Fifo,
    Randomised(SmallRng),
}

/// The set of scheduled propagators.
///
/// Unscheduling a propagator only clears its flag; its entry stays in its queue and is skipped
/// when it is popped.
#[derive(Clone, Debug)]
pub(crate) struct PropagatorQueue {
    queues: EnumMap<PropagationCost, VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    num_enqueued: usize,
    order: Order,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        PropagatorQueue::new(SchedulingPolicy::default())
    }
}

impl PropagatorQueue {
    pub(crate) fn new(policy: SchedulingPolicy) -> PropagatorQueue {
        PropagatorQueue {
            queues: EnumMap::default(),
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            order: match policy {
                SchedulingPolicy::CostOrdered => Order::CostOrdered,
                SchedulingPolicy::Fifo => Order::Fifo,
                SchedulingPolicy::Randomised { seed } => {
                    Order::Randomised(SmallRng::seed_from_u64(seed))
                }
            },
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, cost: PropagationCost) {
        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.accomodate(propagator_id, false);
        self.is_enqueued[propagator_id] = true;
        self.num_enqueued += 1;

        let class = match self.order {
            Order::CostOrdered => cost,
            Order::Fifo | Order::Randomised(_) => PropagationCost::Unary,
        };
        self.queues[class].push_back(propagator_id);
    }

    /// Unschedule the propagator if it is scheduled.
    pub(crate) fn remove(&mut self, propagator_id: PropagatorId) {
        if self.is_propagator_enqueued(propagator_id) {
            self.is_enqueued[propagator_id] = false;
            self.num_enqueued -= 1;
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        while !self.is_empty() {
            let propagator_id = match &mut self.order {
                Order::CostOrdered | Order::Fifo => self
                    .queues
                    .values_mut()
                    .find(|queue| !queue.is_empty())
                    .and_then(|queue| queue.pop_front()),
                Order::Randomised(rng) => {
                    let queue = &mut self.queues[PropagationCost::Unary];
                    let index = rng.generate_usize_in_range(0..queue.len());
                    queue.swap_remove_back(index)
                }
            }?;

            if self.is_propagator_enqueued(propagator_id) {
                self.is_enqueued[propagator_id] = false;
                self.num_enqueued -= 1;
                return Some(propagator_id);
            }
        }

        None
    }

    pub(crate) fn clear(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear();
        }
        for is_propagator_enqueued in self.is_enqueued.iter_mut() {
            *is_propagator_enqueued = false;
        }
        self.num_enqueued = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued
            .get(propagator_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cheaper_classes_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(1), PropagationCost::Unary);
        queue.enqueue_propagator(PropagatorId(0), PropagationCost::Binary);
        queue.enqueue_propagator(PropagatorId(3), PropagationCost::Cubic);
        queue.enqueue_propagator(PropagatorId(4), PropagationCost::LinearHi);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(4)), queue.pop());
        assert_eq!(Some(PropagatorId(3)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn equal_classes_are_first_in_first_out() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(2), PropagationCost::Binary);
        queue.enqueue_propagator(PropagatorId(0), PropagationCost::Binary);
        queue.enqueue_propagator(PropagatorId(2), PropagationCost::Binary);

        assert_eq!(Some(PropagatorId(2)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert!(queue.is_empty());
    }

    #[test]
    fn removed_propagators_are_skipped() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), PropagationCost::Unary);
        queue.enqueue_propagator(PropagatorId(1), PropagationCost::Unary);
        queue.remove(PropagatorId(0));

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(None, queue.pop());

        queue.enqueue_propagator(PropagatorId(0), PropagationCost::Unary);
        assert_eq!(Some(PropagatorId(0)), queue.pop());
    }

    #[test]
    fn randomised_order_pops_every_propagator_once() {
        let mut queue = PropagatorQueue::new(SchedulingPolicy::Randomised { seed: 3 });
        for id in 0..10 {
            queue.enqueue_propagator(PropagatorId(id), PropagationCost::Cubic);
        }

        let mut popped = std::iter::from_fn(|| queue.pop()).collect::<Vec<_>>();
        popped.sort();

        assert_eq!(popped, (0..10).map(PropagatorId).collect::<Vec<_>>());
    }
}

//! Built-in disk-scheduling policies.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS
//! - **Greedy seek**: SSTF
//! - **Sweep**: SCAN, C-SCAN, N-Step SCAN
//! - **Directional greedy**: Eschenbach
//!
//! # Tie Convention
//! Requests with equal sort keys are ordered by ascending id (arrival order).
//!
//! # References
//! - Denning (1967), "Effects of Scheduling on File Memory Operations"
//! - Weingarten (1966), "The Eschenbach Drum Scheme"
//! - Stallings (2018), "Operating Systems", Ch. 11.5: Disk Scheduling

use std::cmp::Reverse;

use super::{HeadContext, SchedulingPolicy};
use crate::config::DEFAULT_NSTEP_GROUP_SIZE;
use crate::models::{Direction, Request};

/// Pending requests in arrival order.
fn by_arrival(pending: &[Request]) -> Vec<&Request> {
    let mut ordered: Vec<&Request> = pending.iter().collect();
    ordered.sort_by_key(|r| r.id);
    ordered
}

/// SCAN over an arbitrary subset; shared by [`Scan`] and [`NStep`].
fn scan_order<'a>(
    requests: impl IntoIterator<Item = &'a Request>,
    context: &HeadContext,
) -> Vec<&'a Request> {
    let (mut below, mut above): (Vec<&Request>, Vec<&Request>) = requests
        .into_iter()
        .partition(|r| r.cylinder <= context.head);
    below.sort_by_key(|r| (Reverse(r.cylinder), r.id));
    above.sort_by_key(|r| (r.cylinder, r.id));

    if context.sweeping_up() {
        above.extend(below);
        above
    } else {
        below.extend(above);
        below
    }
}

// ======================== Arrival-based ========================

/// First-Come, First-Served.
///
/// Serves requests strictly in arrival (id) order. Fair and simple, but
/// ignores head position entirely.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn order<'a>(&self, pending: &'a [Request], _context: &HeadContext) -> Vec<&'a Request> {
        by_arrival(pending)
    }

    fn description(&self) -> &'static str {
        "First-Come, First-Served"
    }
}

// ======================== Greedy seek ========================

/// Shortest Seek Time First.
///
/// Ascending by distance from the head. Minimizes each individual seek but
/// can starve requests far from a busy region.
#[derive(Debug, Clone, Copy)]
pub struct Sstf;

impl SchedulingPolicy for Sstf {
    fn name(&self) -> &'static str {
        "SSTF"
    }

    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request> {
        let mut ordered: Vec<&Request> = pending.iter().collect();
        ordered.sort_by_key(|r| (r.distance_from(context.head), r.id));
        ordered
    }

    fn description(&self) -> &'static str {
        "Shortest Seek Time First"
    }
}

// ======================== Sweep ========================

/// SCAN (elevator).
///
/// Requests at or below the head descend by cylinder; requests above
/// ascend. Moving up (or before the first move) serves the upper side
/// first, moving down serves the lower side first.
#[derive(Debug, Clone, Copy)]
pub struct Scan;

impl SchedulingPolicy for Scan {
    fn name(&self) -> &'static str {
        "SCAN"
    }

    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request> {
        scan_order(pending, context)
    }

    fn description(&self) -> &'static str {
        "Elevator Algorithm"
    }
}

/// Circular SCAN.
///
/// Serves requests at or above the head in ascending order, then wraps to
/// the lowest cylinder and continues upward. Never reverses, which evens
/// out waiting time across the disk.
#[derive(Debug, Clone, Copy)]
pub struct CScan;

impl SchedulingPolicy for CScan {
    fn name(&self) -> &'static str {
        "CSCAN"
    }

    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request> {
        let mut sorted: Vec<&Request> = pending.iter().collect();
        sorted.sort_by_key(|r| (r.cylinder, r.id));
        let (mut ahead, behind): (Vec<&Request>, Vec<&Request>) = sorted
            .into_iter()
            .partition(|r| r.cylinder >= context.head);
        ahead.extend(behind);
        ahead
    }

    fn description(&self) -> &'static str {
        "Circular SCAN"
    }
}

/// N-Step SCAN.
///
/// Splits the pending requests, in arrival order, into groups of `N` and
/// applies SCAN to each group independently with the same head and
/// direction. Groups are emitted in order, so late arrivals cannot jump
/// ahead of an earlier group.
#[derive(Debug, Clone, Copy)]
pub struct NStep {
    /// Group size (default: 5). Zero is treated as 1.
    pub group_size: usize,
}

impl Default for NStep {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_NSTEP_GROUP_SIZE,
        }
    }
}

impl NStep {
    /// Creates an N-Step SCAN policy with a custom group size.
    pub fn with_group_size(group_size: usize) -> Self {
        Self { group_size }
    }

    /// Arrival-order groups, before SCAN is applied within each.
    pub fn groups<'a>(&self, pending: &'a [Request]) -> Vec<Vec<&'a Request>> {
        by_arrival(pending)
            .chunks(self.group_size.max(1))
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

impl SchedulingPolicy for NStep {
    fn name(&self) -> &'static str {
        "NSTEP"
    }

    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request> {
        self.groups(pending)
            .into_iter()
            .flat_map(|group| scan_order(group, context))
            .collect()
    }

    fn description(&self) -> &'static str {
        "N-Step SCAN"
    }
}

// ======================== Directional greedy ========================

/// Eschenbach scheme.
///
/// Requests in the direction of travel (`>= head` moving up, `<= head`
/// otherwise) come first, nearest first; the remaining requests follow,
/// also nearest first.
#[derive(Debug, Clone, Copy)]
pub struct Eschenbach;

impl SchedulingPolicy for Eschenbach {
    fn name(&self) -> &'static str {
        "ESCHENBACH"
    }

    fn order<'a>(&self, pending: &'a [Request], context: &HeadContext) -> Vec<&'a Request> {
        let head = context.head;
        let ahead = |r: &&Request| match context.direction {
            Direction::Increasing => r.cylinder >= head,
            Direction::Decreasing | Direction::None => r.cylinder <= head,
        };
        let (mut same, mut opposite): (Vec<&Request>, Vec<&Request>) =
            pending.iter().partition(ahead);
        same.sort_by_key(|r| (r.distance_from(head), r.id));
        opposite.sort_by_key(|r| (r.distance_from(head), r.id));
        same.extend(opposite);
        same
    }

    fn description(&self) -> &'static str {
        "Eschenbach Scheme"
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::models::MAX_CYLINDER;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn all_policies() -> Vec<Box<dyn SchedulingPolicy>> {
        vec![
            Box::new(Fcfs),
            Box::new(Sstf),
            Box::new(Scan),
            Box::new(CScan),
            Box::new(NStep::default()),
            Box::new(Eschenbach),
        ]
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::None),
            Just(Direction::Increasing),
            Just(Direction::Decreasing),
        ]
    }

    fn pending() -> impl Strategy<Value = Vec<Request>> {
        proptest::collection::vec(0..=MAX_CYLINDER, 1..30).prop_map(|cylinders| {
            cylinders
                .into_iter()
                .zip(1u32..)
                .map(|(c, id)| Request::new(id, c))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_order_is_permutation(
            pending in pending(),
            head in 0..=MAX_CYLINDER,
            dir in direction(),
        ) {
            let context = HeadContext::at(head).with_direction(dir);
            let expected: HashSet<u32> = pending.iter().map(|r| r.id).collect();
            for policy in all_policies() {
                let order = policy.order(&pending, &context);
                prop_assert_eq!(order.len(), pending.len());
                let seen: HashSet<u32> = order.iter().map(|r| r.id).collect();
                prop_assert_eq!(&seen, &expected);
            }
        }

        #[test]
        fn test_order_is_deterministic(
            pending in pending(),
            head in 0..=MAX_CYLINDER,
            dir in direction(),
        ) {
            let context = HeadContext::at(head).with_direction(dir);
            let mut shuffled = pending.clone();
            shuffled.reverse();
            for policy in all_policies() {
                let a: Vec<u32> = policy.order(&pending, &context).iter().map(|r| r.id).collect();
                let b: Vec<u32> = policy.order(&shuffled, &context).iter().map(|r| r.id).collect();
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn test_sstf_head_is_nearest(
            pending in pending(),
            head in 0..=MAX_CYLINDER,
        ) {
            let first = Sstf.select(&pending, &HeadContext::at(head)).copied();
            let best = pending
                .iter()
                .min_by_key(|r| (r.distance_from(head), r.id))
                .copied();
            prop_assert_eq!(first, best);
        }

        #[test]
        fn test_sweep_partitions_hold(
            pending in pending(),
            head in 0..=MAX_CYLINDER,
            dir in direction(),
        ) {
            let context = HeadContext::at(head).with_direction(dir);

            let scan = Scan.order(&pending, &context);
            let near = |r: &Request| if context.sweeping_up() {
                r.cylinder > head
            } else {
                r.cylinder <= head
            };
            let near_count = pending.iter().filter(|&r| near(r)).count();
            prop_assert!(scan[..near_count].iter().all(|&r| near(r)));
            prop_assert!(scan[near_count..].iter().all(|&r| !near(r)));

            let cscan = CScan.order(&pending, &context);
            let ahead_count = pending.iter().filter(|r| r.cylinder >= head).count();
            prop_assert!(cscan[..ahead_count].iter().all(|r| r.cylinder >= head));
            prop_assert!(cscan[ahead_count..].iter().all(|r| r.cylinder < head));

            let esch = Eschenbach.order(&pending, &context);
            let same = |r: &Request| if dir == Direction::Increasing {
                r.cylinder >= head
            } else {
                r.cylinder <= head
            };
            let same_count = pending.iter().filter(|&r| same(r)).count();
            prop_assert!(esch[..same_count].iter().all(|&r| same(r)));
            prop_assert!(esch[same_count..].iter().all(|&r| !same(r)));
        }
    }
}

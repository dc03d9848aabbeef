//! Time slot index.
//!
//! A scheduling horizon is a finite, ordered sequence of atomic slots
//! `0..N`. Slots carry no timestamps; the consumer decides what a slot
//! means (an evening, a night, a half day). A subset of slots is flagged
//! as working hours, and target workloads are counted over the rest.
//!
//! # Adjacency
//! Slots `t` and `t + 1` are consecutive. The sequence does not wrap:
//! the last slot has no successor.
//!
//! # Rotation groups
//! For a pool of `k` employees the horizon is cut into contiguous blocks
//! of `k` slots (the last block may be shorter). Within one block a
//! perfectly fair rotation gives every pool member exactly one slot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// The ordered set of slots in one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlots {
    /// Number of slots in the horizon.
    pub slot_count: usize,
    /// Indices of slots that fall within working hours.
    #[serde(default)]
    pub working_hours: BTreeSet<usize>,
}

impl TimeSlots {
    /// Creates a horizon of `slot_count` slots, none of them in working hours.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            working_hours: BTreeSet::new(),
        }
    }

    /// Flags the given slots as working hours.
    pub fn with_working_hours(mut self, slots: impl IntoIterator<Item = usize>) -> Self {
        self.working_hours.extend(slots);
        self
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slot_count
    }

    /// Whether the horizon has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_count == 0
    }

    /// Whether `slot` lies inside the horizon.
    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        slot < self.slot_count
    }

    /// Whether `slot` is a working-hours slot.
    pub fn is_working_hours(&self, slot: usize) -> bool {
        self.working_hours.contains(&slot)
    }

    /// All slot indices in order.
    pub fn iter(&self) -> Range<usize> {
        0..self.slot_count
    }

    /// Slots outside working hours, in order.
    pub fn non_working_slots(&self) -> Vec<usize> {
        self.iter().filter(|&t| !self.is_working_hours(t)).collect()
    }

    /// Slots inside working hours that lie within the horizon, in order.
    pub fn working_slots(&self) -> Vec<usize> {
        self.iter().filter(|&t| self.is_working_hours(t)).collect()
    }

    /// Working-hours indices that fall outside the horizon.
    pub fn out_of_range_working_hours(&self) -> Vec<usize> {
        self.working_hours
            .iter()
            .copied()
            .filter(|&t| !self.contains(t))
            .collect()
    }

    /// The slot following `slot`, if any.
    pub fn successor(&self, slot: usize) -> Option<usize> {
        let next = slot + 1;
        self.contains(next).then_some(next)
    }

    /// Pairs `(t, t + 1)` of consecutive slots.
    pub fn consecutive_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter().filter_map(|t| self.successor(t).map(|n| (t, n)))
    }

    /// Partitions the horizon into contiguous rotation groups of `pool_size`
    /// slots. The last group may be shorter. An empty pool yields no groups.
    pub fn rotation_groups(&self, pool_size: usize) -> Vec<Range<usize>> {
        if pool_size == 0 {
            return Vec::new();
        }
        (0..self.slot_count)
            .step_by(pool_size)
            .map(|start| start..(start + pool_size).min(self.slot_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sixteen() -> TimeSlots {
        TimeSlots::new(16).with_working_hours([1, 2, 5, 6, 9, 10, 13, 14])
    }

    #[test]
    fn test_working_hours_split() {
        let slots = sixteen();
        assert_eq!(slots.len(), 16);
        assert!(slots.is_working_hours(1));
        assert!(!slots.is_working_hours(0));
        assert_eq!(slots.non_working_slots(), vec![0, 3, 4, 7, 8, 11, 12, 15]);
        assert_eq!(slots.working_slots().len(), 8);
    }

    #[test]
    fn test_successor_has_no_wraparound() {
        let slots = TimeSlots::new(3);
        assert_eq!(slots.successor(0), Some(1));
        assert_eq!(slots.successor(2), None);
        assert_eq!(slots.consecutive_pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_rotation_groups_even() {
        let groups = sixteen().rotation_groups(4);
        assert_eq!(groups, vec![0..4, 4..8, 8..12, 12..16]);
    }

    #[test]
    fn test_rotation_groups_short_tail() {
        let groups = sixteen().rotation_groups(3);
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[0], 0..3);
        assert_eq!(groups[5], 15..16);
    }

    #[test]
    fn test_rotation_groups_degenerate() {
        assert!(sixteen().rotation_groups(0).is_empty());
        assert_eq!(TimeSlots::new(3).rotation_groups(1), vec![0..1, 1..2, 2..3]);
        assert_eq!(TimeSlots::new(2).rotation_groups(5), vec![0..2]);
    }

    #[test]
    fn test_out_of_range_working_hours() {
        let slots = TimeSlots::new(4).with_working_hours([1, 4, 9]);
        assert_eq!(slots.out_of_range_working_hours(), vec![4, 9]);
        assert_eq!(slots.working_slots(), vec![1]);
    }
}

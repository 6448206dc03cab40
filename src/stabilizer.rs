//! Majority vote over the most recent raw classifications.
use crate::types::ElementType;
use std::collections::VecDeque;

/// Bounded FIFO of raw element types plus per-type counters.
///
/// The counters always sum to the FIFO length, which never exceeds the
/// capacity.
#[derive(Clone, Debug)]
pub struct StateHistory {
    window: VecDeque<ElementType>,
    counts: [usize; ElementType::COUNT],
    capacity: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::new(5)
    }
}

impl StateHistory {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity + 1),
            counts: [0; ElementType::COUNT],
            capacity,
        }
    }

    pub fn push(&mut self, raw: ElementType) {
        self.window.push_back(raw);
        self.counts[raw.ordinal()] += 1;
        while self.window.len() > self.capacity {
            if let Some(old) = self.window.pop_front() {
                self.counts[old.ordinal()] -= 1;
            }
        }
    }

    /// Most frequent type in the window; ties go to the lowest ordinal and an
    /// empty window reads as [`ElementType::Line`].
    pub fn current(&self) -> ElementType {
        let mut best = ElementType::Line;
        let mut best_count = 0usize;
        for ty in ElementType::ALL {
            let c = self.counts[ty.ordinal()];
            if c > best_count {
                best = ty;
                best_count = c;
            }
        }
        best
    }

    #[inline]
    pub fn count(&self, ty: ElementType) -> usize {
        self.counts[ty.ordinal()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.window.clear();
        self.counts = [0; ElementType::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElementType::*;

    #[test]
    fn empty_history_reads_line() {
        let h = StateHistory::new(5);
        assert!(h.is_empty());
        assert_eq!(h.current(), Line);
        assert_eq!(StateHistory::new(0).capacity(), 1);
    }

    #[test]
    fn window_evicts_oldest_and_counts_stay_consistent() {
        let mut h = StateHistory::new(3);
        for ty in [RCurve, RCurve, CrossBegin, CrossBegin, CrossIn] {
            h.push(ty);
            let total: usize = ElementType::ALL.iter().map(|t| h.count(*t)).sum();
            assert_eq!(total, h.len());
            assert!(h.len() <= 3);
        }
        assert_eq!(h.count(RCurve), 0);
        assert_eq!(h.count(CrossBegin), 2);
        assert_eq!(h.current(), CrossBegin);

        h.clear();
        assert_eq!(h.len(), 0);
        assert_eq!(h.current(), Line);
    }

    #[test]
    fn ties_go_to_the_lowest_ordinal() {
        let mut h = StateHistory::new(4);
        for ty in [RRingIn, LCurve, RRingIn, LCurve] {
            h.push(ty);
        }
        assert_eq!(h.current(), LCurve);
    }

    #[test]
    fn majority_wins_regardless_of_order() {
        let cap = 5;
        let noise = [Line, RCurve, CrossIn, LRingBegin];
        for offset in 0..cap {
            let mut h = StateHistory::new(cap);
            let mut noisy = noise.iter().cycle();
            for i in 0..cap {
                if (i + offset) % cap < cap / 2 + 1 {
                    h.push(RRingRunning);
                } else if let Some(ty) = noisy.next() {
                    h.push(*ty);
                }
            }
            assert_eq!(h.current(), RRingRunning);
        }
    }
}

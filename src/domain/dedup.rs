//! Seen-value deduplication.
//!
//! A [`Deduplicator`] remembers every value it has admitted and filters those
//! values out of later inputs. The seen-set only grows: there is no way to
//! forget a value short of dropping the deduplicator.

use ahash::RandomState;
use std::collections::HashSet;
use std::hash::Hash;

/// How duplicates *within a single* `apply` call are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupMode {
    /// Filter against the seen-set as of call start, then record all admitted
    /// values at once. A new value repeated within one call is returned once
    /// per occurrence.
    #[default]
    Batch,
    /// Record each admitted value immediately. Only the first occurrence of a
    /// new value within one call is returned.
    Incremental,
}

/// Stateful filter that returns only values it has not admitted before.
///
/// # Example
/// ```
/// use call_dedup::Deduplicator;
///
/// let mut dedup = Deduplicator::new();
///
/// assert_eq!(dedup.apply([1, 2, 3]), vec![1, 2, 3]);
/// assert_eq!(dedup.apply([1, 2, 4]), vec![4]);
/// assert_eq!(dedup.apply([5, 6]), vec![5, 6]);
/// assert!(dedup.apply([1, 2, 3, 4, 5, 6]).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Deduplicator<V> {
    seen: HashSet<V, RandomState>,
    mode: DedupMode,
}

impl<V> Deduplicator<V>
where
    V: Eq + Hash + Clone,
{
    /// Create a deduplicator with an empty seen-set and [`DedupMode::Batch`].
    pub fn new() -> Self {
        Self::with_mode(DedupMode::Batch)
    }

    /// Create a deduplicator with an empty seen-set and the given mode.
    pub fn with_mode(mode: DedupMode) -> Self {
        Self {
            seen: HashSet::with_hasher(RandomState::new()),
            mode,
        }
    }

    /// Return the values not seen before, in input order, and remember them.
    pub fn apply<I>(&mut self, values: I) -> Vec<V>
    where
        I: IntoIterator<Item = V>,
    {
        match self.mode {
            DedupMode::Batch => {
                let fresh: Vec<V> = values
                    .into_iter()
                    .filter(|value| !self.seen.contains(value))
                    .collect();
                self.seen.extend(fresh.iter().cloned());
                fresh
            }
            DedupMode::Incremental => values
                .into_iter()
                .filter(|value| {
                    if self.seen.contains(value) {
                        false
                    } else {
                        self.seen.insert(value.clone());
                        true
                    }
                })
                .collect(),
        }
    }

    /// Check whether a value has already been admitted.
    pub fn contains(&self, value: &V) -> bool {
        self.seen.contains(value)
    }
}

impl<V> Deduplicator<V> {
    /// Number of distinct values admitted so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True until the first value is admitted.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// The intra-call duplicate policy of this instance.
    pub fn mode(&self) -> DedupMode {
        self.mode
    }

    /// Iterate over admitted values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.seen.iter()
    }
}

impl<V> Default for Deduplicator<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate a single input sequence against an empty seen-set.
///
/// Each call starts fresh, so nothing carries over between calls. With the
/// batch policy this returns the input unchanged.
pub fn dedup_once<V, I>(values: I) -> Vec<V>
where
    V: Eq + Hash + Clone,
    I: IntoIterator<Item = V>,
{
    Deduplicator::new().apply(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_sequence_scenario() {
        let mut dedup = Deduplicator::new();

        assert_eq!(dedup.apply([1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(dedup.apply([1, 2, 4]), vec![4]);
        assert_eq!(dedup.apply([5, 6]), vec![5, 6]);
        assert_eq!(dedup.apply([1, 2, 3, 4, 5, 6]), Vec::<i32>::new());
        assert_eq!(dedup.len(), 6);
    }

    #[test]
    fn test_fully_seen_input_returns_empty() {
        let mut dedup = Deduplicator::new();
        dedup.apply(["a", "b"]);

        assert!(dedup.apply(["b", "a", "b"]).is_empty());
        assert!(dedup.apply(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let mut dedup = Deduplicator::new();
        dedup.apply([5]);

        assert_eq!(dedup.apply([9, 5, 1, 7, 3]), vec![9, 1, 7, 3]);
    }

    #[test]
    fn test_batch_mode_keeps_intra_call_duplicates() {
        let mut dedup = Deduplicator::new();

        assert_eq!(dedup.apply([7, 7, 8, 7]), vec![7, 7, 8, 7]);
        assert_eq!(dedup.len(), 2);
        assert!(dedup.apply([7, 8]).is_empty());
    }

    #[test]
    fn test_incremental_mode_drops_intra_call_duplicates() {
        let mut dedup = Deduplicator::with_mode(DedupMode::Incremental);

        assert_eq!(dedup.apply([7, 7, 8, 7]), vec![7, 8]);
        assert_eq!(dedup.mode(), DedupMode::Incremental);
        assert!(dedup.apply([8, 7]).is_empty());
    }

    #[test]
    fn test_instances_do_not_share_state() {
        let mut first = Deduplicator::new();
        let mut second = Deduplicator::new();

        assert_eq!(first.apply([1, 2]), vec![1, 2]);
        assert_eq!(second.apply([1, 2]), vec![1, 2]);
        assert!(first.apply([1, 2]).is_empty());
        assert!(second.contains(&1));
    }

    #[test]
    fn test_returned_subsets_partition_distinct_inputs() {
        let batches: Vec<Vec<u32>> = vec![
            vec![3, 1, 4, 1, 5],
            vec![9, 2, 6, 5, 3],
            vec![5, 8, 9, 7, 9],
            vec![3, 2, 3, 8, 4],
        ];

        for mode in [DedupMode::Batch, DedupMode::Incremental] {
            let mut dedup = Deduplicator::with_mode(mode);
            let mut emitted: Vec<BTreeSet<u32>> = Vec::new();

            for batch in &batches {
                emitted.push(dedup.apply(batch.iter().copied()).into_iter().collect());
            }

            // Each value shows up in exactly one returned subset
            for (i, a) in emitted.iter().enumerate() {
                for b in emitted.iter().skip(i + 1) {
                    assert!(a.is_disjoint(b), "{:?} overlaps {:?}", a, b);
                }
            }

            let union: BTreeSet<u32> = emitted.into_iter().flatten().collect();
            let distinct: BTreeSet<u32> = batches.iter().flatten().copied().collect();
            assert_eq!(union, distinct);
            assert_eq!(dedup.len(), distinct.len());
        }
    }

    #[test]
    fn test_dedup_once_starts_fresh_each_call() {
        assert_eq!(dedup_once([1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(dedup_once([2, 3, 4]), vec![2, 3, 4]);
        assert_eq!(dedup_once([4, 4]), vec![4, 4]);
    }

    #[test]
    fn test_owned_strings() {
        let mut dedup = Deduplicator::default();

        let first = dedup.apply(vec!["alpha".to_string(), "beta".to_string()]);
        let second = dedup.apply(vec!["beta".to_string(), "gamma".to_string()]);

        assert_eq!(first, vec!["alpha", "beta"]);
        assert_eq!(second, vec!["gamma"]);
        assert!(!dedup.is_empty());
        assert_eq!(dedup.iter().count(), 3);
    }
}

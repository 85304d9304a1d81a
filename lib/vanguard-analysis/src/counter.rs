/// Counts occurrences of labels, remembering the order labels were first seen.
///
/// Ties in [`OrderedCounter::most_common`] go to the label seen first, so the
/// result does not depend on hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCounter<K> {
    counts: Vec<(K, usize)>,
}

impl<K> Default for OrderedCounter<K> {
    fn default() -> Self {
        Self { counts: Vec::new() }
    }
}

impl<K: PartialEq> OrderedCounter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((key, 1)),
        }
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts
            .iter()
            .find(|(existing, _)| existing == key)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The label with the highest count, earliest-seen first on ties.
    pub fn most_common(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, count) in &self.counts {
            if best.map_or(true, |(_, best_count)| *count > best_count) {
                best = Some((key, *count));
            }
        }
        best
    }

    /// Labels and their counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }
}

impl<K: PartialEq> FromIterator<K> for OrderedCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_in_first_seen_order() {
        let counter: OrderedCounter<&str> = ["B", "A", "B", "C"].into_iter().collect();
        let seen: Vec<_> = counter.iter().collect();
        assert_eq!(seen, vec![(&"B", 2), (&"A", 1), (&"C", 1)]);
        assert_eq!(counter.total(), 4);
        assert_eq!(counter.get(&"D"), 0);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let counter: OrderedCounter<&str> = ["C", "A", "A", "C"].into_iter().collect();
        assert_eq!(counter.most_common(), Some((&"C", 2)));
    }

    #[test]
    fn test_empty_has_no_most_common() {
        let counter = OrderedCounter::<u8>::new();
        assert!(counter.is_empty());
        assert_eq!(counter.most_common(), None);
    }
}

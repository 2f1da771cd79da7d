use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Number of guesses made against each target, for observability only.
///
/// Increments are atomic per target so concurrent requests never lose
/// updates. Nothing in scoring or resolution reads these counts.
#[derive(Debug, Default)]
pub struct GuessCounter {
    counts: Mutex<HashMap<String, u64>>,
}

impl GuessCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one guess against `target`, returning the new count
    pub fn increment(&self, target: &str) -> u64 {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counts.entry(target.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Guesses recorded against `target`
    pub fn count(&self, target: &str) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
            .copied()
            .unwrap_or(0)
    }

    /// All counts, most-guessed first, ties by name
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_increment_and_count() {
        let counter = GuessCounter::new();
        assert_eq!(counter.count("Target"), 0);
        assert_eq!(counter.increment("Target"), 1);
        assert_eq!(counter.increment("Target"), 2);
        assert_eq!(counter.count("Target"), 2);
        assert_eq!(counter.count("Other"), 0);
    }

    #[test]
    fn test_snapshot_order() {
        let counter = GuessCounter::new();
        counter.increment("B");
        counter.increment("A");
        counter.increment("C");
        counter.increment("C");

        assert_eq!(
            counter.snapshot(),
            vec![
                ("C".to_string(), 2),
                ("A".to_string(), 1),
                ("B".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counter = Arc::new(GuessCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        counter.increment("Shared");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.count("Shared"), 2000);
    }
}

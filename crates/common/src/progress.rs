//! Progress counting shared between a worker and an observer thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A monotonically increasing counter of completed work units.
///
/// Cloning yields a handle to the same counter. Increments are atomic, so
/// concurrent workers never lose an update and observers never read a torn
/// value.
#[derive(Debug, Clone)]
pub struct ProgressCounter {
    completed: Arc<AtomicUsize>,
    total: usize,
}

impl ProgressCounter {
    /// Create a counter expecting `total` units of work.
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total,
        }
    }

    /// Record one finished unit and return the new count.
    pub fn increment(&self) -> usize {
        self.add(1)
    }

    /// Record `n` finished units and return the new count.
    pub fn add(&self, n: usize) -> usize {
        self.completed.fetch_add(n, Ordering::AcqRel) + n
    }

    /// Units completed so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    /// Units expected in total.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Completion in `[0.0, 1.0]`. An empty workload counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed() as f64 / self.total as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_fraction() {
        let counter = ProgressCounter::new(4);
        assert_eq!(counter.fraction(), 0.0);
        counter.increment();
        assert_eq!(counter.add(1), 2);
        assert!((counter.fraction() - 0.5).abs() < 1e-9);
        assert!(!counter.is_complete());
    }

    #[test]
    fn test_empty_workload_is_complete() {
        let counter = ProgressCounter::new(0);
        assert!(counter.is_complete());
        assert_eq!(counter.fraction(), 1.0);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let counter = ProgressCounter::new(8 * 1000);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.completed(), 8000);
        assert!(counter.is_complete());
    }
}

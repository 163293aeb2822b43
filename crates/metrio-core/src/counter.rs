//! Lock-free counter state for a single series.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically non-decreasing f64, stored as an atomic bit pattern.
///
/// `add` runs a compare-exchange loop, so concurrent adds on the same
/// series never lose updates and readers only ever see fully-applied
/// values. Zero-initialized on first use of a series.
#[derive(Debug, Default)]
pub struct Counter {
    bits: AtomicU64,
}

impl Counter {
    /// Add a non-negative delta. Validation happens in the registry.
    pub fn add(&self, delta: f64) {
        let mut cur = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(seen) => cur = seen,
            }
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(Counter::default().get(), 0.0);
    }

    #[test]
    fn adds_accumulate() {
        let c = Counter::default();
        c.add(1.0);
        c.add(2.5);
        c.add(0.0);
        assert_eq!(c.get(), 3.5);
    }

    #[test]
    fn concurrent_adds_are_exact() {
        let c = std::sync::Arc::new(Counter::default());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let c = std::sync::Arc::clone(&c);
            handles.push(std::thread::spawn(move || {
                for _ in 0..10_000 {
                    c.add(1.0);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(c.get(), 80_000.0);
    }
}

//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions evaluated before a transition is
//! accepted. The two built-in guards cover the ceiling check on the add
//! path and the non-negative check on the reduce path.

use super::state::Amount;

/// Pure predicate that decides whether a transition may proceed.
///
/// # Example
///
/// ```rust
/// use allotment::core::{Allocation, Guard};
///
/// // Allow overspending by at most 100.
/// let lenient = Guard::new(|a: &Allocation| a.projected() <= a.ceiling + 100.0);
///
/// let request = Allocation { ceiling: 1000.0, committed: 950.0, requested: 120.0 };
/// assert!(lenient.check(&request));
/// ```
pub struct Guard<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, input: &T) -> bool {
        (self.predicate)(input)
    }
}

impl<T> std::fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// Input to the ceiling guard: what is already allocated, what is being
/// requested, and the ceiling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Allocation {
    pub ceiling: Amount,
    pub committed: Amount,
    pub requested: Amount,
}

impl Allocation {
    /// Total allocation if the request is accepted.
    pub fn projected(&self) -> Amount {
        self.committed + self.requested
    }
}

/// Input to the reduction guard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reduction {
    pub available: Amount,
    pub requested: Amount,
}

impl Reduction {
    /// Cost left on the entry if the reduction is accepted.
    pub fn resulting(&self) -> Amount {
        self.available - self.requested
    }
}

/// Accepts an allocation only while the projected total stays at or below
/// the ceiling.
pub fn within_ceiling() -> Guard<Allocation> {
    Guard::new(|allocation: &Allocation| allocation.projected() <= allocation.ceiling)
}

/// Accepts a reduction only when the entry's cost stays non-negative.
pub fn non_negative() -> Guard<Reduction> {
    Guard::new(|reduction: &Reduction| reduction.resulting() >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_allows_exact_fit() {
        let guard = within_ceiling();
        let allocation = Allocation {
            ceiling: 5000.0,
            committed: 960.0,
            requested: 4040.0,
        };
        assert!(guard.check(&allocation));
    }

    #[test]
    fn ceiling_blocks_overshoot() {
        let guard = within_ceiling();
        let allocation = Allocation {
            ceiling: 5000.0,
            committed: 960.0,
            requested: 4100.0,
        };
        assert_eq!(allocation.projected(), 5060.0);
        assert!(!guard.check(&allocation));
    }

    #[test]
    fn non_negative_allows_zeroing() {
        let guard = non_negative();
        assert!(guard.check(&Reduction {
            available: 70.0,
            requested: 70.0,
        }));
    }

    #[test]
    fn non_negative_blocks_overdraw() {
        let guard = non_negative();
        assert!(!guard.check(&Reduction {
            available: 70.0,
            requested: 80.0,
        }));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = within_ceiling();
        let allocation = Allocation {
            ceiling: 10.0,
            committed: 4.0,
            requested: 6.0,
        };
        assert_eq!(guard.check(&allocation), guard.check(&allocation));
    }

    #[test]
    fn custom_guard_uses_predicate() {
        let guard = Guard::new(|r: &Reduction| r.requested < 10.0);
        assert!(guard.check(&Reduction {
            available: 0.0,
            requested: 5.0,
        }));
        assert!(!guard.check(&Reduction {
            available: 100.0,
            requested: 50.0,
        }));
    }
}

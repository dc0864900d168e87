//! Memoized Fibonacci over any [`MemoStore`].
//!
//! `F(0) = 0`, `F(1) = 1`, `F(n) = F(n - 1) + F(n - 2)`. Terms are exact
//! [`BigUint`]s; `F(950)` has 199 decimal digits.
//!
//! ```
//! use memokit::memo::{HashMemo, SplayMemo};
//! use memokit::workload::fibonacci::{fibonacci, fibonacci_uncached};
//! use num_bigint::BigUint;
//!
//! let mut splay = SplayMemo::new();
//! let mut hash = HashMemo::new();
//! assert_eq!(fibonacci(90, &mut splay), BigUint::from(2_880_067_194_370_816_120u64));
//! assert_eq!(fibonacci(90, &mut hash), fibonacci_uncached(90));
//! ```

use num_bigint::BigUint;

use crate::traits::MemoStore;

/// Computes `F(n)`, consulting `memo` before recursing and recording every
/// computed term in it. A hit clones the stored value.
///
/// Recursion depth is O(n) on a cold store. A bounded store such as
/// [`LruCache`](crate::policy::lru::LruCache) needs a capacity of at least 3
/// to keep the call count linear; with 2, `F(n - 2)` is evicted by the time
/// `F(n - 1)` returns.
pub fn fibonacci<M>(n: u64, memo: &mut M) -> BigUint
where
    M: MemoStore<u64, BigUint>,
{
    if let Some(value) = memo.find(&n) {
        return value.clone();
    }

    let value = if n < 2 {
        BigUint::from(n)
    } else {
        let a = fibonacci(n - 1, memo);
        let b = fibonacci(n - 2, memo);
        a + b
    };

    tracing::trace!("[fibonacci]: memoized F({})", n);
    memo.insert(n, value.clone());
    value
}

/// Iterative `F(n)`, for cross-checking the memoized path.
pub fn fibonacci_uncached(n: u64) -> BigUint {
    let mut a = BigUint::from(0u32);
    let mut b = BigUint::from(1u32);
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

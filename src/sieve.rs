//! # Sieve — Small-Prime Generation and Batching
//!
//! Number-theoretic infrastructure shared by every search worker:
//!
//! 1. **Prime generation** via the Sieve of Eratosthenes, O(n log log n).
//! 2. **Prime-group products**: consecutive sieve primes multiplied together
//!    while the running product fits a machine word. One big-integer GCD
//!    against a group tests divisibility by every prime in it at once, so
//!    hardening costs ~π(limit)/group_size GCDs instead of π(limit) trial
//!    divisions.
//! 3. **Process-wide cache**: the sieve is computed once on first use and
//!    shared read-only by all workers for the process lifetime. It holds no
//!    external resources, so no teardown is needed.
//!
//! The sieve bound is a fixed constant: beyond ~10^5 the marginal composite
//! eliminated per GCD costs more than the Miller-Rabin round it saves.

use std::sync::OnceLock;

use rug::Integer;

/// Sieve bound for the small-prime pre-filter. Primes below this bound are
/// eliminated from candidates by GCD batching before any Miller-Rabin round.
pub const SIEVE_LIMIT: u32 = 100_000;

/// The cached small-prime set: the ordered primes below [`SIEVE_LIMIT`] plus
/// their machine-word-bounded group products.
pub struct SmallPrimes {
    /// All primes below the sieve bound, ascending.
    pub primes: Vec<u32>,
    /// Products of consecutive primes, each product ≤ u64::MAX.
    pub groups: Vec<Integer>,
}

static SMALL_PRIMES: OnceLock<SmallPrimes> = OnceLock::new();

/// The process-wide small-prime set, computed on first use and immutable
/// afterwards. Safe to share across worker threads without locking.
pub fn small_primes() -> &'static SmallPrimes {
    SMALL_PRIMES.get_or_init(|| {
        let primes = generate_primes(SIEVE_LIMIT);
        let groups = build_groups(&primes);
        SmallPrimes { primes, groups }
    })
}

/// Generate all primes below `limit` using the Sieve of Eratosthenes.
///
/// Pure and deterministic: `generate_primes(100)` yields exactly the 25
/// primes 2, 3, 5, ..., 97.
pub fn generate_primes(limit: u32) -> Vec<u32> {
    if limit <= 2 {
        return vec![];
    }

    let limit = limit as usize;
    let mut composite = vec![false; limit];
    let mut primes = Vec::with_capacity(estimate_prime_count(limit));

    for n in 2..limit {
        if composite[n] {
            continue;
        }
        primes.push(n as u32);
        // Multiples below n*n were already marked by smaller primes
        let mut m = n * n;
        while m < limit {
            composite[m] = true;
            m += n;
        }
    }
    primes
}

/// Estimate prime count below n via the prime counting function approximation.
fn estimate_prime_count(n: usize) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}

/// Batch primes into products bounded by a machine word.
///
/// Each group is the product of consecutive primes; a batch closes when
/// multiplying the next prime in would overflow u64. Every prime lands in
/// exactly one group, so `gcd(n, group) == 1` for all groups proves n has
/// no factor below the sieve bound.
fn build_groups(primes: &[u32]) -> Vec<Integer> {
    let mut groups = Vec::new();
    let mut product: u64 = 1;

    for &p in primes {
        match product.checked_mul(p as u64) {
            Some(next) => product = next,
            None => {
                groups.push(Integer::from(product));
                product = p as u64;
            }
        }
    }
    if product > 1 {
        groups.push(Integer::from(product));
    }
    groups
}

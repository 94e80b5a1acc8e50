//! # Harden — Small-Factor Elimination for Prime Candidates
//!
//! Cheap pre-filter applied to every random candidate before the Miller-Rabin
//! rounds. A fresh odd candidate has probability ~1/p of being divisible by
//! each small prime p; stepping the candidate past those divisors removes the
//! vast majority of composites for a tiny fraction of the cost of a single
//! modular exponentiation.
//!
//! Divisibility is checked by GCD against the batched prime-group products
//! from [`crate::sieve`]: one GCD per group stands in for thousands of trial
//! divisions. This is a heuristic filter, not a primality proof — a hardened
//! candidate is merely cheaper to test.

use rug::Integer;

use crate::sieve::{self, SIEVE_LIMIT};

/// Check whether `n` has a prime factor below the sieve bound (other than
/// `n` itself, so small primes are not flagged as their own factor).
///
/// Large `n` is tested by GCD against each prime-group product. Values at or
/// below the sieve bound fall back to direct trial division, where equality
/// with the dividing prime can be recognized.
pub fn has_small_factor(n: &Integer) -> bool {
    let sp = sieve::small_primes();

    if *n <= SIEVE_LIMIT {
        for &p in &sp.primes {
            if n.is_divisible_u(p) {
                // n == p means n is that small prime, not a multiple of it
                return *n > p;
            }
        }
        return false;
    }

    for g in &sp.groups {
        let d = Integer::from(n.gcd_ref(g));
        if d != 1u32 {
            return true;
        }
    }
    false
}

/// Harden a candidate: return the nearest value at or above `candidate` that
/// is odd, ≥ 3, and has no prime factor below the sieve bound.
///
/// Parity is forced by setting the low bit, then the candidate steps upward
/// by 2 until [`has_small_factor`] clears. Stepping by 2 preserves oddness,
/// and prime gaps are finite, so the loop terminates at a fixed point:
/// `harden(harden(x)) == harden(x)`.
pub fn harden(mut candidate: Integer) -> Integer {
    if candidate < 3u32 {
        candidate = Integer::from(3u32);
    }
    candidate.set_bit(0, true);

    while has_small_factor(&candidate) {
        candidate += 2u32;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes_are_not_their_own_small_factor() {
        for &p in &[2u32, 3, 5, 7, 11, 97, 99991] {
            let n = Integer::from(p);
            assert!(
                !has_small_factor(&n),
                "prime {} flagged as having a small factor",
                p
            );
        }
    }

    #[test]
    fn small_composites_are_flagged() {
        for &c in &[4u32, 6, 9, 15, 561, 99999] {
            let n = Integer::from(c);
            assert!(has_small_factor(&n), "composite {} not flagged", c);
        }
    }

    #[test]
    fn large_multiples_of_small_primes_are_flagged() {
        // 2^100 * 3 is huge but divisible by 3
        let n = (Integer::from(1u32) << 100) * 3u32;
        assert!(has_small_factor(&n));

        // 99991 (prime, below the bound) times a large power of two
        let n = (Integer::from(1u32) << 90) * 99991u32;
        assert!(has_small_factor(&n));
    }

    #[test]
    fn semiprime_of_large_factors_passes_the_filter() {
        // 100003 * 100019 — both factors are above the sieve bound, so the
        // filter must miss it (it is only a heuristic)
        let n = Integer::from(100003u64) * Integer::from(100019u64);
        assert!(!has_small_factor(&n));
    }

    #[test]
    fn harden_output_is_odd_and_at_least_three() {
        for start in 0u32..=20 {
            let h = harden(Integer::from(start));
            assert!(h.is_odd(), "harden({}) = {} is even", start, h);
            assert!(h >= 3u32, "harden({}) = {} below 3", start, h);
        }
    }

    #[test]
    fn harden_clears_small_factors() {
        let h = harden(Integer::from(1u32) << 128);
        assert!(!has_small_factor(&h));
        assert!(h.is_odd());
    }

    #[test]
    fn harden_is_idempotent() {
        let inputs = [
            Integer::from(9u32),
            Integer::from(100u32),
            Integer::from(65537u32),
            (Integer::from(1u32) << 200) + 12345u32,
        ];
        for x in inputs {
            let once = harden(x.clone());
            let twice = harden(once.clone());
            assert_eq!(twice, once, "harden not a fixed point for input {}", x);
        }
    }

    #[test]
    fn harden_fixes_small_primes_in_place() {
        for &p in &[3u32, 5, 7, 11, 13, 101] {
            assert_eq!(harden(Integer::from(p)), p);
        }
    }

    #[test]
    fn harden_steps_past_even_and_composite_starts() {
        // 14 -> 15 (div by 3,5) -> 17
        assert_eq!(harden(Integer::from(14u32)), 17u32);
        // 9 -> 11
        assert_eq!(harden(Integer::from(9u32)), 11u32);
    }
}

//! # Miller-Rabin — Probabilistic Primality Testing
//!
//! The algorithmic heart of the generator. One round of the test:
//!
//! 1. Decompose `m − 1 = 2^k · u` with `u` odd (`k` = trailing zero bits).
//! 2. Compute `x = a^u mod m` for a random witness `a` by fast modular
//!    exponentiation.
//! 3. Square `x` up to `k` times, remembering the previous value `y`. If
//!    `x` reaches 1, the candidate passes iff `y ≡ ±1 (mod m)`; reaching 1
//!    from any other `y` exhibits a nontrivial square root of 1, which
//!    cannot exist modulo a prime. Never reaching 1 fails Fermat's test
//!    outright (`a^(m−1) ≢ 1`).
//!
//! A single round errs (declares a composite probably-prime) with
//! probability at most 1/4 per random witness; `rounds` independent fresh
//! witnesses push the error below `(1/4)^rounds`, conventionally reported
//! with the conservative `(1/2)^rounds` bound. Reusing a witness adds no
//! confidence, so every round draws fresh.
//!
//! ## References
//!
//! - G.L. Miller, "Riemann's Hypothesis and Tests for Primality",
//!   J. Comput. Syst. Sci., 13(3):300–317, 1976.
//! - M.O. Rabin, "Probabilistic Algorithm for Testing Primality",
//!   Journal of Number Theory, 12(1):128–138, 1980.

use rug::Integer;

use crate::random;

/// Run one Miller-Rabin round on odd `m > 2` with the given witness.
///
/// Deterministic given `(m, a)`: `true` means `a` is not a compositeness
/// witness for `m` (m passes this round), `false` proves `m` composite.
pub fn witness_round(m: &Integer, a: &Integer) -> bool {
    debug_assert!(m.is_odd() && *m > 2u32, "round requires odd m > 2");

    let m_minus_1 = Integer::from(m - 1u32);
    // m odd and > 2, so m - 1 is even and nonzero
    let k = match m_minus_1.find_one(0) {
        Some(k) => k,
        None => return false,
    };
    let u = Integer::from(&m_minus_1 >> k);

    let mut x = match a.clone().pow_mod(&u, m) {
        Ok(x) => x,
        Err(_) => return false,
    };

    for _ in 0..k {
        let y = x.clone();
        x.square_mut();
        x %= m;
        if x == 1u32 {
            return y == 1u32 || y == m_minus_1;
        }
    }
    // x never reached 1: a^(m-1) != 1 mod m, so m fails Fermat's test
    false
}

/// The amplified primality oracle: `rounds` independent Miller-Rabin rounds
/// with fresh random witnesses, early exit on the first failure.
///
/// Returns `true` iff `m` passed every round; the result is then wrong with
/// probability below `(1/2)^rounds`. Usable standalone to re-validate an
/// externally supplied candidate.
pub fn is_probably_prime(m: &Integer, rounds: u32) -> bool {
    if *m == 2u32 {
        return true;
    }
    if *m < 2u32 || m.is_even() {
        return false;
    }

    for _ in 0..rounds {
        let a = random::random_below(m);
        if !witness_round(m, &a) {
            return false;
        }
    }
    true
}

//! # primegen — Probabilistic Primes for RSA-Style Key Material
//!
//! Generates large integers that are prime with overwhelming probability,
//! fast enough for interactive key generation. The pipeline per candidate:
//!
//! ```text
//! OS entropy → exact-bit-length odd candidate → small-factor hardening
//!            → num_checks Miller-Rabin rounds → return or redraw
//! ```
//!
//! Multiple workers (one per execution unit by default) race the loop and
//! the first fully-validated candidate wins; the rest are cancelled
//! cooperatively. See [`generate_prime`] for the entry point and
//! [`is_probably_prime`] for standalone re-validation of an externally
//! supplied candidate.
//!
//! Key assembly (modulus, totient, exponent selection), encryption, and any
//! CLI presentation are the caller's concern: this crate only hands back
//! independently generated primes.

pub mod harden;
pub mod miller_rabin;
pub mod random;
pub mod search;
pub mod sieve;

use rug::Integer;

pub use miller_rabin::is_probably_prime;
pub use search::{generate_prime, DEFAULT_NUM_CHECKS};

/// Estimate decimal digit count from bit length, avoiding an expensive
/// to_string conversion. Off by at most one from the exact count.
pub fn estimate_digits(n: &Integer) -> u64 {
    let bits = n.significant_bits();
    if bits == 0 {
        return 1;
    }
    (bits as f64 * std::f64::consts::LOG10_2) as u64 + 1
}

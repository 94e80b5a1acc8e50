//! # Random — CSPRNG-Backed Candidate and Witness Shaping
//!
//! Shapes raw OS entropy (`rand::rngs::OsRng`) into big integers for the
//! search. Two shaping rules are provided:
//!
//! - **Candidates**: exact-bit-length odd integers. Both the top bit (so the
//!   result has exactly the requested bit length) and the bottom bit (so the
//!   result is odd before hardening) are forced. With both bits set a zero
//!   draw is impossible.
//! - **Witnesses**: values uniform in `[1, m)` for Miller-Rabin rounds,
//!   drawn in chunks sized to `m`'s byte length and reduced mod `m`. Zero
//!   draws are discarded and redrawn, never fed into the test.
//!
//! The entropy source is live: generation is deliberately not reproducible
//! run-to-run, even by a caller holding a fixed seed.

use rand::rngs::OsRng;
use rand::RngCore;
use rug::integer::Order;
use rug::Integer;

/// Draw a random odd integer with exactly `bit_length` significant bits.
///
/// Reads `ceil(bit_length / 8)` bytes from the OS CSPRNG, interprets them as
/// a big-endian unsigned value, truncates to the low `bit_length` bits, then
/// sets bit `bit_length - 1` and bit 0.
///
/// `bit_length` must be ≥ 2; the public API validates this before calling.
pub fn random_integer(bit_length: u32) -> Integer {
    let byte_len = bit_length.div_ceil(8) as usize;
    let mut buf = vec![0u8; byte_len];
    OsRng.fill_bytes(&mut buf);

    let mut n = Integer::from_digits(&buf, Order::Msf);
    n.keep_bits_mut(bit_length);
    n.set_bit(bit_length - 1, true);
    n.set_bit(0, true);
    n
}

/// Draw a random witness in `[1, m)` for a Miller-Rabin round.
///
/// Fills a buffer sized to `m`'s byte length and reduces mod `m`. The
/// reduction carries a slight modular bias, which is harmless here: witness
/// quality only affects how fast compositeness is detected, not soundness.
/// Zero draws are redrawn.
pub fn random_below(m: &Integer) -> Integer {
    let byte_len = m.significant_bits().div_ceil(8) as usize;
    let mut buf = vec![0u8; byte_len];

    loop {
        OsRng.fill_bytes(&mut buf);
        let r = Integer::from_digits(&buf, Order::Msf) % m;
        if r != 0u32 {
            return r;
        }
    }
}

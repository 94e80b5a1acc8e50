//! # Search — Parallel Candidate Race and Public Generation API
//!
//! Minimizes wall-clock time to one prime by racing independent workers,
//! one per execution unit. Each worker owns its candidates and random draws
//! exclusively; the only shared state is the read-only sieve and a single
//! `AtomicBool` cancellation flag.
//!
//! Cancellation is cooperative and racy by design: the flag is checked at
//! the top of each candidate iteration, never preemptively, so a losing
//! worker may burn one extra harden/test cycle after the winner finishes.
//! Its discarded result has no observable effect.
//!
//! The retry loop is unbounded by contract: expected iterations are governed
//! by the prime density near the target bit length (≈ bit_length · ln 2
//! candidates per prime), but there is no worst-case bound and no internal
//! timeout. Callers needing bounded latency must wrap the whole call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::{ensure, Context, Result};
use rug::Integer;
use tracing::{debug, info};

use crate::{estimate_digits, harden, miller_rabin, random};

/// Default confidence parameter: number of independent Miller-Rabin rounds a
/// candidate must pass. The returned value is then prime with probability at
/// least 1 − (1/2)^1000.
pub const DEFAULT_NUM_CHECKS: u32 = 1000;

/// Generate a probable prime with exactly `bit_length` bits.
///
/// Races `max_workers` search workers (default: available parallelism) and
/// returns the first candidate that is odd, has the exact requested bit
/// length, carries no factor below the sieve bound, and passed `num_checks`
/// independent Miller-Rabin rounds.
///
/// The winner is non-deterministic and the entropy is live, so results are
/// not reproducible run-to-run. The only error paths are precondition
/// violations (`bit_length < 2`, `num_checks == 0`, `max_workers == Some(0)`)
/// and thread-pool construction failure; the search itself retries until it
/// succeeds.
pub fn generate_prime(
    bit_length: u32,
    num_checks: u32,
    max_workers: Option<usize>,
) -> Result<Integer> {
    ensure!(bit_length >= 2, "bit_length must be at least 2");
    ensure!(num_checks >= 1, "num_checks must be at least 1");

    let workers = match max_workers {
        Some(w) => {
            ensure!(w >= 1, "max_workers must be at least 1");
            w
        }
        None => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    };

    if workers == 1 {
        // Degenerate race: run the sequential loop directly
        let cancel = AtomicBool::new(false);
        return search_candidates(bit_length, num_checks, &cancel)
            .context("sequential search exited without a result");
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build search worker pool")?;

    let cancel = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<Integer>();

    debug!(workers, bit_length, num_checks, "starting candidate race");
    pool.scope(|s| {
        for worker in 0..workers {
            let tx = tx.clone();
            let cancel = &cancel;
            s.spawn(move |_| {
                if let Some(prime) = search_candidates(bit_length, num_checks, cancel) {
                    // Raise the flag first so siblings stop at their next
                    // iteration check, then hand over the result
                    cancel.store(true, Ordering::Relaxed);
                    let _ = tx.send(prime);
                }
                debug!(worker, "search worker exiting");
            });
        }
    });
    drop(tx);

    // The flag is only ever raised by a worker that has already sent, so at
    // least one message is buffered once the scope completes; the channel
    // preserves send order, making this the race winner.
    let prime = rx
        .recv()
        .context("all search workers exited without a result")?;
    info!(
        bits = bit_length,
        digits = estimate_digits(&prime),
        "prime found"
    );
    Ok(prime)
}

/// One worker's sequential search loop: draw, harden, test, repeat.
///
/// Returns `None` only after observing the shared cancellation flag;
/// otherwise loops until a candidate passes every round. Hardening can carry
/// a candidate past its top bit; such candidates are discarded so the
/// exact-bit-length postcondition holds.
fn search_candidates(bit_length: u32, num_checks: u32, cancel: &AtomicBool) -> Option<Integer> {
    let mut attempts: u64 = 0;
    while !cancel.load(Ordering::Relaxed) {
        attempts += 1;
        let candidate = harden::harden(random::random_integer(bit_length));
        if candidate.significant_bits() != bit_length {
            continue;
        }
        if miller_rabin::is_probably_prime(&candidate, num_checks) {
            debug!(attempts, "candidate passed all rounds");
            return Some(candidate);
        }
    }
    None
}

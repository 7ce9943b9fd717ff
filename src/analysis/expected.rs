//! Reference resolution of uniformly distributed data.
//!
//! Drawing `N` samples uniformly from `M = 2^bits` levels yields on
//! average `M * (1 - (1 - 1/M)^N)` distinct values. Clean data at its
//! nominal bit depth should land close to the log of that count.

/// Largest supported nominal bit depth.
pub const MAX_BIT_DEPTH: u32 = 64;

/// Returns true if `bit_depth` is in `1..=64`.
#[inline]
pub fn is_valid_bit_depth(bit_depth: u32) -> bool {
    (1..=MAX_BIT_DEPTH).contains(&bit_depth)
}

/// Expected number of distinct values among `total_count` uniform draws
/// from `2^bit_depth` levels.
pub fn expected_distinct_count(bit_depth: u32, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }

    let levels = 2f64.powi(bit_depth.min(MAX_BIT_DEPTH) as i32);
    let n = total_count as f64;

    // M * (1 - (1 - 1/M)^N), kept accurate for large M.
    -levels * (n * (-1.0 / levels).ln_1p()).exp_m1()
}

/// Expected unique entropy, in bits, of clean uniform data.
///
/// Never exceeds `min(bit_depth, log2(total_count))`.
pub fn expected_unique_entropy(bit_depth: u32, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }

    let ceiling = f64::from(bit_depth.min(MAX_BIT_DEPTH)).min((total_count as f64).log2());
    expected_distinct_count(bit_depth, total_count)
        .max(1.0)
        .log2()
        .min(ceiling)
}

//! Unique value selection over an inclusive range.
//!
//! Drives the [`UnbiasedSampler`] until it has collected the requested number
//! of distinct values. Duplicate draws consume stream bytes but do not grow
//! the working set.
//!
//! # Inversion
//!
//! When more than half of the range is requested, the selector draws the
//! complement instead and returns every integer it did NOT draw, in ascending
//! order. Drawing 30 mines out of 50 cells therefore costs 20 distinct draws.
//! The result equals the complement of a direct draw of `size - count`.
//!
//! # Ordering
//!
//! Direct draws are returned in draw order. Inverted draws are returned in
//! ascending order. Both orders are reproducible.

use std::{collections::HashSet, ops::RangeInclusive};

use fairdraw_crypto::Hmac256;
use serde::Serialize;

use crate::{error::DrawError, sampler::UnbiasedSampler, stream::DigestStream};

/// Counters describing how a draw consumed the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    /// Digest blocks generated.
    pub blocks: u64,
    /// Stream bytes consumed.
    pub bytes_consumed: u64,
    /// Candidates rejected by the sampler.
    pub rejections: u64,
    /// Accepted samples that repeated an earlier value.
    pub duplicates: u64,
    /// Whether the complement was drawn.
    pub inverted: bool,
}

/// Result of a unique draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    /// Selected values.
    pub values: Vec<i64>,
    /// How the stream was consumed.
    pub stats: DrawStats,
}

/// Validated inclusive range whose size fits the 32-bit sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    lower: i64,
    upper: i64,
    size: u64,
}

impl Bounds {
    fn new(range: &RangeInclusive<i64>) -> Result<Self, DrawError> {
        let (lower, upper) = (*range.start(), *range.end());
        if upper < lower {
            return Err(DrawError::InvalidBounds { lower, upper });
        }

        let wide = i128::from(upper) - i128::from(lower) + 1;
        let size = u64::try_from(wide)
            .ok()
            .filter(|&size| UnbiasedSampler::new(size).is_some())
            .ok_or(DrawError::RangeTooWide { size: wide.unsigned_abs() })?;

        Ok(Self { lower, upper, size })
    }
}

/// Selects `count` distinct integers from `range`.
///
/// # Errors
///
/// - [`DrawError::InvalidRange`] if `count` is zero or exceeds the range size
/// - [`DrawError::InvalidBounds`] if the range is empty
/// - [`DrawError::RangeTooWide`] if the range holds more than `2^32` integers
/// - [`DrawError::Crypto`] if the keyed hash is unavailable
pub fn select_unique<H: Hmac256 + ?Sized>(
    hmac: &H,
    count: u64,
    range: RangeInclusive<i64>,
    server_seed: &str,
    nonce: u64,
    client_seed: &str,
) -> Result<Draw, DrawError> {
    if count == 0 {
        let available = Bounds::new(&range).map_or(0, |bounds| bounds.size);
        return Err(DrawError::InvalidRange { count, available });
    }

    let bounds = Bounds::new(&range)?;
    if count > bounds.size {
        return Err(DrawError::InvalidRange { count, available: bounds.size });
    }

    let inverted = count > bounds.size - count;
    let target = if inverted { bounds.size - count } else { count };

    let mut stream = DigestStream::for_round(hmac, server_seed, client_seed, nonce);
    let (drawn, seen, duplicates, rejections) = collect_distinct(&mut stream, bounds, target)?;

    let values = if inverted {
        (bounds.lower..=bounds.upper).filter(|value| !seen.contains(value)).collect()
    } else {
        drawn
    };

    let stats = DrawStats {
        blocks: stream.blocks_generated(),
        bytes_consumed: stream.bytes_consumed(),
        rejections,
        duplicates,
        inverted,
    };

    tracing::debug!(
        count,
        lower = bounds.lower,
        upper = bounds.upper,
        nonce,
        inverted,
        blocks = stats.blocks,
        rejections,
        duplicates,
        "selected unique values"
    );

    Ok(Draw { values, stats })
}

/// Selects a single integer from `range`.
///
/// # Errors
///
/// Same as [`select_unique`].
pub fn select_one<H: Hmac256 + ?Sized>(
    hmac: &H,
    range: RangeInclusive<i64>,
    server_seed: &str,
    nonce: u64,
    client_seed: &str,
) -> Result<i64, DrawError> {
    let draw = select_unique(hmac, 1, range, server_seed, nonce, client_seed)?;
    draw.values.first().copied().ok_or(DrawError::InvalidRange { count: 1, available: 0 })
}

type Collected = (Vec<i64>, HashSet<i64>, u64, u64);

fn collect_distinct<H: Hmac256 + ?Sized>(
    stream: &mut DigestStream<'_, H>,
    bounds: Bounds,
    target: u64,
) -> Result<Collected, DrawError> {
    // Bounds::new guarantees a valid sampler range.
    let mut sampler = UnbiasedSampler::new(bounds.size)
        .ok_or(DrawError::RangeTooWide { size: u128::from(bounds.size) })?;

    let mut drawn = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = 0;

    while (drawn.len() as u64) < target {
        let offset = sampler.draw(stream)?;
        // offset < size <= upper - lower + 1, so this cannot overflow.
        let value = bounds.lower + offset as i64;
        if seen.insert(value) {
            drawn.push(value);
        } else {
            duplicates += 1;
        }
    }

    Ok((drawn, seen, duplicates, sampler.rejections()))
}

#[cfg(test)]
mod tests {
    use fairdraw_crypto::HmacSha256;

    use super::*;

    const SERVER: &str = "server-seed";
    const CLIENT: &str = "client-seed";

    fn draw(count: u64, range: RangeInclusive<i64>, nonce: u64) -> Result<Draw, DrawError> {
        select_unique(&HmacSha256::new(), count, range, SERVER, nonce, CLIENT)
    }

    #[test]
    fn zero_count_is_invalid_range() {
        assert_eq!(draw(0, 1..=10, 0), Err(DrawError::InvalidRange { count: 0, available: 10 }));
    }

    #[test]
    fn inverted_bounds_are_invalid() {
        assert_eq!(draw(1, 5..=4, 0), Err(DrawError::InvalidBounds { lower: 5, upper: 4 }));
    }

    #[test]
    fn count_above_size_is_invalid_range() {
        assert_eq!(draw(11, 1..=10, 0), Err(DrawError::InvalidRange { count: 11, available: 10 }));
    }

    #[test]
    fn too_wide_range_is_rejected() {
        assert_eq!(
            draw(1, 0..=(1 << 32), 0),
            Err(DrawError::RangeTooWide { size: (1 << 32) + 1 })
        );
        assert!(matches!(draw(1, i64::MIN..=i64::MAX, 0), Err(DrawError::RangeTooWide { .. })));
    }

    #[test]
    fn widest_supported_range_is_accepted() {
        let result = draw(1, 0..=u32::MAX.into(), 0).unwrap();
        assert_eq!(result.values.len(), 1);
    }

    #[test]
    fn full_range_needs_no_draws() {
        let result = draw(10, 1..=10, 0).unwrap();
        assert_eq!(result.values, (1..=10).collect::<Vec<_>>());
        assert!(result.stats.inverted);
        assert_eq!(result.stats.blocks, 0);
    }

    #[test]
    fn single_value_range() {
        assert_eq!(draw(1, 42..=42, 3).unwrap().values, vec![42]);
        assert_eq!(select_one(&HmacSha256::new(), -7..=-7, SERVER, 0, CLIENT).unwrap(), -7);
    }

    #[test]
    fn exactly_half_is_drawn_directly() {
        let result = draw(5, 1..=10, 0).unwrap();
        assert!(!result.stats.inverted);

        let result = draw(6, 1..=10, 0).unwrap();
        assert!(result.stats.inverted);
    }

    #[test]
    fn inversion_returns_complement_of_direct_draw() {
        for nonce in 0..20 {
            let inverted = draw(30, 1..=50, nonce).unwrap();
            let direct = draw(20, 1..=50, nonce).unwrap();
            assert!(inverted.stats.inverted);
            assert!(!direct.stats.inverted);

            let complement: Vec<i64> =
                (1..=50).filter(|value| !direct.values.contains(value)).collect();
            assert_eq!(inverted.values, complement);
            assert_eq!(inverted.stats.bytes_consumed, direct.stats.bytes_consumed);
        }
    }

    #[test]
    fn negative_ranges_are_supported() {
        let result = draw(4, -10..=-1, 5).unwrap();
        assert_eq!(result.values.len(), 4);
        assert!(result.values.iter().all(|value| (-10..=-1).contains(value)));
    }

    #[test]
    fn stats_account_for_every_consumed_candidate() {
        let result = draw(12, 0..=24, 11).unwrap();
        let candidates = result.stats.bytes_consumed / 4;
        assert_eq!(candidates, 12 + result.stats.rejections + result.stats.duplicates);
        assert!(result.stats.blocks * 32 >= result.stats.bytes_consumed);
    }
}

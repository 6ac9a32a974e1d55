//! Visible-range queries over monotonic band extents.

use std::ops::RangeInclusive;

/// Find the minimal contiguous index range whose extents intersect the
/// half-open interval `[min, max)`.
///
/// `extent` returns the `[start, end)` extent of one band, or `None` when
/// that index has no geometry yet. Because band extents are packed and
/// monotonic, the intersecting indices form one contiguous run; scanning
/// stops at the first non-intersecting index after the run.
///
/// Fails safe: returns `None` for an empty table or a degenerate interval.
pub fn intersecting_range<F>(
    count: usize,
    interval: (f32, f32),
    extent: F,
) -> Option<RangeInclusive<usize>>
where
    F: Fn(usize) -> Option<(f32, f32)>,
{
    let (interval_min, interval_max) = interval;
    if count == 0 || interval_max <= interval_min {
        return None;
    }

    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;
    for index in 0..count {
        let Some((band_min, band_max)) = extent(index) else {
            return None;
        };
        if band_min >= interval_max {
            // Past the interval; no later band can intersect.
            break;
        }
        if band_max > interval_min && band_min < interval_max {
            if first.is_none() {
                first = Some(index);
            }
            last = Some(index);
        } else if first.is_some() {
            // Past the contiguous run.
            break;
        }
    }

    match (first, last) {
        (Some(first), Some(last)) => Some(first..=last),
        _ => None,
    }
}
